use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    api::{
        error::ValidationError,
        payloads::{
            fields::{self, Loader},
            ExerciseBrief,
        },
    },
    model::WorkoutExercise,
};

pub const REPS_MESSAGE: &str = "Reps must be at least 1.";
pub const SETS_MESSAGE: &str = "Sets must be at least 1.";
pub const DURATION_SECONDS_MESSAGE: &str = "Duration must be at least 1 second.";

/// Body of `POST /workouts/:workout_id/exercises/:exercise_id/workout_exercises`.
/// The ids come from the path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutExercisePayload {
    pub reps: Option<i64>,
    pub sets: Option<i64>,
    pub duration_seconds: Option<i64>,
}

impl WorkoutExercisePayload {
    pub const FIELDS: &'static [&'static str] = &["reps", "sets", "duration_seconds"];

    pub fn load(value: Value) -> Result<Self, ValidationError> {
        let mut loader = Loader::new(value, Self::FIELDS)?;

        let reps = Self::at_least_one(&mut loader, "reps", REPS_MESSAGE);
        let sets = Self::at_least_one(&mut loader, "sets", SETS_MESSAGE);
        let duration_seconds = Self::at_least_one(&mut loader, "duration_seconds", DURATION_SECONDS_MESSAGE);

        loader.finish(|| {
            Some(Self {
                reps,
                sets,
                duration_seconds,
            })
        })
    }

    fn at_least_one(loader: &mut Loader, field: &str, message: &str) -> Option<i64> {
        let value = loader.optional(field, fields::integer);
        loader.validate(field, value, |v| (v >= 1).then_some(v), message)
    }

    /// An entry needs a set count or a duration, reps alone aren't enough
    pub fn has_volume(&self) -> bool {
        self.sets.is_some() || self.duration_seconds.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseFull {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub reps: Option<i64>,
    pub sets: Option<i64>,
    pub duration_seconds: Option<i64>,
    pub exercise: ExerciseBrief,
}

impl WorkoutExerciseFull {
    pub fn new(entry: &WorkoutExercise, exercise: ExerciseBrief) -> Self {
        Self {
            id: entry.id,
            workout_id: entry.workout_id,
            exercise_id: entry.exercise_id,
            reps: entry.reps,
            sets: entry.sets,
            duration_seconds: entry.duration_seconds,
            exercise,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_object_loads_with_no_volume() {
        let payload = WorkoutExercisePayload::load(json!({})).unwrap();
        assert_eq!(payload, WorkoutExercisePayload::default());
        assert!(!payload.has_volume());
    }

    #[test]
    fn test_volume_from_sets_or_duration() {
        let payload = WorkoutExercisePayload::load(json!({ "reps": 10, "sets": 3 })).unwrap();
        assert!(payload.has_volume());

        let payload = WorkoutExercisePayload::load(json!({ "duration_seconds": "60" })).unwrap();
        assert_eq!(payload.duration_seconds, Some(60));
        assert!(payload.has_volume());

        let payload = WorkoutExercisePayload::load(json!({ "reps": 10, "sets": null })).unwrap();
        assert!(!payload.has_volume());
    }

    #[test]
    fn test_counters_must_be_at_least_one() {
        let err = WorkoutExercisePayload::load(json!({
            "reps": 0,
            "sets": -1,
            "duration_seconds": 0,
        }))
        .unwrap_err();
        assert_eq!(err.messages("reps"), [REPS_MESSAGE]);
        assert_eq!(err.messages("sets"), [SETS_MESSAGE]);
        assert_eq!(err.messages("duration_seconds"), [DURATION_SECONDS_MESSAGE]);
    }

    #[test]
    fn test_path_ids_in_body_are_unknown() {
        let err =
            WorkoutExercisePayload::load(json!({ "sets": 3, "workout_id": 1, "exercise_id": 2 }))
                .unwrap_err();
        assert_eq!(err.messages("workout_id"), ["Unknown field."]);
        assert_eq!(err.messages("exercise_id"), ["Unknown field."]);
    }
}
