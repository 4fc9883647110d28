use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    api::{
        error::ValidationError,
        payloads::{
            fields::{self, Loader},
            WorkoutExerciseFull,
        },
    },
    model::{
        constants::{WORKOUT_DURATION_MAX, WORKOUT_DURATION_MIN},
        Workout,
    },
};

pub const DURATION_RANGE_MESSAGE: &str = "Duration must be between 1 and 480 minutes.";

/// Body of `POST /workouts`
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPayload {
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub notes: Option<String>,
}

impl WorkoutPayload {
    pub const FIELDS: &'static [&'static str] = &["date", "duration_minutes", "notes"];

    pub fn load(value: Value) -> Result<Self, ValidationError> {
        let mut loader = Loader::new(value, Self::FIELDS)?;

        let date = loader.required("date", fields::date);

        let duration_minutes = loader.required("duration_minutes", fields::integer);
        let duration_minutes = loader.validate(
            "duration_minutes",
            duration_minutes,
            |d| (WORKOUT_DURATION_MIN..=WORKOUT_DURATION_MAX).contains(&d).then_some(d),
            DURATION_RANGE_MESSAGE,
        );

        let notes = loader.optional("notes", fields::string);

        loader.finish(|| {
            Some(Self {
                date: date?,
                duration_minutes: duration_minutes?,
                notes,
            })
        })
    }
}

/// A workout without its entries, used when nested inside an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutBrief {
    pub id: i64,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub notes: Option<String>,
}

impl From<&Workout> for WorkoutBrief {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id,
            date: workout.date,
            duration_minutes: workout.duration_minutes,
            notes: workout.notes.clone(),
        }
    }
}

/// A workout with each exercise performed in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutFull {
    pub id: i64,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub workout_exercises: Vec<WorkoutExerciseFull>,
}

impl WorkoutFull {
    pub fn new(workout: &Workout, workout_exercises: Vec<WorkoutExerciseFull>) -> Self {
        Self {
            id: workout.id,
            date: workout.date,
            duration_minutes: workout.duration_minutes,
            notes: workout.notes.clone(),
            workout_exercises,
        }
    }
}
