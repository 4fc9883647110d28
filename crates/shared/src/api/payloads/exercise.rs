use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    api::{
        error::ValidationError,
        payloads::{
            fields::{self, Loader},
            WorkoutBrief,
        },
    },
    model::{constants::EXERCISE_NAME_MAX_LENGTH, Category, Exercise},
};

pub const NAME_LENGTH_MESSAGE: &str = "Name must be between 1 and 100 characters.";

/// Body of `POST /exercises`
#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePayload {
    /// Trimmed
    pub name: String,
    pub category: Category,
    pub equipment_needed: bool,
}

impl ExercisePayload {
    pub const FIELDS: &'static [&'static str] = &["name", "category", "equipment_needed"];

    pub fn load(value: Value) -> Result<Self, ValidationError> {
        let mut loader = Loader::new(value, Self::FIELDS)?;

        let name = loader.required("name", fields::string);
        let name = loader.validate(
            "name",
            name,
            |name| {
                let name = name.trim();
                (1..=EXERCISE_NAME_MAX_LENGTH)
                    .contains(&name.chars().count())
                    .then(|| name.to_owned())
            },
            NAME_LENGTH_MESSAGE,
        );

        let category = loader.required("category", fields::string);
        let category = loader.validate(
            "category",
            category,
            |category| category.parse::<Category>().ok(),
            Category::invalid_message(),
        );

        let equipment_needed = loader.with_default("equipment_needed", false, fields::boolean);

        loader.finish(|| {
            Some(Self {
                name: name?,
                category: category?,
                equipment_needed,
            })
        })
    }
}

/// An exercise without its workouts, used when nested inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseBrief {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub equipment_needed: bool,
}

impl From<&Exercise> for ExerciseBrief {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name.clone(),
            category: exercise.category,
            equipment_needed: exercise.equipment_needed,
        }
    }
}

/// An exercise along with every workout it appears in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseFull {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub equipment_needed: bool,
    pub workouts: Vec<WorkoutBrief>,
}

impl ExerciseFull {
    pub fn new(exercise: &Exercise, workouts: Vec<WorkoutBrief>) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name.clone(),
            category: exercise.category,
            equipment_needed: exercise.equipment_needed,
            workouts,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_load_normalizes_name_and_category() {
        let payload =
            ExercisePayload::load(json!({ "name": "  Push-Up ", "category": " Strength " }))
                .unwrap();
        assert_eq!(payload.name, "Push-Up");
        assert_eq!(payload.category, Category::Strength);
        assert!(!payload.equipment_needed);
    }

    #[test]
    fn test_load_reports_every_bad_field() {
        let err = ExercisePayload::load(json!({
            "name": "   ",
            "category": "yoga",
            "equipment_needed": "sometimes",
            "id": 3,
        }))
        .unwrap_err();

        assert_eq!(err.messages("name"), [NAME_LENGTH_MESSAGE]);
        assert_eq!(err.messages("category"), [Category::invalid_message()]);
        assert_eq!(err.messages("equipment_needed"), ["Not a valid boolean."]);
        assert_eq!(err.messages("id"), ["Unknown field."]);
    }

    #[test]
    fn test_load_name_length_applies_after_trimming() {
        let padded = format!("  {}  ", "x".repeat(100));
        assert_eq!(ExercisePayload::load(json!({ "name": padded, "category": "other" })).unwrap().name.len(), 100);

        let err =
            ExercisePayload::load(json!({ "name": "x".repeat(101), "category": "other" })).unwrap_err();
        assert_eq!(err.messages("name"), [NAME_LENGTH_MESSAGE]);
    }

    #[test]
    fn test_load_requires_name_and_category() {
        let err = ExercisePayload::load(json!({ "equipment_needed": true })).unwrap_err();
        assert_eq!(err.messages("name"), ["Missing data for required field."]);
        assert_eq!(err.messages("category"), ["Missing data for required field."]);

        let err = ExercisePayload::load(json!({ "name": 5, "category": null })).unwrap_err();
        assert_eq!(err.messages("name"), ["Not a valid string."]);
        assert_eq!(err.messages("category"), ["Field may not be null."]);
    }
}
