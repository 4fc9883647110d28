use const_format::concatcp;
pub mod error;
pub mod payloads;
pub mod response_errors;

pub const API_BASE_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Workouts,
    WorkoutId,
    Exercises,
    ExerciseId,
    WorkoutExercises,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Workouts => concatcp!(API_BASE_PATH, "workouts"),
            WorkoutId => concatcp!(API_BASE_PATH, "workouts/:id"),
            Exercises => concatcp!(API_BASE_PATH, "exercises"),
            ExerciseId => concatcp!(API_BASE_PATH, "exercises/:id"),
            WorkoutExercises => concatcp!(
                API_BASE_PATH,
                "workouts/:workout_id/exercises/:exercise_id/workout_exercises"
            ),
        }
    }

    /// Fills the `:param` placeholders of the path in order
    pub fn url(&self, ids: &[i64]) -> String {
        let mut ids = ids.iter();
        self.path()
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(_) => ids
                    .next()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| segment.to_owned()),
                None => segment.to_owned(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::Object;

    #[test]
    fn test_url_fills_placeholders_in_order() {
        assert_eq!(Object::Workouts.url(&[]), "/workouts");
        assert_eq!(Object::WorkoutId.url(&[7]), "/workouts/7");
        assert_eq!(
            Object::WorkoutExercises.url(&[1, 2]),
            "/workouts/1/exercises/2/workout_exercises"
        );
    }
}
