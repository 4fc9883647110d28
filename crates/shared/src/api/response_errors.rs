use http::StatusCode;
use thiserror::Error;

use crate::api::error::ServerError;

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[error($($message:tt)*)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Error)]
        pub enum $name {
            $(
                #[error($($message)*)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl $name {
            pub fn code(&self) -> StatusCode {
                match self {
                    $( $name::$variant { .. } => $variant_code, )*
                }
            }
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = inner.code();
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(WorkoutError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Workout with id {id} not found.")]
    NotFound { id: i64 },
});

response_error!(ExerciseError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Exercise with id {id} not found.")]
    NotFound { id: i64 },
    #[code(StatusCode::CONFLICT)]
    #[error("An exercise named '{name}' already exists.")]
    NameTaken { name: String },
});

response_error!(WorkoutExerciseError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("Workout with id {id} not found.")]
    WorkoutNotFound { id: i64 },
    #[code(StatusCode::NOT_FOUND)]
    #[error("Exercise with id {id} not found.")]
    ExerciseNotFound { id: i64 },
    #[code(StatusCode::UNPROCESSABLE_ENTITY)]
    #[error("Please provide either 'sets' (with optional 'reps') or 'duration_seconds'.")]
    MissingVolume,
    #[code(StatusCode::CONFLICT)]
    #[error("Exercise (id={exercise_id}) is already in Workout (id={workout_id}).")]
    AlreadyInWorkout { workout_id: i64, exercise_id: i64 },
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_the_api() {
        assert_eq!(
            WorkoutError::NotFound { id: 3 }.to_string(),
            "Workout with id 3 not found."
        );
        assert_eq!(
            ExerciseError::NameTaken { name: "Push-Up".into() }.to_string(),
            "An exercise named 'Push-Up' already exists."
        );
        assert_eq!(
            WorkoutExerciseError::AlreadyInWorkout { workout_id: 1, exercise_id: 2 }.to_string(),
            "Exercise (id=2) is already in Workout (id=1)."
        );
    }

    #[test]
    fn test_codes_flow_into_server_error() {
        let err: ServerError<ExerciseError> = ExerciseError::NameTaken { name: "Plank".into() }.into();
        assert_eq!(err.code(), StatusCode::CONFLICT);

        let err: ServerError<WorkoutExerciseError> = WorkoutExerciseError::MissingVolume.into();
        assert_eq!(err.code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ServerError<WorkoutError> = WorkoutError::NotFound { id: 9 }.into();
        assert_eq!(err.code(), StatusCode::NOT_FOUND);
    }
}
