use axum::{http::StatusCode, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::{ExerciseBrief, WorkoutExerciseFull, WorkoutExercisePayload},
        response_errors::WorkoutExerciseError,
    },
    model::{Exercise, ModelError, NewWorkoutExercise, Workout, WorkoutExercise},
};
use tracing::{info, instrument};

use crate::{
    db::{begin_write, DatabaseConnection},
    extract::{IdPath, JsonPayload},
};

/// Both parents are looked up before the body is looked at, so a missing
/// workout or exercise is reported ahead of any problem with the payload
#[instrument(skip(conn, payload))]
pub async fn add_exercise_to_workout(
    DatabaseConnection(conn): DatabaseConnection,
    IdPath((workout_id, exercise_id)): IdPath<(i64, i64)>,
    payload: JsonPayload,
) -> Result<(StatusCode, Json<WorkoutExerciseFull>), ServerError<WorkoutExerciseError>> {
    let entry = conn
        .interact(move |conn| {
            let tx = begin_write(conn)?;

            if Workout::fetch_by_id(&tx, workout_id)?.is_none() {
                Err(WorkoutExerciseError::WorkoutNotFound { id: workout_id })?;
            }
            let exercise = Exercise::fetch_by_id(&tx, exercise_id)?
                .ok_or(WorkoutExerciseError::ExerciseNotFound { id: exercise_id })?;

            let payload = WorkoutExercisePayload::load(payload.or_empty_object()?)?;
            if !payload.has_volume() {
                Err(WorkoutExerciseError::MissingVolume)?;
            }

            let new_entry = NewWorkoutExercise::new(
                workout_id,
                exercise_id,
                payload.reps,
                payload.sets,
                payload.duration_seconds,
            )?;
            let entry = match WorkoutExercise::create(&tx, new_entry) {
                Ok(entry) => entry,
                Err(ModelError::Duplicate(_)) => Err(WorkoutExerciseError::AlreadyInWorkout {
                    workout_id,
                    exercise_id,
                })?,
                Err(e) => Err(e)?,
            };
            tx.commit()?;

            Ok::<_, ServerError<WorkoutExerciseError>>(WorkoutExerciseFull::new(
                &entry,
                ExerciseBrief::from(&exercise),
            ))
        })
        .await??;

    info!(id = entry.id, workout_id, exercise_id, "Added exercise to workout");
    Ok((StatusCode::CREATED, Json(entry)))
}
