use axum::{http::StatusCode, Json};
use shared::{
    api::{
        error::{Nothing, ServerError},
        payloads::{ExerciseFull, ExercisePayload, MessageResponse},
        response_errors::ExerciseError,
    },
    model::{Exercise, ModelError, NewExercise},
};
use tracing::{info, instrument};

use crate::{
    db::{begin_write, DatabaseConnection},
    extract::{IdPath, JsonPayload},
};

#[instrument(skip(conn))]
pub async fn list_exercises(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<ExerciseFull>>, ServerError<Nothing>> {
    let exercises = conn
        .interact(|conn| Ok::<_, ServerError<_>>(Exercise::fetch_all_full(conn)?))
        .await??;

    Ok(Json(exercises))
}

#[instrument(skip(conn))]
pub async fn get_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    IdPath(id): IdPath<i64>,
) -> Result<Json<ExerciseFull>, ServerError<ExerciseError>> {
    let exercise = conn
        .interact(move |conn| {
            let exercise = Exercise::fetch_full(conn, id)?.ok_or(ExerciseError::NotFound { id })?;
            Ok::<_, ServerError<_>>(exercise)
        })
        .await??;

    Ok(Json(exercise))
}

#[instrument(skip(conn, payload))]
pub async fn create_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    payload: JsonPayload,
) -> Result<(StatusCode, Json<ExerciseFull>), ServerError<ExerciseError>> {
    let payload = ExercisePayload::load(payload.required()?)?;
    let new_exercise = NewExercise::new(
        &payload.name,
        payload.category.as_str(),
        payload.equipment_needed,
    )?;

    let exercise = conn
        .interact(move |conn| {
            let tx = begin_write(conn)?;
            let name = new_exercise.name().to_owned();
            let exercise = match Exercise::create(&tx, new_exercise) {
                Ok(exercise) => exercise,
                Err(ModelError::Duplicate(_)) => Err(ExerciseError::NameTaken { name })?,
                Err(e) => Err(e)?,
            };
            tx.commit()?;
            Ok::<_, ServerError<_>>(exercise)
        })
        .await??;

    info!(id = exercise.id, name = %exercise.name, "Created exercise");
    Ok((StatusCode::CREATED, Json(ExerciseFull::new(&exercise, Vec::new()))))
}

#[instrument(skip(conn))]
pub async fn delete_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    IdPath(id): IdPath<i64>,
) -> Result<Json<MessageResponse>, ServerError<ExerciseError>> {
    let exercise = conn
        .interact(move |conn| {
            let tx = begin_write(conn)?;
            let exercise = Exercise::delete(&tx, id)?.ok_or(ExerciseError::NotFound { id })?;
            tx.commit()?;
            Ok::<_, ServerError<_>>(exercise)
        })
        .await??;

    info!(id, name = %exercise.name, "Deleted exercise");
    Ok(Json(MessageResponse::new(format!(
        "Exercise '{}' deleted successfully.",
        exercise.name
    ))))
}
