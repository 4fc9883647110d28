use axum::{http::StatusCode, Json};
use shared::{
    api::{
        error::{Nothing, ServerError},
        payloads::{MessageResponse, WorkoutFull, WorkoutPayload},
        response_errors::WorkoutError,
    },
    model::{NewWorkout, Workout},
};
use tracing::{info, instrument};

use crate::{
    db::{begin_write, DatabaseConnection},
    extract::{IdPath, JsonPayload},
};

#[instrument(skip(conn))]
pub async fn list_workouts(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<WorkoutFull>>, ServerError<Nothing>> {
    let workouts = conn
        .interact(|conn| Ok::<_, ServerError<_>>(Workout::fetch_all_full(conn)?))
        .await??;

    Ok(Json(workouts))
}

#[instrument(skip(conn))]
pub async fn get_workout(
    DatabaseConnection(conn): DatabaseConnection,
    IdPath(id): IdPath<i64>,
) -> Result<Json<WorkoutFull>, ServerError<WorkoutError>> {
    let workout = conn
        .interact(move |conn| {
            let workout = Workout::fetch_full(conn, id)?.ok_or(WorkoutError::NotFound { id })?;
            Ok::<_, ServerError<_>>(workout)
        })
        .await??;

    Ok(Json(workout))
}

#[instrument(skip(conn, payload))]
pub async fn create_workout(
    DatabaseConnection(conn): DatabaseConnection,
    payload: JsonPayload,
) -> Result<(StatusCode, Json<WorkoutFull>), ServerError<WorkoutError>> {
    let payload = WorkoutPayload::load(payload.required()?)?;
    let new_workout = NewWorkout::new(payload.date, payload.duration_minutes, payload.notes)?;

    let workout = conn
        .interact(move |conn| {
            let tx = begin_write(conn)?;
            let workout = Workout::create(&tx, new_workout)?;
            tx.commit()?;
            Ok::<_, ServerError<_>>(workout)
        })
        .await??;

    info!(id = workout.id, "Created workout");
    Ok((StatusCode::CREATED, Json(WorkoutFull::new(&workout, Vec::new()))))
}

#[instrument(skip(conn))]
pub async fn delete_workout(
    DatabaseConnection(conn): DatabaseConnection,
    IdPath(id): IdPath<i64>,
) -> Result<Json<MessageResponse>, ServerError<WorkoutError>> {
    conn.interact(move |conn| {
        let tx = begin_write(conn)?;
        Workout::delete(&tx, id)?.ok_or(WorkoutError::NotFound { id })?;
        tx.commit()?;
        Ok::<_, ServerError<_>>(())
    })
    .await??;

    info!(id, "Deleted workout");
    Ok(Json(MessageResponse::new(format!(
        "Workout (id={id}) deleted successfully."
    ))))
}
