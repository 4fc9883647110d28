use axum::{
    routing::{get, post},
    Router,
};
use shared::api::{
    error::{Nothing, ServerError},
    Object,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::AppState;

mod exercises;
pub use exercises::*;

mod workouts;
pub use workouts::*;

mod workout_exercises;
pub use workout_exercises::*;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            Object::Workouts.path(),
            get(list_workouts).post(create_workout),
        )
        .route(
            Object::WorkoutId.path(),
            get(get_workout).delete(delete_workout),
        )
        .route(
            Object::Exercises.path(),
            get(list_exercises).post(create_exercise),
        )
        .route(
            Object::ExerciseId.path(),
            get(get_exercise).delete(delete_exercise),
        )
        .route(
            Object::WorkoutExercises.path(),
            post(add_exercise_to_workout),
        )
        .fallback(not_found)
}

/// The full application with request tracing, ready to serve
pub fn app(state: AppState) -> Router {
    router()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

async fn not_found() -> ServerError<Nothing> {
    ServerError::NotFound
}
