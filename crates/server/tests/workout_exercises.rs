mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;
use shared::api::{
    payloads::{ExerciseFull, WorkoutExerciseFull, WorkoutFull},
    Object,
};
use tokio_test::assert_ok;

#[tokio::test]
async fn test_push_up_walkthrough() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            Object::Exercises.path(),
            json!({ "name": "  Push-Up ", "category": " Strength" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let exercise: ExerciseFull = assert_ok!(serde_json::from_value(body));
    assert_eq!(exercise.name, "Push-Up");

    let (status, body) = app
        .post(
            Object::Workouts.path(),
            json!({ "date": "2024-01-15", "duration_minutes": 30 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let workout: WorkoutFull = assert_ok!(serde_json::from_value(body));

    let (status, body) = app
        .add_exercise(workout.id, exercise.id, json!({ "sets": 3, "reps": 15 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "workout_id": workout.id,
            "exercise_id": exercise.id,
            "reps": 15,
            "sets": 3,
            "duration_seconds": null,
            "exercise": {
                "id": exercise.id,
                "name": "Push-Up",
                "category": "strength",
                "equipment_needed": false,
            },
        })
    );

    let (_, body) = app.get(&Object::WorkoutId.url(&[workout.id])).await;
    let full: WorkoutFull = assert_ok!(serde_json::from_value(body));
    assert_eq!(full.workout_exercises.len(), 1);
    assert_eq!(full.workout_exercises[0].exercise.name, "Push-Up");

    let (_, body) = app.get(&Object::ExerciseId.url(&[exercise.id])).await;
    let full: ExerciseFull = assert_ok!(serde_json::from_value(body));
    assert_eq!(full.workouts.len(), 1);
    assert_eq!(full.workouts[0].id, workout.id);

    let (status, body) = app
        .add_exercise(workout.id, exercise.id, json!({ "sets": 1 }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({
            "error": format!(
                "Exercise (id={}) is already in Workout (id={}).",
                exercise.id, workout.id
            )
        })
    );

    let (status, _) = app.delete(&Object::WorkoutId.url(&[workout.id])).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&Object::ExerciseId.url(&[exercise.id])).await;
    assert_eq!(body["workouts"], json!([]));
}

#[tokio::test]
async fn test_sets_or_duration_is_required() {
    let app = TestApp::new();
    let workout_id = app.create_workout("2024-06-08", 30).await;
    let missing_volume = json!({
        "error": "Please provide either 'sets' (with optional 'reps') or 'duration_seconds'."
    });

    let plank = app.create_exercise("Plank", "strength").await;
    let (status, body) = app
        .add_exercise(workout_id, plank, json!({ "reps": 10 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, missing_volume);

    let run = app.create_exercise("Treadmill Run", "cardio").await;
    let uri = Object::WorkoutExercises.url(&[workout_id, run]);
    for raw in ["", "{}", "null", "[]"] {
        let (status, body) = app.send_raw(Method::POST, &uri, raw).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{raw:?}");
        assert_eq!(body, missing_volume);
    }

    let (status, body) = app
        .add_exercise(workout_id, run, json!({ "duration_seconds": 1200 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let entry: WorkoutExerciseFull = assert_ok!(serde_json::from_value(body));
    assert_eq!(entry.duration_seconds, Some(1200));
    assert_eq!(entry.sets, None);

    let curl = app.create_exercise("Dumbbell Curl", "strength").await;
    let (status, _) = app.add_exercise(workout_id, curl, json!({ "sets": 3 })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_counters_must_be_positive() {
    let app = TestApp::new();
    let workout_id = app.create_workout("2024-06-08", 30).await;
    let exercise_id = app.create_exercise("Plank", "strength").await;

    let (status, body) = app
        .add_exercise(
            workout_id,
            exercise_id,
            json!({ "reps": 0, "sets": -1, "duration_seconds": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "errors": {
                "reps": ["Reps must be at least 1."],
                "sets": ["Sets must be at least 1."],
                "duration_seconds": ["Duration must be at least 1 second."],
            }
        })
    );

    let (status, body) = app
        .add_exercise(workout_id, exercise_id, json!({ "sets": "three", "weight": 20 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["sets"], json!(["Not a valid integer."]));
    assert_eq!(body["errors"]["weight"], json!(["Unknown field."]));

    let (_, body) = app.get(&Object::WorkoutId.url(&[workout_id])).await;
    assert_eq!(body["workout_exercises"], json!([]));
}

#[tokio::test]
async fn test_parents_are_checked_before_the_body() {
    let app = TestApp::new();
    let workout_id = app.create_workout("2024-06-08", 30).await;
    let exercise_id = app.create_exercise("Plank", "strength").await;

    let (status, body) = app
        .send_raw(Method::POST, &Object::WorkoutExercises.url(&[77, 88]), "not json")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Workout with id 77 not found." }));

    let (status, body) = app
        .add_exercise(workout_id, 88, json!({ "sets": 0 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Exercise with id 88 not found." }));

    let (status, body) = app
        .send_raw(
            Method::POST,
            &Object::WorkoutExercises.url(&[workout_id, exercise_id]),
            "not json",
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Failed to decode JSON object." }));
}
