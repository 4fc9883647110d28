//! Drives the router in-process against a scratch database

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use server::{db, routes, AppState};
use shared::api::Object;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("test.sqlite");
        let path = path.to_str().expect("Temp path is not UTF-8");

        db::run_migrations(path).expect("Failed to run migrations");
        let pool = db::create_pool(path, 4).expect("Failed to create pool");

        Self {
            router: routes::app(AppState::new(pool)),
            _dir: dir,
        }
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send_raw(Method::GET, uri, "").await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send_raw(Method::DELETE, uri, "").await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_raw(Method::POST, uri, &body.to_string()).await
    }

    /// Creates an exercise and returns its id
    pub async fn create_exercise(&self, name: &str, category: &str) -> i64 {
        let (status, body) = self
            .post(
                Object::Exercises.path(),
                json!({ "name": name, "category": category }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("Exercise id")
    }

    /// Creates a workout and returns its id
    pub async fn create_workout(&self, date: &str, duration_minutes: i64) -> i64 {
        let (status, body) = self
            .post(
                Object::Workouts.path(),
                json!({ "date": date, "duration_minutes": duration_minutes }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("Workout id")
    }

    pub async fn add_exercise(
        &self,
        workout_id: i64,
        exercise_id: i64,
        body: Value,
    ) -> (StatusCode, Value) {
        self.post(&Object::WorkoutExercises.url(&[workout_id, exercise_id]), body)
            .await
    }
}
