//! Sample data for local development. Seeding wipes whatever is already stored.

use chrono::NaiveDate;
use rusqlite::Connection;
use shared::{
    api::error::{Nothing, ServerError},
    model::{Exercise, NewExercise, NewWorkout, NewWorkoutExercise, Workout, WorkoutExercise},
    other_error,
};
use tracing::{info, instrument};

use crate::db;

/// name, category, equipment_needed
const EXERCISES: [(&str, &str, bool); 10] = [
    ("Barbell Back Squat", "strength", true),
    ("Bench Press", "strength", true),
    ("Pull-Up", "strength", true),
    ("Overhead Press", "strength", true),
    ("Plank", "strength", false),
    ("Box Jump", "plyometrics", false),
    ("Kettlebell Swing", "strength", true),
    ("Treadmill Run", "cardio", true),
    ("Dumbbell Curl", "strength", true),
    ("Romanian Deadlift", "strength", true),
];

/// (year, month, day), duration_minutes, notes
const WORKOUTS: [((i32, u32, u32), i64, &str); 4] = [
    ((2024, 6, 3), 60, "Upper body focus, push/pull supersets."),
    ((2024, 6, 5), 75, "Heavy lower body day. Worked up to 85% 1RM squat."),
    ((2024, 6, 7), 45, "Full body conditioning circuit. Kept rest under 60s."),
    ((2024, 6, 8), 30, "Quick cardio and core session."),
];

struct Entry {
    workout: usize,
    exercise: usize,
    reps: Option<i64>,
    sets: Option<i64>,
    duration_seconds: Option<i64>,
}

const fn sets_of(workout: usize, exercise: usize, sets: i64, reps: i64) -> Entry {
    Entry {
        workout,
        exercise,
        reps: Some(reps),
        sets: Some(sets),
        duration_seconds: None,
    }
}

/// Indexes point into [`WORKOUTS`] and [`EXERCISES`]
const WORKOUT_EXERCISES: [Entry; 13] = [
    // Upper body
    sets_of(0, 1, 4, 6),
    sets_of(0, 2, 4, 8),
    sets_of(0, 3, 3, 10),
    sets_of(0, 8, 3, 12),
    // Lower body
    sets_of(1, 0, 5, 5),
    sets_of(1, 9, 4, 8),
    sets_of(1, 5, 4, 5),
    Entry {
        workout: 1,
        exercise: 4,
        reps: None,
        sets: Some(3),
        duration_seconds: Some(60),
    },
    // Conditioning
    sets_of(2, 6, 5, 20),
    sets_of(2, 0, 3, 8),
    sets_of(2, 1, 3, 8),
    // Cardio and core
    Entry {
        workout: 3,
        exercise: 7,
        reps: None,
        sets: None,
        duration_seconds: Some(1200),
    },
    Entry {
        workout: 3,
        exercise: 4,
        reps: None,
        sets: Some(4),
        duration_seconds: Some(45),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub exercises: usize,
    pub workouts: usize,
    pub workout_exercises: usize,
}

/// Clears all three tables and inserts the sample data in a single transaction
#[instrument(skip(conn))]
pub fn seed_database(conn: &mut Connection) -> Result<SeedSummary, ServerError<Nothing>> {
    let tx = db::begin_write(conn)?;

    info!("Clearing existing data");
    tx.execute_batch(
        "DELETE FROM workout_exercise;
         DELETE FROM workout;
         DELETE FROM exercise;",
    )?;

    let exercises = EXERCISES
        .iter()
        .map(|&(name, category, equipment_needed)| {
            let new_exercise = NewExercise::new(name, category, equipment_needed)?;
            Ok(Exercise::create(&tx, new_exercise)?)
        })
        .collect::<Result<Vec<_>, ServerError<Nothing>>>()?;
    info!("Added {} exercises", exercises.len());

    let workouts = WORKOUTS
        .iter()
        .map(|&((year, month, day), duration_minutes, notes)| {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| other_error!("Invalid seed date {year}-{month}-{day}"))?;
            let new_workout = NewWorkout::new(date, duration_minutes, Some(notes.to_owned()))?;
            Ok(Workout::create(&tx, new_workout)?)
        })
        .collect::<Result<Vec<_>, ServerError<Nothing>>>()?;
    info!("Added {} workouts", workouts.len());

    let entries = WORKOUT_EXERCISES
        .iter()
        .map(|entry| {
            let new_entry = NewWorkoutExercise::new(
                workouts[entry.workout].id,
                exercises[entry.exercise].id,
                entry.reps,
                entry.sets,
                entry.duration_seconds,
            )?;
            Ok(WorkoutExercise::create(&tx, new_entry)?)
        })
        .collect::<Result<Vec<_>, ServerError<Nothing>>>()?;
    info!("Added {} workout-exercise entries", entries.len());

    log_relationships(&tx, &workouts[0], &exercises[0])?;

    tx.commit()?;

    Ok(SeedSummary {
        exercises: exercises.len(),
        workouts: workouts.len(),
        workout_exercises: entries.len(),
    })
}

fn log_relationships(
    conn: &Connection,
    workout: &Workout,
    exercise: &Exercise,
) -> Result<(), ServerError<Nothing>> {
    if let Some(full) = Workout::fetch_full(conn, workout.id)? {
        let names: Vec<&str> = full
            .workout_exercises
            .iter()
            .map(|entry| entry.exercise.name.as_str())
            .collect();
        info!(id = full.id, date = %full.date, ?names, "Exercises in workout");
    }

    if let Some(full) = Exercise::fetch_full(conn, exercise.id)? {
        info!(
            id = full.id,
            name = %full.name,
            "Appears in {} workout(s)",
            full.workouts.len()
        );
    }

    Ok(())
}
