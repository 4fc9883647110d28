use serde::{Deserialize, Serialize};

use crate::model::{validate_positive, ModelValidationError, ValidateModel};

#[cfg(feature = "backend")]
use {
    crate::model::{fetch_in_batches, ModelError},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

const REPS_MESSAGE: &str = "Reps must be a positive integer.";
const SETS_MESSAGE: &str = "Sets must be a positive integer.";
const DURATION_MESSAGE: &str = "Duration must be a positive number of seconds.";

/// One exercise performed as part of a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_exercise"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub reps: Option<i64>,
    pub sets: Option<i64>,
    pub duration_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_exercise"))]
pub struct NewWorkoutExercise {
    workout_id: i64,
    exercise_id: i64,
    reps: Option<i64>,
    sets: Option<i64>,
    duration_seconds: Option<i64>,
}

impl NewWorkoutExercise {
    pub fn new(
        workout_id: i64,
        exercise_id: i64,
        reps: Option<i64>,
        sets: Option<i64>,
        duration_seconds: Option<i64>,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self {
            workout_id,
            exercise_id,
            reps: validate_positive(reps, REPS_MESSAGE)?,
            sets: validate_positive(sets, SETS_MESSAGE)?,
            duration_seconds: validate_positive(duration_seconds, DURATION_MESSAGE)?,
        })
    }

    pub fn workout_id(&self) -> i64 {
        self.workout_id
    }

    pub fn exercise_id(&self) -> i64 {
        self.exercise_id
    }

    pub fn reps(&self) -> Option<i64> {
        self.reps
    }

    pub fn sets(&self) -> Option<i64> {
        self.sets
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.duration_seconds
    }
}

impl ValidateModel for NewWorkoutExercise {
    fn validate(&self) -> Result<(), ModelValidationError> {
        validate_positive(self.reps, REPS_MESSAGE)?;
        validate_positive(self.sets, SETS_MESSAGE)?;
        validate_positive(self.duration_seconds, DURATION_MESSAGE)?;
        Ok(())
    }
}

#[cfg(feature = "backend")]
impl WorkoutExercise {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                WorkoutExerciseIden::Id,
                WorkoutExerciseIden::WorkoutId,
                WorkoutExerciseIden::ExerciseId,
                WorkoutExerciseIden::Reps,
                WorkoutExerciseIden::Sets,
                WorkoutExerciseIden::DurationSeconds,
            ])
            .from(WorkoutExerciseIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<WorkoutExercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(WorkoutExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let entry = stmt
            .query_row(&*values.as_params(), WorkoutExercise::from_row)
            .optional()?;
        Ok(entry)
    }

    fn fetch_where_in(
        conn: &Connection,
        column: WorkoutExerciseIden,
        ids: &[i64],
    ) -> Result<Vec<WorkoutExercise>, rusqlite::Error> {
        fetch_in_batches(ids, |batch| {
            let (sql, values) = Self::select_star()
                .and_where(Expr::col(column.clone()).is_in(batch.iter().copied()))
                .build_rusqlite(SqliteQueryBuilder);

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(&*values.as_params(), WorkoutExercise::from_row)?
                .collect::<Result<_, _>>()?;
            Ok(rows)
        })
    }

    /// Entries of the given workouts in insertion order
    pub fn fetch_for_workouts(
        conn: &Connection,
        workout_ids: &[i64],
    ) -> Result<Vec<WorkoutExercise>, rusqlite::Error> {
        let mut res = Self::fetch_where_in(conn, WorkoutExerciseIden::WorkoutId, workout_ids)?;
        res.sort_unstable_by_key(|entry| entry.id);
        Ok(res)
    }

    /// Entries referencing the given exercises, ordered by workout
    pub fn fetch_for_exercises(
        conn: &Connection,
        exercise_ids: &[i64],
    ) -> Result<Vec<WorkoutExercise>, rusqlite::Error> {
        let mut res = Self::fetch_where_in(conn, WorkoutExerciseIden::ExerciseId, exercise_ids)?;
        res.sort_unstable_by_key(|entry| (entry.workout_id, entry.id));
        Ok(res)
    }

    /// Inserting the same exercise into a workout twice is a [`ModelError::Duplicate`]
    pub fn create(
        conn: &Connection,
        new_entry: NewWorkoutExercise,
    ) -> Result<WorkoutExercise, ModelError> {
        new_entry.validate()?;
        new_entry.insert(conn)?;

        let id = conn.last_insert_rowid();
        let entry = Self::fetch_by_id(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        Ok(entry)
    }

    /// Returns the number of rows removed
    pub fn delete_for_workout(conn: &Connection, workout_id: i64) -> Result<usize, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutExerciseIden::Table)
            .and_where(Expr::col(WorkoutExerciseIden::WorkoutId).eq(workout_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }

    /// Returns the number of rows removed
    pub fn delete_for_exercise(
        conn: &Connection,
        exercise_id: i64,
    ) -> Result<usize, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutExerciseIden::Table)
            .and_where(Expr::col(WorkoutExerciseIden::ExerciseId).eq(exercise_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }
}
