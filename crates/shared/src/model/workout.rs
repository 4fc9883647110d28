use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    constants::{WORKOUT_DURATION_MAX, WORKOUT_DURATION_MIN},
    ModelValidationError, ValidateModel,
};

#[cfg(feature = "backend")]
use {
    crate::{
        api::payloads::{ExerciseBrief, WorkoutExerciseFull, WorkoutFull},
        model::{fetch_in_batches, Exercise, ModelError, WorkoutExercise},
    },
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::collections::HashMap,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Workout {
    pub id: i64,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
pub struct NewWorkout {
    date: NaiveDate,
    duration_minutes: i64,
    notes: Option<String>,
}

impl NewWorkout {
    pub fn new(
        date: NaiveDate,
        duration_minutes: i64,
        notes: Option<String>,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self {
            date,
            duration_minutes: validate_workout_duration(duration_minutes)?,
            notes,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

pub fn validate_workout_duration(minutes: i64) -> Result<i64, ModelValidationError> {
    if minutes < WORKOUT_DURATION_MIN {
        return Err(ModelValidationError::new(
            "Duration must be a positive integer (in minutes).",
        ));
    }
    if minutes > WORKOUT_DURATION_MAX {
        return Err(ModelValidationError::new(format!(
            "Duration cannot exceed {WORKOUT_DURATION_MAX} minutes (8 hours)."
        )));
    }
    Ok(minutes)
}

impl ValidateModel for NewWorkout {
    fn validate(&self) -> Result<(), ModelValidationError> {
        validate_workout_duration(self.duration_minutes)?;
        Ok(())
    }
}

#[cfg(feature = "backend")]
impl Workout {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                WorkoutIden::Id,
                WorkoutIden::Date,
                WorkoutIden::DurationMinutes,
                WorkoutIden::Notes,
            ])
            .from(WorkoutIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<Workout>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(WorkoutIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workout = stmt.query_row(&*values.as_params(), Workout::from_row).optional()?;
        Ok(workout)
    }

    /// Most recent first. Workouts on the same day keep their insertion order
    pub fn fetch_all(conn: &Connection) -> Result<Vec<Workout>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .order_by(WorkoutIden::Date, Order::Desc)
            .order_by(WorkoutIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), Workout::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }

    /// Ordered by id
    pub fn fetch_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<Workout>, rusqlite::Error> {
        let mut res = fetch_in_batches(ids, |batch| {
            let (sql, values) = Self::select_star()
                .and_where(Expr::col(WorkoutIden::Id).is_in(batch.iter().copied()))
                .build_rusqlite(SqliteQueryBuilder);

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(&*values.as_params(), Workout::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;
        res.sort_unstable_by_key(|workout| workout.id);
        Ok(res)
    }

    pub fn create(conn: &Connection, new_workout: NewWorkout) -> Result<Workout, ModelError> {
        new_workout.validate()?;
        new_workout.insert(conn)?;

        let id = conn.last_insert_rowid();
        let workout = Self::fetch_by_id(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        Ok(workout)
    }

    /// Removes the workout and its entries. `None` if it didn't exist
    pub fn delete(conn: &Connection, id: i64) -> Result<Option<Workout>, ModelError> {
        let Some(workout) = Self::fetch_by_id(conn, id)? else {
            return Ok(None);
        };

        WorkoutExercise::delete_for_workout(conn, id)?;

        let (sql, values) = Query::delete()
            .from_table(WorkoutIden::Table)
            .and_where(Expr::col(WorkoutIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(Some(workout))
    }

    pub fn fetch_full(conn: &Connection, id: i64) -> Result<Option<WorkoutFull>, rusqlite::Error> {
        let Some(workout) = Self::fetch_by_id(conn, id)? else {
            return Ok(None);
        };
        Ok(Self::with_entries(conn, vec![workout])?.pop())
    }

    pub fn fetch_all_full(conn: &Connection) -> Result<Vec<WorkoutFull>, rusqlite::Error> {
        let workouts = Self::fetch_all(conn)?;
        Self::with_entries(conn, workouts)
    }

    /// Nests each workout's entries, each with the brief form of its exercise
    pub fn with_entries(
        conn: &Connection,
        workouts: Vec<Workout>,
    ) -> Result<Vec<WorkoutFull>, rusqlite::Error> {
        let workout_ids: Vec<i64> = workouts.iter().map(|w| w.id).collect();
        let entries = WorkoutExercise::fetch_for_workouts(conn, &workout_ids)?;

        let mut exercise_ids: Vec<i64> = entries.iter().map(|e| e.exercise_id).collect();
        exercise_ids.sort_unstable();
        exercise_ids.dedup();
        let exercises_by_id: HashMap<i64, ExerciseBrief> = Exercise::fetch_by_ids(conn, &exercise_ids)?
            .iter()
            .map(|e| (e.id, ExerciseBrief::from(e)))
            .collect();

        let mut entries_by_workout: HashMap<i64, Vec<WorkoutExerciseFull>> = HashMap::new();
        for entry in &entries {
            if let Some(exercise) = exercises_by_id.get(&entry.exercise_id) {
                entries_by_workout
                    .entry(entry.workout_id)
                    .or_default()
                    .push(WorkoutExerciseFull::new(entry, exercise.clone()));
            }
        }

        let res = workouts
            .into_iter()
            .map(|workout| {
                let workout_exercises = entries_by_workout.remove(&workout.id).unwrap_or_default();
                WorkoutFull::new(&workout, workout_exercises)
            })
            .collect();
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_duration_bounds() {
        assert!(NewWorkout::new(date(), 1, None).is_ok());
        assert!(NewWorkout::new(date(), 480, None).is_ok());
        assert_eq!(
            NewWorkout::new(date(), 0, None).unwrap_err().message,
            "Duration must be a positive integer (in minutes)."
        );
        assert_eq!(
            NewWorkout::new(date(), 481, None).unwrap_err().message,
            "Duration cannot exceed 480 minutes (8 hours)."
        );
    }

    #[test]
    fn test_notes_are_kept_verbatim() {
        let new_workout = NewWorkout::new(date(), 45, Some(" Leg day ".into())).unwrap();
        assert_eq!(new_workout.notes(), Some(" Leg day "));
        assert_eq!(new_workout.date(), date());
        assert_eq!(new_workout.duration_minutes(), 45);
    }
}
