use serde::{Deserialize, Serialize};

use crate::model::{
    constants::EXERCISE_NAME_MAX_LENGTH, Category, ModelValidationError, ValidateModel,
};

#[cfg(feature = "backend")]
use {
    crate::{
        api::payloads::{ExerciseFull, WorkoutBrief},
        model::{fetch_in_batches, ModelError, Workout, WorkoutExercise},
    },
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::collections::HashMap,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub equipment_needed: bool,
}

/// An exercise that hasn't been stored yet. Only constructible through
/// [`NewExercise::new`] so the name is always trimmed and checked
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct NewExercise {
    name: String,
    category: Category,
    equipment_needed: bool,
}

impl NewExercise {
    pub fn new<N: AsRef<str>, C: AsRef<str>>(
        name: N,
        category: C,
        equipment_needed: bool,
    ) -> Result<Self, ModelValidationError> {
        let new_exercise = Self {
            name: validate_exercise_name(name.as_ref())?,
            category: category.as_ref().parse()?,
            equipment_needed,
        };
        Ok(new_exercise)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn equipment_needed(&self) -> bool {
        self.equipment_needed
    }
}

/// Returns the trimmed name
pub fn validate_exercise_name(value: &str) -> Result<String, ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::new("Exercise name cannot be empty."));
    }
    if value.chars().count() > EXERCISE_NAME_MAX_LENGTH {
        return Err(ModelValidationError::new(format!(
            "Exercise name cannot exceed {EXERCISE_NAME_MAX_LENGTH} characters."
        )));
    }
    Ok(value.trim().to_owned())
}

impl ValidateModel for NewExercise {
    fn validate(&self) -> Result<(), ModelValidationError> {
        validate_exercise_name(&self.name)?;
        Ok(())
    }
}

#[cfg(feature = "backend")]
impl Exercise {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::Name,
                ExerciseIden::Category,
                ExerciseIden::EquipmentNeeded,
            ])
            .from(ExerciseIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt.query_row(&*values.as_params(), Exercise::from_row).optional()?;
        Ok(exercise)
    }

    /// Ordered by name
    pub fn fetch_all(conn: &Connection) -> Result<Vec<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .order_by(ExerciseIden::Name, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }

    /// Unordered
    pub fn fetch_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<Exercise>, rusqlite::Error> {
        fetch_in_batches(ids, |batch| {
            let (sql, values) = Self::select_star()
                .and_where(Expr::col(ExerciseIden::Id).is_in(batch.iter().copied()))
                .build_rusqlite(SqliteQueryBuilder);

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(&*values.as_params(), Exercise::from_row)?
                .collect::<Result<_, _>>()?;
            Ok(rows)
        })
    }

    /// A duplicate name comes back as [`ModelError::Duplicate`]
    pub fn create(conn: &Connection, new_exercise: NewExercise) -> Result<Exercise, ModelError> {
        new_exercise.validate()?;
        new_exercise.insert(conn)?;

        let id = conn.last_insert_rowid();
        let exercise = Self::fetch_by_id(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        Ok(exercise)
    }

    /// Removes the exercise along with every workout entry that references it.
    /// Returns the deleted exercise, or `None` if there was nothing to delete
    pub fn delete(conn: &Connection, id: i64) -> Result<Option<Exercise>, ModelError> {
        let Some(exercise) = Self::fetch_by_id(conn, id)? else {
            return Ok(None);
        };

        WorkoutExercise::delete_for_exercise(conn, id)?;

        let (sql, values) = Query::delete()
            .from_table(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(Some(exercise))
    }

    pub fn fetch_full(conn: &Connection, id: i64) -> Result<Option<ExerciseFull>, rusqlite::Error> {
        let Some(exercise) = Self::fetch_by_id(conn, id)? else {
            return Ok(None);
        };
        Ok(Self::with_workouts(conn, vec![exercise])?.pop())
    }

    pub fn fetch_all_full(conn: &Connection) -> Result<Vec<ExerciseFull>, rusqlite::Error> {
        let exercises = Self::fetch_all(conn)?;
        Self::with_workouts(conn, exercises)
    }

    /// Attaches the brief form of every workout each exercise appears in
    pub fn with_workouts(
        conn: &Connection,
        exercises: Vec<Exercise>,
    ) -> Result<Vec<ExerciseFull>, rusqlite::Error> {
        let exercise_ids: Vec<i64> = exercises.iter().map(|e| e.id).collect();
        let entries = WorkoutExercise::fetch_for_exercises(conn, &exercise_ids)?;

        let mut workout_ids: Vec<i64> = entries.iter().map(|e| e.workout_id).collect();
        workout_ids.sort_unstable();
        workout_ids.dedup();
        let workouts_by_id: HashMap<i64, Workout> = Workout::fetch_by_ids(conn, &workout_ids)?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();

        let mut workouts_by_exercise: HashMap<i64, Vec<WorkoutBrief>> = HashMap::new();
        for entry in &entries {
            if let Some(workout) = workouts_by_id.get(&entry.workout_id) {
                workouts_by_exercise
                    .entry(entry.exercise_id)
                    .or_default()
                    .push(WorkoutBrief::from(workout));
            }
        }

        let res = exercises
            .into_iter()
            .map(|exercise| {
                let workouts = workouts_by_exercise.remove(&exercise.id).unwrap_or_default();
                ExerciseFull::new(&exercise, workouts)
            })
            .collect();
        Ok(res)
    }
}
