use rusqlite::{ffi, ErrorCode};
use thiserror::Error;

use super::ModelValidationError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Invalid(#[from] ModelValidationError),
    #[error("Unique constraint failed: {0}")]
    Duplicate(rusqlite::Error),
    #[error(transparent)]
    Database(rusqlite::Error),
}

impl From<rusqlite::Error> for ModelError {
    fn from(err: rusqlite::Error) -> Self {
        if is_unique_violation(&err) {
            Self::Duplicate(err)
        } else {
            Self::Database(err)
        }
    }
}

/// True when sqlite refused a write because of a UNIQUE or PRIMARY KEY constraint
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        },
        _ => false,
    }
}

/// Ids bound into a single `IN (...)` list. Well under sqlite's limit on host parameters
pub const MAX_IDS_PER_QUERY: usize = 500;

/// Runs `query` once per batch of `ids` and concatenates the rows. Order across
/// batches is whatever the batches return, so callers sort afterwards
pub fn fetch_in_batches<T>(
    ids: &[i64],
    mut query: impl FnMut(&[i64]) -> Result<Vec<T>, rusqlite::Error>,
) -> Result<Vec<T>, rusqlite::Error> {
    let mut res = Vec::new();
    for batch in ids.chunks(MAX_IDS_PER_QUERY) {
        res.extend(query(batch)?);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    #[test]
    fn test_ids_are_fetched_in_bounded_batches() {
        let ids: Vec<i64> = (0..1_201).collect();
        let mut batch_sizes = Vec::new();
        let res = fetch_in_batches(&ids, |batch| {
            batch_sizes.push(batch.len());
            Ok(batch.to_vec())
        })
        .unwrap();

        assert_eq!(batch_sizes, [500, 500, 201]);
        assert_eq!(res, ids);

        let res = fetch_in_batches(&[], |_| -> Result<Vec<i64>, _> { unreachable!() }).unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn test_unique_violation_is_classified_as_duplicate() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err = conn.execute("INSERT INTO t VALUES ('a')", ()).unwrap_err();
        assert!(is_unique_violation(&err));
        assert!(matches!(ModelError::from(err), ModelError::Duplicate(_)));

        let err = conn.execute("INSERT INTO t VALUES (NULL)", ()).unwrap_err();
        assert!(!is_unique_violation(&err));
        assert!(matches!(ModelError::from(err), ModelError::Database(_)));
    }
}
