use sqlx::error::ErrorKind;

use crate::error::{Constraint, StorageError};

pub mod event;
pub mod house;
pub mod result;

/// Turns a driver-level constraint failure into a [`StorageError::ConstraintViolation`]
/// naming the breached constraint. Other errors pass through.
pub(crate) fn constraint_error(
    e: sqlx::Error,
    classify: impl FnOnce(ErrorKind) -> Option<Constraint>,
) -> StorageError {
    if let sqlx::Error::Database(ref db_err) = e
        && let Some(constraint) = classify(db_err.kind())
    {
        return StorageError::ConstraintViolation(constraint);
    }
    StorageError::from(e)
}

/// Trims user supplied optional text, treating blank input as absent.
pub(crate) fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
