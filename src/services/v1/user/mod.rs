pub mod delete;
pub mod show;
pub mod store;
pub mod update;

use crate::prelude::*;

/// True when `error` is the unique index on `users.email` rejecting a write
pub(crate) fn is_duplicate_email(error: &DbErr) -> bool {
    matches!(error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
