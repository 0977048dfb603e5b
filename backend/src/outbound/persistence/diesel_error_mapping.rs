//! Shared mapping from pool and Diesel failures to port errors.

use tracing::debug;

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

/// Map pool errors to port-level connection failures.
pub(super) fn map_pool_error(error: PoolError) -> PersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to port-level failures. Constraint violations (unique
/// indexes, foreign keys) land here as query errors: the application layer
/// validated what it could and the rest is the datastore's verdict.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => PersistenceError::query(info.message().to_owned()),
        DieselError::NotFound => PersistenceError::query("record not found"),
        other => PersistenceError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, PersistenceError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(err, PersistenceError::query("record not found"));
    }

    #[rstest]
    fn rollback_maps_to_query() {
        let err = map_diesel_error(diesel::result::Error::RollbackTransaction);
        assert!(matches!(err, PersistenceError::Query { .. }));
    }
}
