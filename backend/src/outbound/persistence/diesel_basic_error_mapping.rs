//! Shared mapping from pool and Diesel failures to repository port errors.

use tracing::debug;

use crate::domain::ports::{
    CheckinRepositoryError, HunterRepositoryError, QuestRepositoryError, StoreDiagnosticsError,
    WorkoutRepositoryError,
};

use super::models::RowConversionError;
use super::pool::PoolError;

/// Port error enums that distinguish connection and query failures.
pub(crate) trait StoreError: Sized {
    fn connection_failure(message: String) -> Self;
    fn query_failure(message: String) -> Self;
}

macro_rules! impl_store_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl StoreError for $error {
                fn connection_failure(message: String) -> Self {
                    Self::connection(message)
                }

                fn query_failure(message: String) -> Self {
                    Self::query(message)
                }
            }
        )*
    };
}

impl_store_error!(
    HunterRepositoryError,
    WorkoutRepositoryError,
    QuestRepositoryError,
    CheckinRepositoryError,
    StoreDiagnosticsError,
);

/// Pool checkout and build failures mean the database is unreachable.
pub(crate) fn map_pool_error<E: StoreError>(error: PoolError) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    E::connection_failure(message)
}

/// Map Diesel errors, logging details that are redacted from callers.
pub(crate) fn map_diesel_error<E: StoreError>(error: diesel::result::Error) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => E::query_failure("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query_failure("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::DatabaseError(DatabaseErrorKind::UnableToSendCommand, _) => {
            E::connection_failure("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            E::query_failure("unique constraint violated".to_owned())
        }
        _ => E::query_failure("database error".to_owned()),
    }
}

pub(crate) fn map_row_error<E: StoreError>(error: RowConversionError) -> E {
    E::query_failure(error.to_string())
}
