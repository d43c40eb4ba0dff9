//! Port for check-in audit records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CheckinRecord, NewCheckin};

use super::define_port_error;

define_port_error! {
    /// Errors raised by check-in repository adapters.
    pub enum CheckinRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "checkin repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "checkin repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinRepository: Send + Sync {
    /// Append a check-in record.
    async fn insert(
        &self,
        checkin: &NewCheckin,
        now: DateTime<Utc>,
    ) -> Result<CheckinRecord, CheckinRepositoryError>;
}
