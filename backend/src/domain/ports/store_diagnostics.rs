//! Port for probing the backing store from the diagnostics endpoint.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while probing the store.
    pub enum StoreDiagnosticsError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "store connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreDiagnostics: Send + Sync {
    /// Names of the collections (tables) in the store, sorted, at most `limit`.
    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreDiagnosticsError>;
}
