//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use hunter_backend::domain::StoreStatus;
use hunter_backend::outbound::store::StorePorts;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StorePorts,
    pub(crate) store_status: StoreStatus,
}

impl ServerConfig {
    /// Construct a server configuration serving the selected store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: StorePorts, store_status: StoreStatus) -> Self {
        Self {
            bind_addr,
            store,
            store_status,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
