//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend only
//! on domain ports and stay testable without I/O. Everything here is
//! immutable and shared across workers.

use std::sync::Arc;

use crate::domain::ports::{Catalogs, UsersGateway};
use crate::domain::TableSettings;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Upstream users API.
    pub users: Arc<dyn UsersGateway>,
    /// Catalogs loaded at startup.
    pub catalogs: Arc<Catalogs>,
    /// Table paging.
    pub table: TableSettings,
}

impl HttpState {
    /// Bundle the shared dependencies.
    #[must_use]
    pub fn new(users: Arc<dyn UsersGateway>, catalogs: Arc<Catalogs>, table: TableSettings) -> Self {
        Self {
            users,
            catalogs,
            table,
        }
    }
}
