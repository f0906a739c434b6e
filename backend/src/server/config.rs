//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use user_admin::domain::TableSettings;
use user_admin::domain::ports::{Catalogs, FixtureUsersGateway, UsersGateway};
use user_admin::outbound::catalog::DirCatalogSource;
use user_admin::outbound::dummyjson::{DummyJsonUsersGateway, UsersEndpoints};
use user_admin::settings::AdminSettings;

/// Everything the server needs, resolved from [`AdminSettings`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UsersGateway>,
    pub(crate) catalogs: Arc<Catalogs>,
    pub(crate) table: TableSettings,
}

impl ServerConfig {
    /// Resolve the gateway and catalogs named by `settings`.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the upstream base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn from_settings(settings: &AdminSettings) -> io::Result<Self> {
        let users = build_gateway(settings)?;
        let source = DirCatalogSource::new(settings.messages_dir());
        let catalogs = Catalogs::load_all(&source);
        if catalogs.is_empty() {
            warn!(dir = %source.dir().display(), "no message catalogs loaded");
        }
        Ok(Self {
            bind_addr: settings.bind_addr(),
            users,
            catalogs: Arc::new(catalogs),
            table: settings.table(),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

fn build_gateway(settings: &AdminSettings) -> io::Result<Arc<dyn UsersGateway>> {
    if settings.fixture_mode {
        info!("serving the in-memory users fixture");
        return Ok(Arc::new(FixtureUsersGateway::seeded()));
    }
    let base = settings.upstream_base_url();
    let endpoints = UsersEndpoints::parse(base).map_err(io::Error::other)?;
    let gateway = DummyJsonUsersGateway::new(endpoints, settings.request_timeout())
        .map_err(|err| io::Error::other(format!("failed to build users API client: {err}")))?;
    info!(upstream = base, "using upstream users API");
    Ok(Arc::new(gateway))
}
