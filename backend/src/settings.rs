//! Console configuration loaded via OrthoConfig.
//!
//! Every value can come from the command line, a config file or the
//! `USER_ADMIN_*` environment. Unset values fall back to the defaults below.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{DEFAULT_PAGE_CAP, DEFAULT_PAGE_SIZE};
use serde::Deserialize;

use crate::domain::TableSettings;
use crate::outbound::dummyjson::DEFAULT_BASE_URL;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

fn default_messages_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("messages")
}

/// Settings for the admin console process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_ADMIN")]
pub struct AdminSettings {
    /// Address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Root URL of the upstream users API.
    pub upstream_base_url: Option<String>,
    /// Timeout applied to each upstream call, in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Users per table page.
    pub page_size: Option<u32>,
    /// Cap on navigable table pages.
    pub max_pages: Option<u32>,
    /// Directory holding `<locale>.json` message catalogs.
    pub messages_dir: Option<PathBuf>,
    /// Serve the in-memory fixture instead of calling upstream.
    #[ortho_config(default = false)]
    pub fixture_mode: bool,
}

impl AdminSettings {
    /// Bind address, defaulting to `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Upstream API root.
    #[must_use]
    pub fn upstream_base_url(&self) -> &str {
        self.upstream_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Per-call upstream timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Page size and navigation cap for the users table.
    #[must_use]
    pub fn table(&self) -> TableSettings {
        TableSettings::new(
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.max_pages.unwrap_or(DEFAULT_PAGE_CAP),
        )
    }

    /// Catalog directory, defaulting to the crate's `messages/`.
    #[must_use]
    pub fn messages_dir(&self) -> PathBuf {
        self.messages_dir
            .clone()
            .unwrap_or_else(default_messages_dir)
    }
}
