//! User admin console library.
//!
//! Hexagonal layout:
//! - `domain`: user read/write models, transforms, controllers and ports.
//! - `inbound::http`: actix-web handlers rendering localized HTML views.
//! - `outbound`: adapters for the upstream users API and message catalogs.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use domain::TraceId;
pub use middleware::Trace;
