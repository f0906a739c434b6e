//! Outbound adapters implementing domain ports.
//!
//! - **dummyjson**: reqwest client for the upstream users REST API.
//! - **catalog**: message catalogs read from disk or embedded at build time.
//!
//! Adapters translate between domain types and wire or file formats. They
//! hold no business logic.

pub mod catalog;
pub mod dummyjson;
