//! HTTP inbound adapter serving the server-rendered console.

pub mod cache_control;
pub mod context;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;
pub mod users;

pub use error::ApiResult;
