//! Users API adapter.
//!
//! Implements the `UsersGateway` port against a DummyJSON-compatible REST
//! API: `GET /users`, `GET|PUT|DELETE /users/{id}`, `POST /users/add`.

mod dto;
mod endpoints;
mod http_gateway;

pub use endpoints::{DEFAULT_BASE_URL, EndpointError, LIST_SELECT, UsersEndpoints};
pub use http_gateway::DummyJsonUsersGateway;
