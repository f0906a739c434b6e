//! Driven port for the upstream users REST API.
//!
//! The domain owns the page shape and the error taxonomy; adapters own URLs
//! and transport. Exactly one attempt is made per call.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::UserId;
use crate::domain::transform::{RawUser, UserPayload};

/// One page of the list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct UsersPage {
    /// Records in upstream order.
    pub users: Vec<RawUser>,
    /// Total records upstream.
    pub total: u64,
    /// Offset echoed by the API.
    pub skip: u64,
    /// Page size echoed by the API.
    pub limit: u32,
}

define_port_error! {
    /// Failures of a users API call.
    pub enum UsersGatewayError {
        /// The request never got a response.
        Transport { message: String } =>
            "users API transport failed: {message}",
        /// The API answered with a non-2xx status.
        Status { status: u16, status_text: String } =>
            "API request failed: {status} {status_text}",
        /// The body was not the expected JSON.
        Decode { message: String } =>
            "users API response decode failed: {message}",
        /// The body decoded but lacks required fields.
        InvalidShape { message: String } =>
            "invalid response format: {message}",
        /// The request body could not be encoded.
        Encode { message: String } =>
            "users API request encode failed: {message}",
    }
}

impl UsersGatewayError {
    /// Whether a single-entity fetch should route to not-found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. } | Self::InvalidShape { .. })
    }
}

/// Port for reading and mutating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersGateway: Send + Sync {
    /// Fetch `limit` users after skipping `skip`.
    async fn list(&self, limit: u32, skip: u64) -> Result<UsersPage, UsersGatewayError>;

    /// Fetch one user.
    async fn get(&self, id: UserId) -> Result<RawUser, UsersGatewayError>;

    /// Create a user. The API may not persist it; the assigned id is
    /// returned when the response carries one.
    async fn create(&self, payload: &UserPayload) -> Result<Option<UserId>, UsersGatewayError>;

    /// Replace fields of a user.
    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<(), UsersGatewayError>;

    /// Delete a user.
    async fn delete(&self, id: UserId) -> Result<(), UsersGatewayError>;
}
