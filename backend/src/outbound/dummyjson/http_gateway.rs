//! Reqwest-backed users gateway.
//!
//! Owns transport only: JSON headers, the request timeout, status mapping and
//! body decoding. One attempt per call. The in-scope trace id is forwarded
//! upstream.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};

use super::UsersEndpoints;
use super::dto::{parse_created_id, parse_user, parse_users_page};
use crate::domain::ports::{UsersGateway, UsersGatewayError, UsersPage};
use crate::domain::transform::{RawUser, UserPayload};
use crate::domain::{TRACE_ID_HEADER, TraceId, UserId};

const JSON: &str = "application/json";

/// Users gateway over HTTP.
pub struct DummyJsonUsersGateway {
    client: Client,
    endpoints: UsersEndpoints,
}

impl DummyJsonUsersGateway {
    /// Build a gateway whose calls time out after `timeout`.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoints: UsersEndpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, UsersGatewayError> {
        let mut request = request.header(ACCEPT, JSON);
        if let Some(trace_id) = TraceId::current() {
            request = request.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(body.to_vec())
    }

    fn json_body(
        request: RequestBuilder,
        payload: &UserPayload,
    ) -> Result<RequestBuilder, UsersGatewayError> {
        let body = serde_json::to_vec(payload)
            .map_err(|err| UsersGatewayError::encode(err.to_string()))?;
        Ok(request.header(CONTENT_TYPE, JSON).body(body))
    }
}

#[async_trait]
impl UsersGateway for DummyJsonUsersGateway {
    async fn list(&self, limit: u32, skip: u64) -> Result<UsersPage, UsersGatewayError> {
        let body = self
            .send(self.client.get(self.endpoints.list(limit, skip)))
            .await?;
        parse_users_page(&body)
    }

    async fn get(&self, id: UserId) -> Result<RawUser, UsersGatewayError> {
        let body = self.send(self.client.get(self.endpoints.user(id))).await?;
        parse_user(&body)
    }

    async fn create(&self, payload: &UserPayload) -> Result<Option<UserId>, UsersGatewayError> {
        let request = Self::json_body(self.client.post(self.endpoints.add()), payload)?;
        let body = self.send(request).await?;
        Ok(parse_created_id(&body))
    }

    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<(), UsersGatewayError> {
        let request = Self::json_body(self.client.put(self.endpoints.user(id)), payload)?;
        self.send(request).await.map(|_| ())
    }

    async fn delete(&self, id: UserId) -> Result<(), UsersGatewayError> {
        self.send(self.client.delete(self.endpoints.user(id)))
            .await
            .map(|_| ())
    }
}

fn map_transport_error(error: reqwest::Error) -> UsersGatewayError {
    if error.is_timeout() {
        UsersGatewayError::transport(format!("request timed out: {error}"))
    } else {
        UsersGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> UsersGatewayError {
    UsersGatewayError::status(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
    )
}
