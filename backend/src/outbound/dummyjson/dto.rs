//! Response decoding for the users API.
//!
//! Bodies are decoded to `serde_json::Value` first so a structurally valid
//! response missing required fields reports `InvalidShape` rather than a
//! generic decode error.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::UserId;
use crate::domain::ports::{UsersGatewayError, UsersPage};
use crate::domain::transform::RawUser;

#[derive(Debug, Deserialize)]
struct UsersPageDto {
    users: Option<Vec<Value>>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    skip: u64,
    #[serde(default)]
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct CreatedUserDto {
    id: Option<u64>,
}

pub(super) fn parse_users_page(body: &[u8]) -> Result<UsersPage, UsersGatewayError> {
    let dto: UsersPageDto = serde_json::from_slice(body)
        .map_err(|err| UsersGatewayError::decode(format!("invalid users page JSON: {err}")))?;
    let users = dto
        .users
        .ok_or_else(|| UsersGatewayError::invalid_shape("users array is missing"))?
        .into_iter()
        .map(decode_user)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(UsersPage {
        users,
        total: dto.total,
        skip: dto.skip,
        limit: dto.limit,
    })
}

pub(super) fn parse_user(body: &[u8]) -> Result<RawUser, UsersGatewayError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| UsersGatewayError::decode(format!("invalid user JSON: {err}")))?;
    decode_user(value)
}

/// The id of a created user, when the response carries one.
pub(super) fn parse_created_id(body: &[u8]) -> Option<UserId> {
    serde_json::from_slice::<CreatedUserDto>(body)
        .ok()
        .and_then(|dto| dto.id)
        .map(UserId::new)
}

fn decode_user(value: Value) -> Result<RawUser, UsersGatewayError> {
    if value.get("id").is_none_or(Value::is_null) {
        return Err(UsersGatewayError::invalid_shape("user data is missing an id"));
    }
    serde_json::from_value(value)
        .map_err(|err| UsersGatewayError::decode(format!("invalid user record: {err}")))
}
