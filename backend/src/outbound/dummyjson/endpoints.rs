//! URL construction for the users API.

use thiserror::Error;
use url::Url;

use crate::domain::UserId;

/// Public sandbox the console targets by default.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Fields requested by the list endpoint.
pub const LIST_SELECT: &str = "firstName,lastName,bank,id,image,gender";

/// Rejected base URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// Not a URL.
    #[error("invalid users API base URL: {0}")]
    Parse(#[from] url::ParseError),
    /// A URL that cannot take path segments, such as `mailto:`.
    #[error("users API base URL `{0}` cannot carry a path")]
    NotABase(String),
}

/// Builds every users API URL from one base.
///
/// # Examples
/// ```
/// use user_admin::outbound::dummyjson::UsersEndpoints;
///
/// let endpoints = UsersEndpoints::parse("https://dummyjson.com").expect("base");
/// assert_eq!(
///     endpoints.list(10, 20).as_str(),
///     "https://dummyjson.com/users?limit=10&skip=20&select=firstName%2ClastName%2Cbank%2Cid%2Cimage%2Cgender"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersEndpoints {
    base: Url,
}

impl UsersEndpoints {
    /// Use `base` as the API root.
    ///
    /// # Errors
    /// [`EndpointError::NotABase`] when `base` cannot carry a path.
    pub fn new(base: Url) -> Result<Self, EndpointError> {
        if base.cannot_be_a_base() {
            return Err(EndpointError::NotABase(base.to_string()));
        }
        Ok(Self { base })
    }

    /// Parse and validate a base URL.
    ///
    /// # Errors
    /// See [`EndpointError`].
    pub fn parse(base: &str) -> Result<Self, EndpointError> {
        Self::new(Url::parse(base)?)
    }

    /// `GET /users?limit&skip&select`.
    #[must_use]
    pub fn list(&self, limit: u32, skip: u64) -> Url {
        let mut url = self.users(&[]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string())
            .append_pair("select", LIST_SELECT);
        url
    }

    /// `GET|PUT|DELETE /users/{id}`.
    #[must_use]
    pub fn user(&self, id: UserId) -> Url {
        self.users(&[&id.to_string()])
    }

    /// `POST /users/add`.
    #[must_use]
    pub fn add(&self) -> Url {
        self.users(&["add"])
    }

    fn users(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("users").extend(segments);
        }
        url
    }
}
