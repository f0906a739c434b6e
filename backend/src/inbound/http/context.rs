//! Per-request view context: the resolved locale, its catalog and the path
//! being rendered.

use std::sync::Arc;

use actix_web::HttpRequest;

use crate::domain::ports::Catalogs;
use crate::domain::{ApiResult, Error, Locale, Messages, UserMessage};

/// Locale-bound rendering context.
#[derive(Debug, Clone)]
pub struct ViewContext {
    locale: Locale,
    messages: Arc<Messages>,
    path: String,
}

impl ViewContext {
    /// Resolve the `{locale}` path segment.
    ///
    /// # Errors
    /// Not-found for an unsupported locale or one whose catalog failed to
    /// load.
    pub fn resolve(catalogs: &Catalogs, code: &str, req: &HttpRequest) -> ApiResult<Self> {
        let locale: Locale = code
            .parse()
            .map_err(|err: crate::domain::LocaleError| Error::not_found(err.to_string()))?;
        let messages = catalogs
            .get(locale)
            .ok_or_else(|| Error::not_found(format!("locale `{locale}` is unavailable")))?;
        let path = req.uri().path_and_query().map_or_else(
            || req.path().to_owned(),
            |full| full.as_str().to_owned(),
        );
        Ok(Self {
            locale,
            messages,
            path,
        })
    }

    /// Build directly, for rendering outside a request.
    #[must_use]
    pub fn new(locale: Locale, messages: Arc<Messages>, path: impl Into<String>) -> Self {
        Self {
            locale,
            messages,
            path: path.into(),
        }
    }

    /// The same locale and catalog rendered as `path`.
    #[must_use]
    pub fn at(&self, path: impl Into<String>) -> Self {
        Self::new(self.locale, Arc::clone(&self.messages), path)
    }

    /// Locale of the view.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Catalog of the view.
    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Requested path including the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Translate `key`.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.messages.t(key)
    }

    /// Translate a failure message.
    #[must_use]
    pub fn message(&self, message: UserMessage) -> String {
        self.messages.t(message.key())
    }
}
