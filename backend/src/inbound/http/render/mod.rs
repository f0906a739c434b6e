//! Server-rendered HTML views.
//!
//! Plain `format!` composition over escaped values. Every user-visible
//! string is resolved through the request's [`ViewContext`].
//!
//! [`ViewContext`]: crate::inbound::http::context::ViewContext

pub mod form_field;
pub mod html;
pub mod layout;
pub mod pages;
pub mod pagination;
pub mod table;

use ::pagination::PageNumber;
use url::form_urlencoded;

use crate::domain::{Locale, UserId};

/// List URL carrying the page, search query and quick-edit target.
pub(crate) fn list_href(
    locale: Locale,
    page: PageNumber,
    query: &str,
    edit: Option<UserId>,
) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    if page != PageNumber::FIRST {
        params.append_pair("page", &page.to_string());
    }
    if !query.is_empty() {
        params.append_pair("q", query);
    }
    if let Some(id) = edit {
        params.append_pair("edit", &id.to_string());
    }
    let encoded = params.finish();
    if encoded.is_empty() {
        format!("/{locale}")
    } else {
        format!("/{locale}?{encoded}")
    }
}
