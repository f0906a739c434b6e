//! Localized message catalogs.
//!
//! A catalog is a nested JSON object; keys are addressed with dots, for
//! example `table.columns.email`. Lookups never fail: a missing key renders
//! as the key itself so a gap in a translation is visible but harmless.

use serde_json::Value;
use thiserror::Error;

use crate::domain::Locale;

/// Catalog parsing failures.
#[derive(Debug, Error)]
pub enum MessagesError {
    /// The catalog is not valid JSON.
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The catalog root is not a JSON object.
    #[error("catalog root must be a JSON object")]
    NotAnObject,
}

/// Messages for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    locale: Locale,
    tree: Value,
}

impl Messages {
    /// Wrap an already parsed catalog.
    ///
    /// # Errors
    /// [`MessagesError::NotAnObject`] when `tree` is not an object.
    pub fn new(locale: Locale, tree: Value) -> Result<Self, MessagesError> {
        if !tree.is_object() {
            return Err(MessagesError::NotAnObject);
        }
        Ok(Self { locale, tree })
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    /// Fails on invalid JSON or a non-object root.
    pub fn from_json(locale: Locale, text: &str) -> Result<Self, MessagesError> {
        Self::new(locale, serde_json::from_str(text)?)
    }

    /// Locale the catalog belongs to.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translate `key`, falling back to the key itself.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use user_admin::domain::{Locale, Messages};
    ///
    /// let messages = Messages::new(Locale::En, json!({"form": {"save": "Save"}})).expect("object");
    /// assert_eq!(messages.t("form.save"), "Save");
    /// assert_eq!(messages.t("form.missing"), "form.missing");
    /// ```
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_owned()
    }

    /// Whether `key` resolves to a string.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.tree, |node, segment| node.get(segment))
            .and_then(Value::as_str)
    }
}

/// User-facing failure messages.
///
/// Controllers store one of these instead of the underlying error so views
/// only ever show a fixed, translated sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMessage {
    /// The users list could not be fetched.
    LoadUsersFailed,
    /// A single user could not be fetched.
    LoadUserFailed,
    /// Saving changes to a user failed.
    UpdateFailed,
    /// Creating a user failed.
    CreateFailed,
    /// Deleting a user failed.
    DeleteFailed,
}

impl UserMessage {
    /// Catalog key of the message.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::LoadUsersFailed => "errors.loadUsers",
            Self::LoadUserFailed => "errors.loadUser",
            Self::UpdateFailed => "errors.updateUser",
            Self::CreateFailed => "errors.createUser",
            Self::DeleteFailed => "errors.deleteUser",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Messages {
        Messages::new(
            Locale::Ar,
            json!({
                "table": {"columns": {"email": "البريد الإلكتروني"}},
                "count": 3
            }),
        )
        .expect("object root")
    }

    #[test]
    fn resolves_nested_keys() {
        assert_eq!(catalog().t("table.columns.email"), "البريد الإلكتروني");
        assert!(catalog().has("table.columns.email"));
    }

    #[test]
    fn non_string_leaves_and_branches_fall_back_to_key() {
        let messages = catalog();
        assert_eq!(messages.t("count"), "count");
        assert_eq!(messages.t("table.columns"), "table.columns");
        assert!(!messages.has("table"));
    }

    #[test]
    fn rejects_non_object_roots() {
        assert!(matches!(
            Messages::from_json(Locale::En, "[1, 2]"),
            Err(MessagesError::NotAnObject)
        ));
        assert!(matches!(
            Messages::from_json(Locale::En, "{"),
            Err(MessagesError::Json(_))
        ));
    }
}
