//! Navigation targets of the console.

use std::fmt;

use pagination::PageNumber;
use url::form_urlencoded;

use crate::domain::{Locale, UserId};

/// A page the console can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The users table.
    List {
        /// View locale.
        locale: Locale,
        /// Page to open; the first page when `None`.
        page: Option<PageNumber>,
        /// Refresh trigger naming the last mutated user.
        updated: Option<UserId>,
    },
    /// Create form.
    CreateUser {
        /// View locale.
        locale: Locale,
    },
    /// Read-only details.
    UserDetail {
        /// View locale.
        locale: Locale,
        /// Target user.
        id: UserId,
    },
    /// Edit form.
    EditUser {
        /// View locale.
        locale: Locale,
        /// Target user.
        id: UserId,
    },
    /// Delete confirmation, and its POST target.
    DeleteUser {
        /// View locale.
        locale: Locale,
        /// Target user.
        id: UserId,
    },
    /// POST target of the in-place edit form.
    QuickEdit {
        /// View locale.
        locale: Locale,
        /// Target user.
        id: UserId,
    },
}

impl Route {
    /// The list, first page, with no trigger.
    #[must_use]
    pub const fn list(locale: Locale) -> Self {
        Self::List {
            locale,
            page: None,
            updated: None,
        }
    }

    /// The list after a mutation of `id`, forcing a refresh.
    #[must_use]
    pub const fn list_after_mutation(locale: Locale, id: UserId) -> Self {
        Self::List {
            locale,
            page: None,
            updated: Some(id),
        }
    }

    /// Locale of the target.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        match self {
            Self::List { locale, .. }
            | Self::CreateUser { locale }
            | Self::UserDetail { locale, .. }
            | Self::EditUser { locale, .. }
            | Self::DeleteUser { locale, .. }
            | Self::QuickEdit { locale, .. } => *locale,
        }
    }

    /// Absolute path including any query string.
    ///
    /// # Examples
    /// ```
    /// use user_admin::domain::{Locale, Route, UserId};
    ///
    /// assert_eq!(Route::EditUser { locale: Locale::Ar, id: UserId::new(5) }.path(), "/ar/users/5/edit");
    /// assert_eq!(Route::list_after_mutation(Locale::En, UserId::new(5)).path(), "/en?updated=5");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::List {
                locale,
                page,
                updated,
            } => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                if let Some(page) = (*page).filter(|page| *page != PageNumber::FIRST) {
                    query.append_pair("page", &page.to_string());
                }
                if let Some(id) = updated {
                    query.append_pair("updated", &id.to_string());
                }
                let query = query.finish();
                if query.is_empty() {
                    format!("/{locale}")
                } else {
                    format!("/{locale}?{query}")
                }
            }
            Self::CreateUser { locale } => format!("/{locale}/users/create"),
            Self::UserDetail { locale, id } => format!("/{locale}/users/{id}"),
            Self::EditUser { locale, id } => format!("/{locale}/users/{id}/edit"),
            Self::DeleteUser { locale, id } => format!("/{locale}/users/{id}/delete"),
            Self::QuickEdit { locale, id } => format!("/{locale}/users/{id}/quick-edit"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
