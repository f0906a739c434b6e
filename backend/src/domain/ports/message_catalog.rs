//! Driven port for loading message catalogs.
//!
//! Catalogs are read once at startup into [`Catalogs`]; a locale whose
//! catalog failed to load is served as not-found rather than aborting
//! startup.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::define_port_error;
use crate::domain::{Locale, Messages};

define_port_error! {
    /// Failures while loading a catalog.
    pub enum MessageCatalogError {
        /// No catalog exists for the locale.
        Missing { locale: String } => "no message catalog for locale `{locale}`",
        /// The catalog exists but cannot be used.
        Invalid { locale: String, message: String } =>
            "message catalog for `{locale}` is invalid: {message}",
    }
}

/// Source of per-locale catalogs.
#[cfg_attr(test, mockall::automock)]
pub trait MessageCatalogSource: Send + Sync {
    /// Load the catalog for `locale`.
    fn load(&self, locale: Locale) -> Result<Messages, MessageCatalogError>;
}

/// Catalogs loaded at startup, keyed by locale.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    by_locale: BTreeMap<Locale, Arc<Messages>>,
}

impl Catalogs {
    /// Load every supported locale from `source`, skipping failures.
    #[must_use]
    pub fn load_all(source: &dyn MessageCatalogSource) -> Self {
        let mut by_locale = BTreeMap::new();
        for locale in Locale::ALL {
            match source.load(locale) {
                Ok(messages) => {
                    info!(locale = %locale, "message catalog loaded");
                    by_locale.insert(locale, Arc::new(messages));
                }
                Err(error) => {
                    warn!(locale = %locale, %error, "message catalog unavailable");
                }
            }
        }
        Self { by_locale }
    }

    /// Build from already parsed catalogs.
    #[must_use]
    pub fn from_messages(messages: impl IntoIterator<Item = Messages>) -> Self {
        Self {
            by_locale: messages
                .into_iter()
                .map(|catalog| (catalog.locale(), Arc::new(catalog)))
                .collect(),
        }
    }

    /// Catalog for `locale`, if it loaded.
    #[must_use]
    pub fn get(&self, locale: Locale) -> Option<Arc<Messages>> {
        self.by_locale.get(&locale).cloned()
    }

    /// Number of loaded catalogs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_locale.len()
    }

    /// Whether no catalog loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_locale.is_empty()
    }
}
