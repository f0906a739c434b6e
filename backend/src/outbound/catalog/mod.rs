//! Message catalog sources.
//!
//! [`DirCatalogSource`] reads `<dir>/<locale>.json` through `cap_std`;
//! [`EmbeddedCatalogSource`] serves the catalogs compiled into the binary.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{MessageCatalogError, MessageCatalogSource};
use crate::domain::{Locale, Messages};

const EMBEDDED_EN: &str = include_str!("../../../messages/en.json");
const EMBEDDED_AR: &str = include_str!("../../../messages/ar.json");

/// Catalogs stored as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct DirCatalogSource {
    dir: PathBuf,
}

impl DirCatalogSource {
    /// Read catalogs from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory being read.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, locale: Locale) -> io::Result<String> {
        let dir = Dir::open_ambient_dir(&self.dir, ambient_authority())?;
        dir.read_to_string(format!("{}.json", locale.code()))
    }
}

impl MessageCatalogSource for DirCatalogSource {
    fn load(&self, locale: Locale) -> Result<Messages, MessageCatalogError> {
        let text = self.read(locale).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => MessageCatalogError::missing(locale.code()),
            _ => MessageCatalogError::invalid(locale.code(), err.to_string()),
        })?;
        Messages::from_json(locale, &text)
            .map_err(|err| MessageCatalogError::invalid(locale.code(), err.to_string()))
    }
}

/// Catalogs shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalogSource;

impl MessageCatalogSource for EmbeddedCatalogSource {
    fn load(&self, locale: Locale) -> Result<Messages, MessageCatalogError> {
        let text = match locale {
            Locale::En => EMBEDDED_EN,
            Locale::Ar => EMBEDDED_AR,
        };
        Messages::from_json(locale, text)
            .map_err(|err| MessageCatalogError::invalid(locale.code(), err.to_string()))
    }
}
