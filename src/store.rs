//! Loading and saving the ledger file.
//!
//! The ledger is a single JSON document holding every expense plus the theme
//! preference. It is read once at startup and written back in full after
//! every mutation.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Error, expense::Expense, theme::Theme};

/// The persisted application data.
///
/// `#[serde(default)]` on both fields keeps old or hand-trimmed ledger files
/// loadable: a document missing either key falls back to the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// The UI theme to render pages with.
    #[serde(default)]
    pub theme: Theme,
    /// Every recorded expense, in insertion order.
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Reads and writes the ledger as a JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the ledger from disk.
    ///
    /// A missing file is not an error: it yields the default ledger (no
    /// expenses, dark theme), matching the first run of the application.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MalformedLedger] if the file exists but cannot be parsed as
    ///   a ledger document,
    /// - or [Error::LedgerIoError] if the file cannot be read.
    pub fn load(&self) -> Result<Ledger, Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Ledger::default()),
            Err(error) => return Err(error.into()),
        };

        serde_json::from_str(&text).map_err(|error| Error::MalformedLedger(error.to_string()))
    }

    /// Write the whole ledger to disk.
    ///
    /// The document is written to a temporary sibling file and renamed over
    /// the target, so a crash mid-write cannot leave a half-written ledger.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::JSONSerializationError] if the ledger cannot be serialized,
    /// - or [Error::LedgerIoError] if the file cannot be written.
    pub fn save(&self, ledger: &Ledger) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(ledger)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// The path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
