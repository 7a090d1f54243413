//! Organization settings service.
//!
//! The dashboard layout lives under the [`LAYOUT_KEY`] key of a larger
//! per-organization settings record. Other parts of an application write
//! other keys into the same record, so every writer re-reads the record and
//! merges before writing it back.
//!
//! The [`SettingsService`] trait is the boundary to that key-value store.
//! Two implementations ship with the crate:
//! - [`InMemorySettings`]: process-local map, with switches to simulate
//!   network and authorization failures
//! - [`FileSettings`]: one JSON document per organization on disk

mod file;
mod memory;

pub use file::FileSettings;
pub use memory::InMemorySettings;

use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Key of the dashboard layout inside a settings record.
pub const LAYOUT_KEY: &str = "dashboardLayout";

/// A whole settings record: arbitrary JSON keys, one of which may be
/// [`LAYOUT_KEY`].
pub type SettingsRecord = serde_json::Map<String, serde_json::Value>;

/// Errors returned by a [`SettingsService`].
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings backend could not be reached.
    #[error("Settings service unreachable: {0}")]
    Network(String),

    /// The caller may not read or write this organization's settings.
    #[error("Not authorized to access settings for organization '{org_id}'")]
    Auth {
        /// Organization that was requested.
        org_id: String,
    },

    /// Reading or writing the backing file failed.
    #[error("Failed to access settings file: {path}")]
    Io {
        /// File that could not be accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The stored record is not a JSON object.
    #[error("Settings file is not a valid JSON object: {path}")]
    Corrupt {
        /// File holding the malformed record.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be encoded as JSON.
    #[error("Failed to encode settings record")]
    Encode(#[source] serde_json::Error),

    /// The organization id cannot be used as a storage key.
    #[error("Invalid organization id: '{0}'")]
    InvalidOrganization(String),
}

/// Key-value settings store scoped by organization.
///
/// Implementations must be shareable across tasks: a save started when edit
/// mode ends may still be running after the page that started it is gone.
pub trait SettingsService: Send + Sync {
    /// Fetches the full settings record for `org_id`.
    ///
    /// An organization with no stored settings yields an empty record.
    fn get(
        &self,
        org_id: &str,
    ) -> impl Future<Output = Result<SettingsRecord, SettingsError>> + Send;

    /// Replaces the full settings record for `org_id`.
    fn update(
        &self,
        org_id: &str,
        record: SettingsRecord,
    ) -> impl Future<Output = Result<(), SettingsError>> + Send;
}

/// Rejects organization ids that are empty or could escape a storage
/// directory.
pub fn validate_org_id(org_id: &str) -> Result<(), SettingsError> {
    let valid = !org_id.is_empty()
        && org_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SettingsError::InvalidOrganization(org_id.to_string()))
    }
}
