//! JSON-file settings service.
//!
//! Each organization's record is stored at `<root>/orgs/<org_id>.json`.
//! Writes go to a temp file that is renamed over the target, so a crash
//! mid-write leaves either the old record or the new one.

use super::{validate_org_id, SettingsError, SettingsRecord, SettingsService};
use std::path::{Path, PathBuf};

/// File-backed [`SettingsService`].
#[derive(Debug, Clone)]
pub struct FileSettings {
    root: PathBuf,
}

impl FileSettings {
    /// Creates a service storing records below `root`.
    ///
    /// Nothing is created on disk until the first `update`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding this service's records.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record file for `org_id`.
    pub fn record_path(&self, org_id: &str) -> PathBuf {
        self.root.join("orgs").join(format!("{org_id}.json"))
    }
}

impl SettingsService for FileSettings {
    async fn get(&self, org_id: &str) -> Result<SettingsRecord, SettingsError> {
        validate_org_id(org_id)?;
        let path = self.record_path(org_id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no settings file at {:?}, using empty record", path);
                return Ok(SettingsRecord::new());
            }
            Err(source) => return Err(SettingsError::Io { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| SettingsError::Corrupt { path, source })
    }

    async fn update(&self, org_id: &str, record: SettingsRecord) -> Result<(), SettingsError> {
        validate_org_id(org_id)?;
        let path = self.record_path(org_id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SettingsError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let json = serde_json::to_string_pretty(&record).map_err(SettingsError::Encode)?;
        let temp_path = path.with_extension(format!("json.tmp.{}", std::process::id()));
        tokio::fs::write(&temp_path, json)
            .await
            .map_err(|source| SettingsError::Io {
                path: temp_path.clone(),
                source,
            })?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(|source| SettingsError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("wrote settings for {} to {:?}", org_id, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_reads_as_empty_record() {
        let dir = tempdir().expect("tempdir creation failed");
        let settings = FileSettings::new(dir.path());
        let rec = settings.get("acme").await.expect("get");
        assert!(rec.is_empty());
    }

    #[tokio::test]
    async fn update_creates_directories_and_round_trips() {
        let dir = tempdir().expect("tempdir creation failed");
        let settings = FileSettings::new(dir.path().join("nested"));
        let mut rec = SettingsRecord::new();
        rec.insert("theme".to_string(), json!("dark"));
        settings.update("acme", rec.clone()).await.expect("update");

        assert!(settings.record_path("acme").exists());
        assert_eq!(settings.get("acme").await.expect("get"), rec);
    }

    #[tokio::test]
    async fn update_leaves_no_temp_files() {
        let dir = tempdir().expect("tempdir creation failed");
        let settings = FileSettings::new(dir.path());
        settings
            .update("acme", SettingsRecord::new())
            .await
            .expect("update");
        let entries: Vec<_> = std::fs::read_dir(dir.path().join("orgs"))
            .expect("read orgs dir")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(entries, vec!["acme.json".to_string()]);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempdir().expect("tempdir creation failed");
        let settings = FileSettings::new(dir.path());
        let path = settings.record_path("acme");
        std::fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        std::fs::write(&path, "[1, 2, 3]").expect("write");

        let err = settings.get("acme").await.expect_err("array is not a record");
        assert!(matches!(err, SettingsError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn invalid_org_is_rejected_before_touching_disk() {
        let dir = tempdir().expect("tempdir creation failed");
        let settings = FileSettings::new(dir.path());
        let err = settings
            .update("../escape", SettingsRecord::new())
            .await
            .expect_err("path-like org id");
        assert!(matches!(err, SettingsError::InvalidOrganization(_)));
        assert!(!dir.path().join("orgs").exists());
    }
}
