//! Process-local settings service.

use super::{validate_org_id, SettingsError, SettingsRecord, SettingsService};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory [`SettingsService`].
///
/// Records are held in a mutex-guarded map. The `offline` and
/// `unauthorized` switches make every call fail with the matching error,
/// which is how callers exercise their failure paths without a backend.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    records: Mutex<HashMap<String, SettingsRecord>>,
    offline: AtomicBool,
    unauthorized: AtomicBool,
    updates: AtomicUsize,
}

impl InMemorySettings {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` for `org_id` directly, bypassing the failure switches.
    pub fn seed(&self, org_id: &str, record: SettingsRecord) {
        self.lock().insert(org_id.to_string(), record);
    }

    /// Returns a copy of the stored record, bypassing the failure switches.
    pub fn snapshot(&self, org_id: &str) -> Option<SettingsRecord> {
        self.lock().get(org_id).cloned()
    }

    /// Makes every subsequent call fail with [`SettingsError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes every subsequent call fail with [`SettingsError::Auth`].
    pub fn set_unauthorized(&self, unauthorized: bool) {
        self.unauthorized.store(unauthorized, Ordering::SeqCst);
    }

    /// Count of successful `update` calls.
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SettingsRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_reachable(&self, org_id: &str) -> Result<(), SettingsError> {
        validate_org_id(org_id)?;
        if self.offline.load(Ordering::SeqCst) {
            return Err(SettingsError::Network("settings service is offline".to_string()));
        }
        if self.unauthorized.load(Ordering::SeqCst) {
            return Err(SettingsError::Auth {
                org_id: org_id.to_string(),
            });
        }
        Ok(())
    }
}

impl SettingsService for InMemorySettings {
    async fn get(&self, org_id: &str) -> Result<SettingsRecord, SettingsError> {
        self.check_reachable(org_id)?;
        Ok(self.lock().get(org_id).cloned().unwrap_or_default())
    }

    async fn update(&self, org_id: &str, record: SettingsRecord) -> Result<(), SettingsError> {
        self.check_reachable(org_id)?;
        self.lock().insert(org_id.to_string(), record);
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> SettingsRecord {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn get_unknown_org_returns_empty_record() {
        let settings = InMemorySettings::new();
        let rec = settings.get("acme").await.expect("get");
        assert!(rec.is_empty());
    }

    #[tokio::test]
    async fn update_then_get_returns_record() {
        let settings = InMemorySettings::new();
        settings
            .update("acme", record(json!({ "theme": "dark" })))
            .await
            .expect("update");
        let rec = settings.get("acme").await.expect("get");
        assert_eq!(rec.get("theme"), Some(&json!("dark")));
        assert_eq!(settings.update_count(), 1);
    }

    #[tokio::test]
    async fn records_are_scoped_by_org() {
        let settings = InMemorySettings::new();
        settings.seed("acme", record(json!({ "a": 1 })));
        assert!(settings.get("globex").await.expect("get").is_empty());
    }

    #[tokio::test]
    async fn offline_fails_with_network_error() {
        let settings = InMemorySettings::new();
        settings.set_offline(true);
        assert!(matches!(settings.get("acme").await, Err(SettingsError::Network(_))));
        assert!(matches!(
            settings.update("acme", SettingsRecord::new()).await,
            Err(SettingsError::Network(_))
        ));
        assert_eq!(settings.update_count(), 0);
    }

    #[tokio::test]
    async fn unauthorized_fails_with_auth_error() {
        let settings = InMemorySettings::new();
        settings.set_unauthorized(true);
        assert!(matches!(settings.get("acme").await, Err(SettingsError::Auth { .. })));
    }

    #[tokio::test]
    async fn switches_can_be_turned_off() {
        let settings = InMemorySettings::new();
        settings.set_offline(true);
        settings.set_offline(false);
        assert!(settings.get("acme").await.is_ok());
    }
}
