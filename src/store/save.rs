use crate::layout::DashboardLayout;
use crate::notify::{Notification, Notifier};
use crate::settings::{SettingsError, SettingsService, LAYOUT_KEY};
use chrono::Utc;
use std::sync::Arc;

/// A pending write of one layout snapshot.
///
/// Owns everything it needs, so it can be spawned onto a runtime and
/// outlive the [`LayoutStore`](super::LayoutStore) that created it.
pub struct SaveRequest<S, N> {
    org_id: String,
    layout: DashboardLayout,
    settings: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> std::fmt::Debug for SaveRequest<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveRequest")
            .field("org_id", &self.org_id)
            .field("widgets", &self.layout.widgets.len())
            .finish_non_exhaustive()
    }
}

impl<S: SettingsService, N: Notifier> SaveRequest<S, N> {
    pub(super) fn new(
        org_id: String,
        layout: DashboardLayout,
        settings: Arc<S>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            org_id,
            layout,
            settings,
            notifier,
        }
    }

    /// The layout snapshot this request will write.
    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    /// Re-reads the settings record, replaces its layout entry with the
    /// snapshot stamped with the current time, and writes it back.
    ///
    /// Success and failure are both reported through the notifier.
    pub async fn run(self) -> Result<(), SettingsError> {
        match self.write().await {
            Ok(()) => {
                tracing::info!("saved dashboard layout for {}", self.org_id);
                self.notifier
                    .notify(Notification::success("Dashboard layout saved"));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to save dashboard layout for {}: {}", self.org_id, e);
                self.notifier.notify(Notification::error(format!(
                    "Failed to save dashboard layout: {}",
                    e
                )));
                Err(e)
            }
        }
    }

    async fn write(&self) -> Result<(), SettingsError> {
        let mut record = self.settings.get(&self.org_id).await?;

        let mut layout = self.layout.clone();
        layout.last_modified = Some(Utc::now());
        let value = serde_json::to_value(&layout).map_err(SettingsError::Encode)?;
        record.insert(LAYOUT_KEY.to_string(), value);

        self.settings.update(&self.org_id, record).await
    }
}
