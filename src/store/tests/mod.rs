//! Tests for the LayoutStore module.
//!
//! Tests are organized into categories:
//! - `basic`: construction and read accessors
//! - `mutation`: add/remove/position/settings/reset
//! - `load`: adopting stored layouts and falling back to the default
//! - `save`: merge-on-write, failure handling, idempotence
//! - `edit_mode`: the save-on-exit trigger policy

mod load;

use super::LayoutStore;
use crate::layout::{DashboardLayout, WidgetConfig, WidgetPosition};
use crate::notify::QueueNotifier;
use crate::settings::{InMemorySettings, SettingsRecord, LAYOUT_KEY};
use crate::widgets::WidgetType;
use std::sync::Arc;

pub(super) const ORG: &str = "acme";

pub(super) type TestStore = LayoutStore<InMemorySettings, QueueNotifier>;

/// Helper bundling a store with handles to its collaborators.
pub(super) struct Fixture {
    pub store: TestStore,
    pub settings: Arc<InMemorySettings>,
    pub notifier: Arc<QueueNotifier>,
}

/// Creates a store over an empty in-memory settings service.
pub(super) fn fixture() -> Fixture {
    let settings = Arc::new(InMemorySettings::new());
    let notifier = Arc::new(QueueNotifier::new());
    let store = LayoutStore::new(ORG, Arc::clone(&settings), Arc::clone(&notifier));
    Fixture {
        store,
        settings,
        notifier,
    }
}

/// Two widgets side by side on the first row.
pub(super) fn two_widget_layout() -> DashboardLayout {
    DashboardLayout::new(vec![
        WidgetConfig::new("a", WidgetType::QuickWrite, WidgetPosition::new(0, 0, 3, 2)),
        WidgetConfig::new("b", WidgetType::BrandHealth, WidgetPosition::new(3, 0, 4, 3)),
    ])
}

/// Settings record holding `layout` plus an unrelated key.
pub(super) fn record_with(layout: &DashboardLayout) -> SettingsRecord {
    let mut record = SettingsRecord::new();
    record.insert(
        LAYOUT_KEY.to_string(),
        serde_json::to_value(layout).expect("layout serializes"),
    );
    record.insert("brandVoice".to_string(), serde_json::json!({ "tone": "playful" }));
    record
}
