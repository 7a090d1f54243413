//! Load and fallback tests for LayoutStore.

use super::{fixture, record_with, two_widget_layout, ORG};
use crate::layout::{default_layout, DEFAULT_WIDGET_COUNT};
use crate::settings::{SettingsRecord, LAYOUT_KEY};
use crate::store::{layout_from_record, LoadOutcome};
use crate::widgets::WidgetType;
use serde_json::json;

#[tokio::test]
async fn test_load_adopts_stored_layout() {
    let mut f = fixture();
    let stored = two_widget_layout();
    f.settings.seed(ORG, record_with(&stored));

    assert_eq!(f.store.load().await, LoadOutcome::Persisted);
    assert_eq!(f.store.layout(), &stored);
}

#[tokio::test]
async fn test_load_without_layout_key_uses_default() {
    let mut f = fixture();
    let mut record = SettingsRecord::new();
    record.insert("brandVoice".to_string(), json!("calm"));
    f.settings.seed(ORG, record);

    assert_eq!(f.store.load().await, LoadOutcome::Default);
    assert_eq!(f.store.layout(), &default_layout());
    assert_eq!(f.store.widgets().len(), DEFAULT_WIDGET_COUNT);
}

#[tokio::test]
async fn test_load_for_new_org_uses_default() {
    let mut f = fixture();
    assert_eq!(f.store.load().await, LoadOutcome::Default);
    assert_eq!(f.store.layout(), &default_layout());
}

#[tokio::test]
async fn test_load_network_failure_falls_back_silently() {
    let mut f = fixture();
    f.settings.seed(ORG, record_with(&two_widget_layout()));
    f.settings.set_offline(true);

    assert_eq!(f.store.load().await, LoadOutcome::Fallback);
    assert_eq!(f.store.layout(), &default_layout());
    // Load failures are logged, never shown to the user.
    assert!(f.notifier.is_empty());
}

#[tokio::test]
async fn test_load_auth_failure_falls_back() {
    let mut f = fixture();
    f.settings.set_unauthorized(true);
    assert_eq!(f.store.load().await, LoadOutcome::Fallback);
    assert_eq!(f.store.widgets().len(), DEFAULT_WIDGET_COUNT);
}

#[tokio::test]
async fn test_load_replaces_previous_in_memory_layout() {
    let mut f = fixture();
    f.store.add_widget(WidgetType::Announcements);
    f.settings.seed(ORG, record_with(&two_widget_layout()));
    f.store.load().await;
    assert_eq!(f.store.widgets().len(), 2);
}

#[test]
fn test_layout_without_widgets_array_is_malformed() {
    let mut record = SettingsRecord::new();
    record.insert(LAYOUT_KEY.to_string(), json!({ "version": 1 }));
    let (layout, outcome) = layout_from_record(&record);
    assert_eq!(outcome, LoadOutcome::Fallback);
    assert_eq!(layout, default_layout());
}

#[test]
fn test_layout_with_non_array_widgets_is_malformed() {
    let mut record = SettingsRecord::new();
    record.insert(LAYOUT_KEY.to_string(), json!({ "widgets": "lots" }));
    assert_eq!(layout_from_record(&record).1, LoadOutcome::Fallback);
}

#[test]
fn test_null_layout_is_treated_as_absent() {
    let mut record = SettingsRecord::new();
    record.insert(LAYOUT_KEY.to_string(), serde_json::Value::Null);
    assert_eq!(layout_from_record(&record).1, LoadOutcome::Default);
}

#[test]
fn test_empty_widgets_array_is_adopted() {
    let mut record = SettingsRecord::new();
    record.insert(LAYOUT_KEY.to_string(), json!({ "widgets": [] }));
    let (layout, outcome) = layout_from_record(&record);
    assert_eq!(outcome, LoadOutcome::Persisted);
    assert!(layout.widgets.is_empty());
}

#[test]
fn test_unrecognized_widget_type_does_not_reject_layout() {
    let mut record = SettingsRecord::new();
    record.insert(
        LAYOUT_KEY.to_string(),
        json!({
            "version": 1,
            "widgets": [
                { "id": "w1", "type": "quick-write", "position": { "x": 0, "y": 0, "w": 3, "h": 2 } },
                { "id": "w9", "type": "retired-widget", "position": { "x": 3, "y": 0, "w": 3, "h": 2 } }
            ],
            "lastModified": "2024-05-01T12:00:00Z"
        }),
    );
    let (layout, outcome) = layout_from_record(&record);
    assert_eq!(outcome, LoadOutcome::Persisted);
    assert_eq!(layout.widgets.len(), 2);
    assert_eq!(
        layout.widgets[1].widget_type,
        WidgetType::Unrecognized("retired-widget".to_string())
    );
    assert!(layout.last_modified.is_some());
}

#[test]
fn test_out_of_range_geometry_is_kept_verbatim() {
    let mut record = SettingsRecord::new();
    record.insert(
        LAYOUT_KEY.to_string(),
        json!({ "widgets": [
            { "id": "big", "type": "brand-health", "position": { "x": 10, "y": -1, "w": 20, "h": 0 } }
        ] }),
    );
    let (layout, _) = layout_from_record(&record);
    let pos = layout.widgets[0].position;
    assert_eq!((pos.x, pos.y, pos.w, pos.h), (10, -1, 20, 0));
}

#[test]
fn test_timestamp_without_offset_keeps_stored_widgets() {
    let mut record = SettingsRecord::new();
    record.insert(
        LAYOUT_KEY.to_string(),
        json!({
            "version": 1,
            "widgets": [
                { "id": "a", "type": "quick-write", "position": { "x": 0, "y": 0, "w": 3, "h": 2 } }
            ],
            "lastModified": "2024-05-01T10:00:00"
        }),
    );
    let (layout, outcome) = layout_from_record(&record);
    assert_eq!(outcome, LoadOutcome::Persisted);
    assert_eq!(layout.widgets.len(), 1);
    assert_eq!(layout.widgets[0].id, "a");
}

#[test]
fn test_unparsable_metadata_keeps_stored_widgets() {
    let mut record = SettingsRecord::new();
    record.insert(
        LAYOUT_KEY.to_string(),
        json!({
            "version": "2.0",
            "widgets": [
                { "id": "a", "type": "brand-health", "position": { "x": 6, "y": 0, "w": 3, "h": 2 } }
            ],
            "lastModified": 1714557600
        }),
    );
    let (layout, outcome) = layout_from_record(&record);
    assert_eq!(outcome, LoadOutcome::Persisted);
    assert_eq!(layout.widgets[0].widget_type, WidgetType::BrandHealth);
    assert!(layout.last_modified.is_none());
}
