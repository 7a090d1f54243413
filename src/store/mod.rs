//! Layout store for the dashboard.
//!
//! The [`LayoutStore`] is the single owner of one organization's
//! [`DashboardLayout`] for the lifetime of a dashboard session. Every layout
//! mutation funnels through it: the drag context swaps positions through
//! [`LayoutStore::update_widget_position`], the widget chrome resizes and
//! removes through it, and the catalog picker adds through it.
//!
//! # Persistence policy
//!
//! Mutations only touch memory. The layout is written back exactly once per
//! edit session, when edit mode turns off. Writing on every mutation would
//! mean one write per pointer move during a drag. The write re-reads the
//! organization's settings record and replaces only the
//! [`LAYOUT_KEY`](crate::settings::LAYOUT_KEY) entry, so keys written by
//! other parts of the application survive. Two sessions editing the same
//! layout concurrently are last-write-wins.

mod save;

#[cfg(test)]
mod tests;

pub use save::SaveRequest;

use crate::layout::{
    default_layout, DashboardLayout, GridSize, PositionPatch, WidgetConfig, WidgetPosition,
    WidgetSettings,
};
use crate::notify::Notifier;
use crate::settings::{SettingsError, SettingsRecord, SettingsService, LAYOUT_KEY};
use crate::widgets::{WidgetRegistry, WidgetType};
use std::sync::Arc;

/// Size given to widgets whose type has no registry entry.
pub const FALLBACK_WIDGET_SIZE: GridSize = GridSize { w: 4, h: 2 };

/// Where the layout adopted by [`LayoutStore::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The organization's stored layout.
    Persisted,
    /// No layout was stored; the built-in default was adopted.
    Default,
    /// Fetching or parsing failed; the built-in default was adopted.
    Fallback,
}

/// Single-owner container for the current dashboard layout.
///
/// Constructed once per dashboard session with the organization id and the
/// two external collaborators. Until [`load`](Self::load) completes the
/// store holds the default layout, so the dashboard always has something to
/// render.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use studio_dashboard::notify::QueueNotifier;
/// use studio_dashboard::settings::InMemorySettings;
/// use studio_dashboard::store::LayoutStore;
/// use studio_dashboard::widgets::WidgetType;
///
/// #[tokio::main]
/// async fn main() {
///     let settings = Arc::new(InMemorySettings::new());
///     let mut store = LayoutStore::new("acme", settings.clone(), Arc::new(QueueNotifier::new()));
///     store.load().await;
///
///     store.set_edit_mode(true);
///     store.add_widget(WidgetType::StorageUsage);
///     if let Some(save) = store.set_edit_mode(false) {
///         save.run().await.expect("in-memory save succeeds");
///     }
///     assert_eq!(settings.update_count(), 1);
/// }
/// ```
pub struct LayoutStore<S, N> {
    org_id: String,
    settings: Arc<S>,
    notifier: Arc<N>,
    registry: WidgetRegistry,
    layout: DashboardLayout,
    editing: bool,
}

impl<S, N> std::fmt::Debug for LayoutStore<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStore")
            .field("org_id", &self.org_id)
            .field("widgets", &self.layout.widgets.len())
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

impl<S: SettingsService, N: Notifier> LayoutStore<S, N> {
    /// Creates a store for `org_id` holding the default layout.
    pub fn new(org_id: impl Into<String>, settings: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            org_id: org_id.into(),
            settings,
            notifier,
            registry: WidgetRegistry::new(),
            layout: default_layout(),
            editing: false,
        }
    }

    /// Organization whose layout this store holds.
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    /// The current in-memory layout.
    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    /// The current widget placements, in storage order.
    pub fn widgets(&self) -> &[WidgetConfig] {
        &self.layout.widgets
    }

    /// Looks up a widget by id.
    pub fn widget(&self, id: &str) -> Option<&WidgetConfig> {
        self.layout.widget(id)
    }

    /// The registry used to size new widgets.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Returns `true` while edit mode is on.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Fetches the organization's settings and adopts the stored layout.
    ///
    /// Falls back to the default layout when nothing is stored, when the
    /// fetch fails, or when the stored value is not a valid layout. Failures
    /// are logged, never returned: the dashboard must always render.
    pub async fn load(&mut self) -> LoadOutcome {
        let record = match self.settings.get(&self.org_id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("failed to load dashboard layout for {}: {}", self.org_id, e);
                self.layout = default_layout();
                return LoadOutcome::Fallback;
            }
        };

        let (layout, outcome) = layout_from_record(&record);
        tracing::debug!(
            "adopted {} widgets for {} ({:?})",
            layout.widgets.len(),
            self.org_id,
            outcome
        );
        self.layout = layout;
        outcome
    }

    /// Appends a widget of `widget_type` below every existing widget.
    ///
    /// The widget gets its registry default size at column 0. Adding a type
    /// that is already present is allowed; uniqueness is a catalog policy,
    /// not a store rule. Returns the new widget's id.
    pub fn add_widget(&mut self, widget_type: WidgetType) -> String {
        let size = self
            .registry
            .get(&widget_type)
            .map(|def| def.default_size)
            .unwrap_or(FALLBACK_WIDGET_SIZE);
        let position = WidgetPosition::new(0, self.layout.next_free_row(), size.w, size.h);
        let id = new_widget_id();
        tracing::debug!("adding {} widget {} at {:?}", widget_type, id, position);
        self.layout
            .widgets
            .push(WidgetConfig::new(id.clone(), widget_type, position));
        id
    }

    /// Permanently removes the widget with `id`.
    ///
    /// Returns the removed widget, or `None` if no widget has that id.
    pub fn remove_widget(&mut self, id: &str) -> Option<WidgetConfig> {
        let index = self.layout.widgets.iter().position(|w| w.id == id)?;
        let removed = self.layout.widgets.remove(index);
        tracing::debug!("removed widget {}", id);
        Some(removed)
    }

    /// Merges `patch` into the position of the widget with `id`.
    ///
    /// Returns `false` if no widget has that id.
    pub fn update_widget_position(&mut self, id: &str, patch: PositionPatch) -> bool {
        match self.layout.widget_mut(id) {
            Some(widget) => {
                widget.position.merge(patch);
                tracing::trace!("widget {} now at {:?}", id, widget.position);
                true
            }
            None => {
                tracing::debug!("position update for unknown widget {}", id);
                false
            }
        }
    }

    /// Shallow-merges `patch` into the settings of the widget with `id`.
    ///
    /// Returns `false` if no widget has that id.
    pub fn update_widget_settings(&mut self, id: &str, patch: WidgetSettings) -> bool {
        let Some(widget) = self.layout.widget_mut(id) else {
            tracing::debug!("settings update for unknown widget {}", id);
            return false;
        };
        widget.settings.get_or_insert_with(WidgetSettings::new).extend(patch);
        true
    }

    /// Replaces the whole layout with the built-in default.
    pub fn reset_to_default(&mut self) {
        tracing::info!("resetting dashboard layout for {}", self.org_id);
        self.layout = default_layout();
    }

    /// Captures the current layout as a save that can run detached from the
    /// store.
    pub fn save_request(&self) -> SaveRequest<S, N> {
        SaveRequest::new(
            self.org_id.clone(),
            self.layout.clone(),
            Arc::clone(&self.settings),
            Arc::clone(&self.notifier),
        )
    }

    /// Persists the current layout and waits for the result.
    ///
    /// The outcome is also reported through the notifier. A failed save
    /// leaves the in-memory layout untouched; the next save includes it.
    pub async fn save_layout(&self) -> Result<(), SettingsError> {
        self.save_request().run().await
    }

    /// Turns edit mode on or off.
    ///
    /// Turning edit mode off while it was on ends the edit session and
    /// returns the save that commits it. The caller decides whether to await
    /// it or spawn it; either way it runs to completion. Every other call
    /// returns `None`.
    pub fn set_edit_mode(&mut self, editing: bool) -> Option<SaveRequest<S, N>> {
        let was_editing = std::mem::replace(&mut self.editing, editing);
        match (was_editing, editing) {
            (true, false) => {
                tracing::info!("edit session ended for {}, saving layout", self.org_id);
                Some(self.save_request())
            }
            (false, true) => {
                tracing::debug!("edit session started for {}", self.org_id);
                None
            }
            _ => None,
        }
    }

    /// Flips edit mode. See [`set_edit_mode`](Self::set_edit_mode).
    pub fn toggle_edit_mode(&mut self) -> Option<SaveRequest<S, N>> {
        self.set_edit_mode(!self.editing)
    }
}

/// Extracts the stored layout from a settings record.
///
/// Returns the default layout when the key is absent or holds something that
/// is not a layout with a `widgets` array.
pub fn layout_from_record(record: &SettingsRecord) -> (DashboardLayout, LoadOutcome) {
    let Some(value) = record.get(LAYOUT_KEY).filter(|v| !v.is_null()) else {
        return (default_layout(), LoadOutcome::Default);
    };
    match serde_json::from_value::<DashboardLayout>(value.clone()) {
        Ok(layout) => (layout, LoadOutcome::Persisted),
        Err(e) => {
            tracing::warn!("stored dashboard layout is malformed, using default: {}", e);
            (default_layout(), LoadOutcome::Fallback)
        }
    }
}

/// Generates a widget id that is never reused.
fn new_widget_id() -> String {
    format!("widget-{}", ulid::Ulid::new().to_string().to_lowercase())
}
