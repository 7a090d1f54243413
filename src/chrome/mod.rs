//! Per-widget chrome: the edit-mode affordances around a widget body.
//!
//! In edit mode every widget shows a drag handle, a remove button, a menu of
//! [`SizePreset`]s, a bottom-right resize handle and a live `w×h` label, and
//! its body stops receiving pointer input. Outside edit mode the chrome is
//! invisible and the body is fully interactive.
//!
//! Every size change goes through
//! [`LayoutStore::update_widget_position`], whether it comes from a preset or
//! a [`ResizeSession`].

mod presets;
mod resize;

pub use presets::SizePreset;
pub use resize::{
    resize_delta, ResizeSession, MAX_RESIZE_HEIGHT, MAX_RESIZE_WIDTH, MIN_RESIZE_HEIGHT,
    MIN_RESIZE_WIDTH, PX_PER_COLUMN, PX_PER_ROW,
};

use crate::layout::{Point, PositionPatch, WidgetConfig};
use crate::notify::Notifier;
use crate::settings::SettingsService;
use crate::store::LayoutStore;

/// What the chrome shows around one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetChrome {
    /// Grab area that starts a move.
    pub drag_handle: bool,
    /// Removes the widget immediately.
    pub remove_button: bool,
    /// Quick-size preset menu.
    pub size_menu: bool,
    /// Bottom-right handle that starts a resize.
    pub resize_handle: bool,
    /// Current size, e.g. `4×2`.
    pub size_label: Option<String>,
    /// Whether the widget body receives pointer input.
    pub body_interactive: bool,
}

impl WidgetChrome {
    /// Chrome for `widget` given the current edit mode.
    pub fn for_widget(widget: &WidgetConfig, editing: bool) -> Self {
        Self {
            drag_handle: editing,
            remove_button: editing,
            size_menu: editing,
            resize_handle: editing,
            size_label: editing.then(|| widget.position.size().to_string()),
            body_interactive: !editing,
        }
    }
}

/// Applies `preset` to the widget with `id`.
///
/// Returns `false` outside edit mode or when the widget does not exist.
pub fn apply_preset<S: SettingsService, N: Notifier>(
    store: &mut LayoutStore<S, N>,
    id: &str,
    preset: SizePreset,
) -> bool {
    if !store.is_editing() {
        return false;
    }
    tracing::debug!("applying {} preset to widget {}", preset.label(), id);
    store.update_widget_position(id, PositionPatch::resized_to(preset.size()))
}

/// Removes the widget with `id`. There is no confirmation and no undo.
pub fn remove<S: SettingsService, N: Notifier>(store: &mut LayoutStore<S, N>, id: &str) -> bool {
    store.is_editing() && store.remove_widget(id).is_some()
}

/// Starts a resize of the widget with `id` from a press at `pointer`.
///
/// Returns `None` outside edit mode or when the widget does not exist.
pub fn begin_resize<S: SettingsService, N: Notifier>(
    store: &LayoutStore<S, N>,
    id: &str,
    pointer: Point,
) -> Option<ResizeSession> {
    if !store.is_editing() {
        return None;
    }
    let widget = store.widget(id)?;
    Some(ResizeSession::begin(id, pointer, widget.position.size()))
}

/// Feeds a pointer move into `session`, writing the new size to the store
/// when it differs from the widget's current size.
///
/// Returns `true` if the store was updated.
pub fn continue_resize<S: SettingsService, N: Notifier>(
    store: &mut LayoutStore<S, N>,
    session: &ResizeSession,
    pointer: Point,
) -> bool {
    let Some(current) = store.widget(session.widget_id()).map(|w| w.position) else {
        return false;
    };
    match session.on_pointer_move(pointer, &current) {
        Some(patch) => store.update_widget_position(session.widget_id(), patch),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridSize, WidgetPosition};
    use crate::notify::QueueNotifier;
    use crate::settings::InMemorySettings;
    use crate::widgets::WidgetType;
    use std::sync::Arc;

    fn store() -> LayoutStore<InMemorySettings, QueueNotifier> {
        LayoutStore::new(
            "acme",
            Arc::new(InMemorySettings::new()),
            Arc::new(QueueNotifier::new()),
        )
    }

    fn size_of(store: &LayoutStore<InMemorySettings, QueueNotifier>, id: &str) -> GridSize {
        store.widget(id).expect("widget exists").position.size()
    }

    #[test]
    fn chrome_hidden_outside_edit_mode() {
        let widget =
            WidgetConfig::new("a", WidgetType::QuickWrite, WidgetPosition::new(0, 0, 4, 2));
        let chrome = WidgetChrome::for_widget(&widget, false);
        assert!(!chrome.drag_handle);
        assert!(!chrome.resize_handle);
        assert_eq!(chrome.size_label, None);
        assert!(chrome.body_interactive);
    }

    #[test]
    fn chrome_in_edit_mode_shows_size_and_disables_body() {
        let widget =
            WidgetConfig::new("a", WidgetType::QuickWrite, WidgetPosition::new(0, 0, 4, 2));
        let chrome = WidgetChrome::for_widget(&widget, true);
        assert!(chrome.drag_handle && chrome.remove_button && chrome.size_menu);
        assert!(chrome.resize_handle);
        assert_eq!(chrome.size_label.as_deref(), Some("4×2"));
        assert!(!chrome.body_interactive);
    }

    #[test]
    fn preset_resizes_without_moving() {
        let mut store = store();
        store.set_edit_mode(true);
        assert!(apply_preset(&mut store, "w5", SizePreset::Wide));
        let pos = store.widget("w5").expect("w5").position;
        assert_eq!(pos, WidgetPosition::new(0, 2, 12, 2));
    }

    #[test]
    fn preset_outside_edit_mode_is_ignored() {
        let mut store = store();
        assert!(!apply_preset(&mut store, "w1", SizePreset::ExtraLarge));
        assert_eq!(size_of(&store, "w1"), GridSize { w: 3, h: 2 });
    }

    #[test]
    fn remove_is_immediate() {
        let mut store = store();
        store.set_edit_mode(true);
        assert!(remove(&mut store, "w3"));
        assert!(store.widget("w3").is_none());
        assert!(!remove(&mut store, "w3"));
    }

    #[test]
    fn drag_resize_updates_store_live() {
        let mut store = store();
        store.set_edit_mode(true);
        let session = begin_resize(&store, "w1", Point::new(300.0, 160.0)).expect("editing");

        // Less than half a column: nothing to write.
        assert!(!continue_resize(&mut store, &session, Point::new(340.0, 160.0)));
        assert!(continue_resize(&mut store, &session, Point::new(460.0, 250.0)));
        assert_eq!(size_of(&store, "w1"), GridSize { w: 5, h: 3 });

        // The pointer may leave the widget; the session keeps tracking.
        assert!(continue_resize(&mut store, &session, Point::new(-5000.0, 160.0)));
        assert_eq!(size_of(&store, "w1"), GridSize { w: 2, h: 2 });
        assert_eq!(store.widget("w1").expect("w1").position.x, 0);
    }

    #[test]
    fn resize_of_removed_widget_is_ignored() {
        let mut store = store();
        store.set_edit_mode(true);
        let session = begin_resize(&store, "w2", Point::default()).expect("editing");
        store.remove_widget("w2");
        assert!(!continue_resize(&mut store, &session, Point::new(500.0, 0.0)));
    }

    #[test]
    fn begin_resize_requires_edit_mode() {
        let store = store();
        assert!(begin_resize(&store, "w1", Point::default()).is_none());
    }
}
