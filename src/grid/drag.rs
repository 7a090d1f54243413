//! Drag-to-reorder for the dashboard grid.
//!
//! A [`DragContext`] tracks one drag at a time from either of two sensors:
//!
//! - **Pointer**: a press on a widget's drag handle only becomes a drag once
//!   the pointer has travelled more than [`ACTIVATION_DISTANCE_PX`], so a
//!   plain click is never mistaken for a drag.
//! - **Keyboard**: pick up the focused widget, step the drop target through
//!   the render order, then drop or cancel.
//!
//! Ending a drag yields a [`DragEnd`]. [`apply_drop`] turns it into a swap:
//! the dragged widget and the widget under it exchange their positions
//! verbatim, and nothing else moves.

use crate::layout::{Point, PositionPatch};
use crate::notify::Notifier;
use crate::settings::SettingsService;
use crate::store::LayoutStore;

/// Pointer travel, in pixels, needed before a press starts a drag.
pub const ACTIVATION_DISTANCE_PX: f64 = 8.0;

/// Input source driving a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    /// Mouse or pen.
    Pointer,
    /// Keyboard reordering.
    Keyboard,
}

/// State of the drag context.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// Nothing is pressed or dragged.
    #[default]
    Idle,
    /// A drag handle is pressed but the pointer has not moved far enough.
    Pressed {
        /// Widget whose handle was pressed.
        active: String,
        /// Pointer location at press time.
        origin: Point,
    },
    /// A widget is being dragged.
    Dragging {
        /// Widget being dragged.
        active: String,
        /// Widget currently under the drag, if any.
        over: Option<String>,
        /// Sensor that started the drag.
        sensor: Sensor,
    },
}

/// Outcome of a completed drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    /// Widget that was dragged.
    pub active: String,
    /// Widget it was dropped on, if any.
    pub over: Option<String>,
}

/// Tracks the current drag gesture.
#[derive(Debug, Clone, Default)]
pub struct DragContext {
    state: DragState,
}

impl DragContext {
    /// Creates an idle context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Widget being dragged, once the drag has started.
    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { active, .. } => Some(active),
            _ => None,
        }
    }

    /// Widget currently under the drag.
    pub fn over_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` once a drag has started.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Records a press on `id`'s drag handle at `at`.
    ///
    /// Ignored unless the context is idle.
    pub fn pointer_down(&mut self, id: &str, at: Point) {
        if self.state == DragState::Idle {
            self.state = DragState::Pressed {
                active: id.to_string(),
                origin: at,
            };
        }
    }

    /// Feeds a pointer move; `over` is the widget under the pointer.
    ///
    /// Returns `true` while a pointer drag is in progress.
    pub fn pointer_move(&mut self, at: Point, over: Option<&str>) -> bool {
        match &mut self.state {
            DragState::Pressed { active, origin } => {
                if origin.distance(&at) > ACTIVATION_DISTANCE_PX {
                    tracing::debug!("drag started for widget {}", active);
                    self.state = DragState::Dragging {
                        active: std::mem::take(active),
                        over: over.map(str::to_string),
                        sensor: Sensor::Pointer,
                    };
                    true
                } else {
                    false
                }
            }
            DragState::Dragging {
                over: current,
                sensor: Sensor::Pointer,
                ..
            } => {
                *current = over.map(str::to_string);
                true
            }
            _ => false,
        }
    }

    /// Releases the pointer.
    ///
    /// A release before the drag started is a click and yields nothing.
    pub fn pointer_up(&mut self) -> Option<DragEnd> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                active,
                over,
                sensor: Sensor::Pointer,
            } => Some(DragEnd { active, over }),
            DragState::Dragging {
                active,
                over,
                sensor: Sensor::Keyboard,
            } => {
                // A stray release must not end a keyboard drag.
                self.state = DragState::Dragging {
                    active,
                    over,
                    sensor: Sensor::Keyboard,
                };
                None
            }
            _ => None,
        }
    }

    /// Picks up `id` for keyboard reordering. The drop target starts on the
    /// widget itself.
    pub fn keyboard_pick_up(&mut self, id: &str) {
        if self.state == DragState::Idle {
            tracing::debug!("keyboard drag started for widget {}", id);
            self.state = DragState::Dragging {
                active: id.to_string(),
                over: Some(id.to_string()),
                sensor: Sensor::Keyboard,
            };
        }
    }

    /// Moves the keyboard drop target `step` places through `order`,
    /// stopping at either end.
    pub fn keyboard_move(&mut self, step: isize, order: &[&str]) {
        let DragState::Dragging {
            active,
            over,
            sensor: Sensor::Keyboard,
        } = &mut self.state
        else {
            return;
        };
        if order.is_empty() {
            return;
        }
        let anchor = over.as_deref().unwrap_or(active.as_str());
        let current = order.iter().position(|id| *id == anchor).unwrap_or(0);
        let last = order.len() - 1;
        let target = current.saturating_add_signed(step).min(last);
        *over = Some(order[target].to_string());
    }

    /// Drops a keyboard drag on the current target.
    pub fn keyboard_drop(&mut self) -> Option<DragEnd> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                active,
                over,
                sensor: Sensor::Keyboard,
            } => Some(DragEnd { active, over }),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Abandons any press or drag without changing the layout.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Applies a drop: swaps the positions of the dragged widget and the widget
/// it landed on.
///
/// Returns `false`, leaving the layout untouched, when edit mode is off,
/// when there is no target, when the target is the dragged widget itself,
/// or when either widget no longer exists.
pub fn apply_drop<S: SettingsService, N: Notifier>(
    store: &mut LayoutStore<S, N>,
    end: &DragEnd,
) -> bool {
    if !store.is_editing() {
        return false;
    }
    let Some(over) = end.over.as_deref().filter(|over| *over != end.active) else {
        return false;
    };
    let (Some(active_pos), Some(over_pos)) = (
        store.widget(&end.active).map(|w| w.position),
        store.widget(over).map(|w| w.position),
    ) else {
        return false;
    };

    tracing::debug!("swapping widgets {} and {}", end.active, over);
    store.update_widget_position(&end.active, PositionPatch::replace_with(over_pos));
    store.update_widget_position(over, PositionPatch::replace_with(active_pos));
    true
}
