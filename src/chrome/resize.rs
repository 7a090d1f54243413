//! Resize-by-drag.
//!
//! Pointer movement is converted to grid units with fixed pixel-per-cell
//! approximations, not the rendered cell size. Both are rounded half toward
//! positive infinity, so `-50px` is zero columns and `+50px` is one.

use crate::layout::{GridSize, Point, PositionPatch, WidgetPosition};

/// Horizontal pixels per grid column.
pub const PX_PER_COLUMN: f64 = 100.0;
/// Vertical pixels per grid row.
pub const PX_PER_ROW: f64 = 80.0;

/// Narrowest width a resize drag can reach.
pub const MIN_RESIZE_WIDTH: i32 = 2;
/// Widest width a resize drag can reach (the full grid).
pub const MAX_RESIZE_WIDTH: i32 = 12;
/// Shortest height a resize drag can reach.
pub const MIN_RESIZE_HEIGHT: i32 = 2;
/// Tallest height a resize drag can reach.
pub const MAX_RESIZE_HEIGHT: i32 = 6;

/// One resize gesture, from press on the handle to release.
///
/// The session only remembers where it started. Each move is compared to
/// the widget's size in the store at that moment, so a move that lands on
/// the current size writes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    widget_id: String,
    start: Point,
    start_size: GridSize,
}

impl ResizeSession {
    /// Starts a resize of `widget_id`, which had `start_size` when the
    /// handle was pressed at `start`.
    pub fn begin(widget_id: impl Into<String>, start: Point, start_size: GridSize) -> Self {
        Self {
            widget_id: widget_id.into(),
            start,
            start_size,
        }
    }

    /// Widget being resized.
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    /// Size when the gesture started.
    pub fn start_size(&self) -> GridSize {
        self.start_size
    }

    /// Size the widget should have with the pointer at `pointer`.
    pub fn target_size(&self, pointer: Point) -> GridSize {
        let (cols, rows) = resize_delta(pointer.x - self.start.x, pointer.y - self.start.y);
        GridSize {
            w: self
                .start_size
                .w
                .saturating_add(cols)
                .clamp(MIN_RESIZE_WIDTH, MAX_RESIZE_WIDTH),
            h: self
                .start_size
                .h
                .saturating_add(rows)
                .clamp(MIN_RESIZE_HEIGHT, MAX_RESIZE_HEIGHT),
        }
    }

    /// Returns the patch to apply for a move to `pointer`, or `None` when
    /// the widget is already at that size.
    pub fn on_pointer_move(
        &self,
        pointer: Point,
        current: &WidgetPosition,
    ) -> Option<PositionPatch> {
        let target = self.target_size(pointer);
        (target != current.size()).then(|| PositionPatch::resized_to(target))
    }
}

/// Converts a pointer delta in pixels to whole columns and rows.
pub fn resize_delta(dx: f64, dy: f64) -> (i32, i32) {
    (round_half_up(dx / PX_PER_COLUMN), round_half_up(dy / PX_PER_ROW))
}

fn round_half_up(v: f64) -> i32 {
    // `as` saturates, and maps NaN to 0.
    (v + 0.5).floor() as i32
}
