//! Maps the dashboard grid onto terminal cells.
//!
//! The grid is laid out in pixels. The terminal is treated as a viewport
//! whose cells are [`CELL_WIDTH_PX`] × [`CELL_HEIGHT_PX`] pixels, so the
//! 768px collapse breakpoint, the 8px drag threshold and the resize math all
//! run on the same numbers a browser would feed them.

use ratatui::layout::{Position, Rect};

use crate::grid::{flow, GridColumns, GridRenderer};
use crate::layout::{DashboardLayout, Point};

/// Pixel width of one terminal cell.
pub const CELL_WIDTH_PX: f64 = 10.0;
/// Pixel height of one terminal cell.
pub const CELL_HEIGHT_PX: f64 = 20.0;

/// Pointer location, in pixels, of the terminal cell `(column, row)`.
pub fn cell_to_point(column: u16, row: u16) -> Point {
    Point::new(
        f64::from(column) * CELL_WIDTH_PX,
        f64::from(row) * CELL_HEIGHT_PX,
    )
}

/// Viewport width in pixels for an area `width` cells wide.
pub fn viewport_px(width: u16) -> u32 {
    (f64::from(width) * CELL_WIDTH_PX) as u32
}

fn px_to_rows(px: u32) -> u16 {
    u16::try_from((f64::from(px) / CELL_HEIGHT_PX).round() as u32).unwrap_or(u16::MAX)
}

/// Screen rectangle of one rendered widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRect {
    /// Id of the widget drawn here.
    pub id: String,
    /// Full rectangle, clipped to the grid area.
    pub area: Rect,
}

impl WidgetRect {
    /// The top border row, used as the drag handle.
    pub fn is_title_bar(&self, column: u16, row: u16) -> bool {
        row == self.area.y && self.area.contains(Position::new(column, row))
    }

    /// The bottom-right corner cell, used as the resize handle.
    pub fn is_resize_handle(&self, column: u16, row: u16) -> bool {
        !self.area.is_empty()
            && column == self.area.right() - 1
            && row == self.area.bottom() - 1
    }
}

/// Widget rectangles from the last render pass, in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridGeometry {
    /// Column mode chosen for the area; `None` before the first render.
    pub columns: Option<GridColumns>,
    /// Rendered widgets, in render order.
    pub rects: Vec<WidgetRect>,
}

impl GridGeometry {
    /// Lays `layout` out inside `area`.
    ///
    /// Widgets whose rows fall below the area are left out.
    pub fn compute(renderer: GridRenderer, layout: &DashboardLayout, area: Rect) -> Self {
        let columns = GridColumns::for_viewport(viewport_px(area.width));
        let renderer = renderer.with_columns(columns);
        let items = renderer.items(layout);
        let placed = flow(&items, columns);

        let count = u16::try_from(columns.count()).unwrap_or(1).max(1);
        let column_width = area.width / count;

        let rects = items
            .iter()
            .zip(&placed.placements)
            .filter_map(|(item, placement)| {
                let column = u16::try_from(placement.column).ok()?;
                let span = u16::try_from(placement.span).ok()?;
                let top = px_to_rows(placed.row_offset_px(placement.row));
                let height = px_to_rows(placed.row_heights[placement.row]);
                let rect = Rect::new(
                    area.x.saturating_add(column.saturating_mul(column_width)),
                    area.y.saturating_add(top),
                    span.saturating_mul(column_width),
                    height,
                )
                .intersection(area);
                (!rect.is_empty()).then(|| WidgetRect {
                    id: item.widget.id.clone(),
                    area: rect,
                })
            })
            .collect();

        Self {
            columns: Some(columns),
            rects,
        }
    }

    /// Widget under the cell `(column, row)`.
    pub fn widget_at(&self, column: u16, row: u16) -> Option<&WidgetRect> {
        self.rects
            .iter()
            .find(|r| r.area.contains(Position::new(column, row)))
    }

    /// Rectangle of the widget with `id`.
    pub fn rect(&self, id: &str) -> Option<&WidgetRect> {
        self.rects.iter().find(|r| r.id == id)
    }

    /// Widget ids in render order.
    pub fn order(&self) -> Vec<&str> {
        self.rects.iter().map(|r| r.id.as_str()).collect()
    }
}
