//! Grid renderer for the dashboard.
//!
//! Turns a [`DashboardLayout`] into an ordered list of [`RenderItem`]s ready
//! for display:
//!
//! - items are ordered by `(y, x)`, which is also keyboard and screen-reader
//!   traversal order
//! - widgets of unrecognized types and explicitly hidden widgets are skipped
//! - geometry is clamped to the registry bounds for display only; the stored
//!   layout is never rewritten here
//! - width and height map to a column-span class and a minimum height, with
//!   a medium fallback for values outside the table
//!
//! [`flow`] then places the items the way a CSS grid with row auto-flow
//! places span-only children, which is what hosts use to compute on-screen
//! rectangles. Reordering lives in [`drag`].

pub mod drag;

use crate::layout::{DashboardLayout, WidgetConfig, WidgetPosition, GRID_COLUMNS};
use crate::widgets::{WidgetDefinition, WidgetRegistry};

/// Height of one grid row in pixels.
pub const ROW_HEIGHT_PX: u32 = 80;

/// Viewports narrower than this collapse to a single column.
pub const COLLAPSE_BREAKPOINT_PX: u32 = 768;

/// Smallest width or height shown on screen, in grid units.
pub const MIN_RENDER_SPAN: i32 = 2;

/// Tallest widget shown on screen when the registry sets no maximum.
pub const MAX_RENDER_HEIGHT: i32 = 6;

/// Span class used when a width is outside `1..=12`.
pub const FALLBACK_SPAN_CLASS: &str = "col-span-4";

/// Minimum height used when a height is outside `1..=6`.
pub const FALLBACK_MIN_HEIGHT_PX: u32 = 160;

const SPAN_CLASSES: [&str; 12] = [
    "col-span-1",
    "col-span-2",
    "col-span-3",
    "col-span-4",
    "col-span-5",
    "col-span-6",
    "col-span-7",
    "col-span-8",
    "col-span-9",
    "col-span-10",
    "col-span-11",
    "col-span-12",
];

/// Column-span class for a width in grid columns.
pub fn col_span_class(w: i32) -> &'static str {
    usize::try_from(w)
        .ok()
        .and_then(|w| w.checked_sub(1))
        .and_then(|i| SPAN_CLASSES.get(i))
        .copied()
        .unwrap_or(FALLBACK_SPAN_CLASS)
}

/// Minimum pixel height for a height in grid rows.
pub fn min_height_px(h: i32) -> u32 {
    match u32::try_from(h) {
        Ok(rows @ 1..=6) => rows * ROW_HEIGHT_PX,
        _ => FALLBACK_MIN_HEIGHT_PX,
    }
}

/// Clamps a stored position into something displayable.
///
/// Width is held to `[max(2, min_width), min(12, max_width)]`, height to
/// `[max(2, min_height), max_height or 6]`, then `x` is pulled back so the
/// widget ends inside the grid. The result always satisfies `0 <= x`,
/// `x + w <= 12`, `w >= 2`, `h >= 2`.
pub fn clamp_for_render(position: &WidgetPosition, def: &WidgetDefinition) -> WidgetPosition {
    let min_w = def.min_width.max(MIN_RENDER_SPAN).min(GRID_COLUMNS);
    let max_w = def.max_width.unwrap_or(GRID_COLUMNS).min(GRID_COLUMNS).max(min_w);
    let min_h = def.min_height.max(MIN_RENDER_SPAN);
    let max_h = def.max_height.unwrap_or(MAX_RENDER_HEIGHT).max(min_h);

    let w = position.w.clamp(min_w, max_w);
    let h = position.h.clamp(min_h, max_h);
    WidgetPosition {
        x: position.x.clamp(0, GRID_COLUMNS - w),
        y: position.y.max(0),
        w,
        h,
    }
}

/// Widgets in display order: by row, then by column.
///
/// The sort is stable, so widgets sharing a slot keep their stored order.
pub fn render_order(widgets: &[WidgetConfig]) -> Vec<&WidgetConfig> {
    let mut ordered: Vec<&WidgetConfig> = widgets.iter().collect();
    ordered.sort_by_key(|w| (w.position.y, w.position.x));
    ordered
}

/// Column mode of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridColumns {
    /// The full 12-column grid.
    Full,
    /// Single column for narrow viewports; every widget spans it.
    Collapsed,
}

impl GridColumns {
    /// Picks the column mode for a viewport width in pixels.
    pub fn for_viewport(width_px: u32) -> Self {
        if width_px < COLLAPSE_BREAKPOINT_PX {
            GridColumns::Collapsed
        } else {
            GridColumns::Full
        }
    }

    /// Number of grid columns in this mode.
    pub fn count(self) -> i32 {
        match self {
            GridColumns::Full => GRID_COLUMNS,
            GridColumns::Collapsed => 1,
        }
    }
}

/// One widget prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem<'a> {
    /// The stored widget.
    pub widget: &'a WidgetConfig,
    /// Registry entry for the widget's type.
    pub definition: &'static WidgetDefinition,
    /// Clamped geometry used for display.
    pub geometry: WidgetPosition,
    /// Columns spanned in the current column mode.
    pub span: i32,
    /// Column-span class for the clamped width.
    pub span_class: &'static str,
    /// Minimum height in pixels for the clamped height.
    pub min_height_px: u32,
}

/// Builds render items for a layout.
#[derive(Debug, Clone, Copy)]
pub struct GridRenderer {
    registry: WidgetRegistry,
    columns: GridColumns,
}

impl GridRenderer {
    /// Creates a full-width renderer over `registry`.
    pub fn new(registry: WidgetRegistry) -> Self {
        Self {
            registry,
            columns: GridColumns::Full,
        }
    }

    /// Returns a copy of this renderer using `columns`.
    pub fn with_columns(mut self, columns: GridColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Current column mode.
    pub fn columns(&self) -> GridColumns {
        self.columns
    }

    /// Renderable widgets of `layout` in display order.
    pub fn items<'a>(&self, layout: &'a DashboardLayout) -> Vec<RenderItem<'a>> {
        render_order(&layout.widgets)
            .into_iter()
            .filter(|w| w.is_visible())
            .filter_map(|widget| {
                let Some(definition) = self.registry.get(&widget.widget_type) else {
                    tracing::debug!(
                        "skipping widget {} of unrecognized type {}",
                        widget.id,
                        widget.widget_type
                    );
                    return None;
                };
                let geometry = clamp_for_render(&widget.position, definition);
                let span = match self.columns {
                    GridColumns::Full => geometry.w,
                    GridColumns::Collapsed => 1,
                };
                Some(RenderItem {
                    widget,
                    definition,
                    geometry,
                    span,
                    span_class: col_span_class(geometry.w),
                    min_height_px: min_height_px(geometry.h),
                })
            })
            .collect()
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new(WidgetRegistry::new())
    }
}

/// Where an item landed after auto-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// First column occupied.
    pub column: i32,
    /// Grid row index.
    pub row: usize,
    /// Columns occupied.
    pub span: i32,
}

/// Result of [`flow`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridFlow {
    /// One placement per input item, in input order.
    pub placements: Vec<Placement>,
    /// Height of each grid row: the tallest minimum height placed in it.
    pub row_heights: Vec<u32>,
}

impl GridFlow {
    /// Total height of all rows in pixels.
    pub fn total_height_px(&self) -> u32 {
        self.row_heights.iter().sum()
    }

    /// Pixel offset of the top of `row`.
    pub fn row_offset_px(&self, row: usize) -> u32 {
        self.row_heights.iter().take(row).sum()
    }
}

/// Places items left to right, wrapping to a new row whenever the next span
/// does not fit in what is left of the current one.
///
/// The cursor never moves back to fill earlier gaps.
pub fn flow(items: &[RenderItem<'_>], columns: GridColumns) -> GridFlow {
    let total = columns.count();
    let mut out = GridFlow::default();
    let mut column = 0;
    let mut row = 0usize;

    for item in items {
        let span = item.span.clamp(1, total);
        if column + span > total {
            row += 1;
            column = 0;
        }
        if out.row_heights.len() <= row {
            out.row_heights.resize(row + 1, 0);
        }
        out.row_heights[row] = out.row_heights[row].max(item.min_height_px);
        out.placements.push(Placement { column, row, span });
        column += span;
    }
    out
}
