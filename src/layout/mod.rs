//! Layout model for the dashboard grid.
//!
//! A [`DashboardLayout`] is the full set of widget placements for one
//! organization. Each [`WidgetConfig`] places one widget on a 12-column grid
//! via a [`WidgetPosition`] measured in grid units. The layout is persisted
//! as a single JSON value; field names follow the wire format
//! (`isVisible`, `lastModified`).

mod presets;

pub use presets::{default_layout, DEFAULT_WIDGET_COUNT};

use crate::widgets::WidgetType;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of columns in the dashboard grid.
pub const GRID_COLUMNS: i32 = 12;

/// Current layout schema version.
pub const LAYOUT_VERSION: u32 = 1;

/// Opaque, type-specific widget configuration.
pub type WidgetSettings = serde_json::Map<String, Value>;

/// Stored fields this crate does not model, written back unchanged.
pub type ExtraFields = serde_json::Map<String, Value>;

/// A width/height pair in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Width in columns.
    pub w: i32,
    /// Height in rows.
    pub h: i32,
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.w, self.h)
    }
}

/// A pointer location in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
}

impl Point {
    /// Creates a point from pixel coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Placement of one widget on the grid, in grid units.
///
/// Valid placements satisfy `0 <= x`, `0 <= y`, `1 <= w`, `1 <= h` and
/// `x + w <= GRID_COLUMNS`. Values read from storage are not validated;
/// the grid renderer clamps them for display without writing them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetPosition {
    /// Column of the left edge.
    pub x: i32,
    /// Row of the top edge.
    pub y: i32,
    /// Width in columns.
    pub w: i32,
    /// Height in rows.
    pub h: i32,
}

impl WidgetPosition {
    /// Creates a position from its four components.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The `(w, h)` part of the position.
    pub fn size(&self) -> GridSize {
        GridSize {
            w: self.w,
            h: self.h,
        }
    }

    /// Row just below this widget.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns `true` if the placement satisfies the grid invariants.
    pub fn is_within_grid(&self) -> bool {
        self.x >= 0 && self.y >= 0 && self.w >= 1 && self.h >= 1 && self.x + self.w <= GRID_COLUMNS
    }

    /// Applies the fields present in `patch`, leaving the others unchanged.
    pub fn merge(&mut self, patch: PositionPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.w {
            self.w = w;
        }
        if let Some(h) = patch.h {
            self.h = h;
        }
    }
}

/// A partial [`WidgetPosition`] update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionPatch {
    /// New column, if changing.
    pub x: Option<i32>,
    /// New row, if changing.
    pub y: Option<i32>,
    /// New width, if changing.
    pub w: Option<i32>,
    /// New height, if changing.
    pub h: Option<i32>,
}

impl PositionPatch {
    /// Patch that moves the widget to `(x, y)`.
    pub fn moved_to(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that resizes the widget to `size`.
    pub fn resized_to(size: GridSize) -> Self {
        Self {
            w: Some(size.w),
            h: Some(size.h),
            ..Self::default()
        }
    }

    /// Patch that replaces every field with those of `position`.
    pub fn replace_with(position: WidgetPosition) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            w: Some(position.w),
            h: Some(position.h),
        }
    }
}

/// One widget placed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Identity used for drag tracking and removal. Never reused.
    pub id: String,
    /// Kind of widget.
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    /// Grid placement.
    pub position: WidgetPosition,
    /// Widget-local configuration passed through to the widget body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<WidgetSettings>,
    /// Explicit visibility flag; absent means visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Unknown stored fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl WidgetConfig {
    /// Creates a visible widget with no settings.
    pub fn new(id: impl Into<String>, widget_type: WidgetType, position: WidgetPosition) -> Self {
        Self {
            id: id.into(),
            widget_type,
            position,
            settings: None,
            is_visible: None,
            extra: ExtraFields::new(),
        }
    }

    /// Returns `false` only when the widget was explicitly hidden.
    pub fn is_visible(&self) -> bool {
        self.is_visible != Some(false)
    }
}

fn default_version() -> u32 {
    LAYOUT_VERSION
}

/// Reads `version`, treating anything but an unsigned integer as current.
fn lenient_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(LAYOUT_VERSION))
}

/// Reads `lastModified`. Timestamps without an offset are taken as UTC;
/// anything unparsable is dropped rather than rejecting the layout.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Some(s) = value.as_str() else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    Ok(s.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc()))
}

/// The full set of widget placements for one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayout {
    /// Schema version.
    #[serde(default = "default_version", deserialize_with = "lenient_version")]
    pub version: u32,
    /// Widget placements. Order carries no meaning; render order is derived
    /// from positions.
    pub widgets: Vec<WidgetConfig>,
    /// Time of the last successful save.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<DateTime<Utc>>,
    /// Unknown stored fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl DashboardLayout {
    /// Creates a layout holding `widgets`, never saved.
    pub fn new(widgets: Vec<WidgetConfig>) -> Self {
        Self {
            version: LAYOUT_VERSION,
            widgets,
            last_modified: None,
            extra: ExtraFields::new(),
        }
    }

    /// Looks up a widget by id.
    pub fn widget(&self, id: &str) -> Option<&WidgetConfig> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Looks up a widget by id for mutation.
    pub fn widget_mut(&mut self, id: &str) -> Option<&mut WidgetConfig> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    /// Returns `true` if any widget has the given type.
    pub fn contains_type(&self, widget_type: &WidgetType) -> bool {
        self.widgets.iter().any(|w| &w.widget_type == widget_type)
    }

    /// First free row below every widget (0 for an empty layout).
    pub fn next_free_row(&self) -> i32 {
        self.widgets
            .iter()
            .map(|w| w.position.bottom())
            .max()
            .unwrap_or(0)
            .max(0)
    }
}
