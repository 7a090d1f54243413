//! Widget registry for the studio dashboard.
//!
//! This module defines the [`WidgetType`] identifiers that may appear in a
//! persisted layout and the [`WidgetRegistry`], a static catalog mapping each
//! known type to its display metadata and grid size constraints.
//!
//! # Architecture
//!
//! The registry is configuration, not state. Every entry is a `'static`
//! [`WidgetDefinition`] and nothing in the engine mutates it. The store reads
//! `default_size` when adding a widget, the grid renderer reads the min/max
//! bounds when clamping geometry, and the catalog picker groups entries by
//! [`WidgetCategory`].
//!
//! # Example
//!
//! ```
//! use studio_dashboard::widgets::{WidgetRegistry, WidgetType};
//!
//! let registry = WidgetRegistry::new();
//! let def = registry.get(&WidgetType::QuickWrite).expect("quick-write is registered");
//! assert_eq!(def.default_size.w, 3);
//! assert!(registry.get(&WidgetType::from("retired-widget")).is_none());
//! ```

mod catalog;

use crate::layout::GridSize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub use catalog::CATALOG;

/// Identifier of a widget kind.
///
/// Serialized as a kebab-case string. Strings that do not name a known type
/// deserialize to [`WidgetType::Unrecognized`] and are written back verbatim,
/// so a layout saved by a newer (or older) release never fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetType {
    /// Quick content composer.
    QuickWrite,
    /// Shortcut buttons to common flows.
    QuickActions,
    /// Brand consistency score.
    BrandHealth,
    /// AI credit consumption.
    AiUsage,
    /// Campaign metrics chart.
    CampaignPerformance,
    /// Upcoming publishing calendar.
    ContentCalendar,
    /// Most recently uploaded assets.
    RecentAssets,
    /// Team activity feed.
    TeamActivity,
    /// Asset storage quota.
    StorageUsage,
    /// Latest Dark Room generations.
    DarkRoomGallery,
    /// Posts queued for publishing.
    ScheduledPosts,
    /// Workspace announcements.
    Announcements,
    /// A type name this build does not know.
    Unrecognized(String),
}

impl WidgetType {
    /// All known widget types, in catalog order.
    pub const KNOWN: [WidgetType; 12] = [
        WidgetType::QuickWrite,
        WidgetType::QuickActions,
        WidgetType::BrandHealth,
        WidgetType::AiUsage,
        WidgetType::CampaignPerformance,
        WidgetType::ContentCalendar,
        WidgetType::RecentAssets,
        WidgetType::TeamActivity,
        WidgetType::StorageUsage,
        WidgetType::DarkRoomGallery,
        WidgetType::ScheduledPosts,
        WidgetType::Announcements,
    ];

    /// Returns the wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            WidgetType::QuickWrite => "quick-write",
            WidgetType::QuickActions => "quick-actions",
            WidgetType::BrandHealth => "brand-health",
            WidgetType::AiUsage => "ai-usage",
            WidgetType::CampaignPerformance => "campaign-performance",
            WidgetType::ContentCalendar => "content-calendar",
            WidgetType::RecentAssets => "recent-assets",
            WidgetType::TeamActivity => "team-activity",
            WidgetType::StorageUsage => "storage-usage",
            WidgetType::DarkRoomGallery => "dark-room-gallery",
            WidgetType::ScheduledPosts => "scheduled-posts",
            WidgetType::Announcements => "announcements",
            WidgetType::Unrecognized(name) => name,
        }
    }

    /// Returns `true` if this build has a registry entry for the type.
    pub fn is_known(&self) -> bool {
        !matches!(self, WidgetType::Unrecognized(_))
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WidgetType::KNOWN
            .iter()
            .find(|t| t.as_str() == s)
            .cloned()
            .unwrap_or_else(|| WidgetType::Unrecognized(s.to_string())))
    }
}

impl From<&str> for WidgetType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<String> for WidgetType {
    fn from(s: String) -> Self {
        WidgetType::from(s.as_str())
    }
}

impl From<WidgetType> for String {
    fn from(t: WidgetType) -> Self {
        match t {
            WidgetType::Unrecognized(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Grouping used by the catalog picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetCategory {
    /// Writing and publishing.
    Content,
    /// Metrics and reports.
    Analytics,
    /// Asset library.
    Assets,
    /// Image generation.
    Ai,
    /// Collaboration.
    Team,
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WidgetCategory::Content => "Content",
            WidgetCategory::Analytics => "Analytics",
            WidgetCategory::Assets => "Assets",
            WidgetCategory::Ai => "AI",
            WidgetCategory::Team => "Team",
        };
        write!(f, "{}", s)
    }
}

/// Immutable display metadata and size constraints for one widget type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDefinition {
    /// The type this entry describes.
    pub widget_type: WidgetType,
    /// Human-readable name.
    pub name: &'static str,
    /// One-line description shown in the catalog.
    pub description: &'static str,
    /// Icon reference resolved by the host (glyph in the terminal editor).
    pub icon: &'static str,
    /// Size used when the widget is added.
    pub default_size: GridSize,
    /// Minimum width in grid columns.
    pub min_width: i32,
    /// Minimum height in grid rows.
    pub min_height: i32,
    /// Maximum width in grid columns, if bounded.
    pub max_width: Option<i32>,
    /// Maximum height in grid rows, if bounded.
    pub max_height: Option<i32>,
    /// Catalog grouping.
    pub category: WidgetCategory,
}

/// Lookup over the static widget catalog.
///
/// # Example
///
/// ```
/// use studio_dashboard::widgets::{WidgetCategory, WidgetRegistry};
///
/// let registry = WidgetRegistry::new();
/// assert_eq!(registry.len(), 12);
/// assert!(registry
///     .iter()
///     .any(|d| d.category == WidgetCategory::Ai));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WidgetRegistry {
    definitions: &'static [WidgetDefinition],
}

impl WidgetRegistry {
    /// Creates a registry over the built-in catalog.
    pub fn new() -> Self {
        Self {
            definitions: &CATALOG,
        }
    }

    /// Returns the definition for `widget_type`, or `None` when the type is
    /// not registered.
    pub fn get(&self, widget_type: &WidgetType) -> Option<&'static WidgetDefinition> {
        self.definitions
            .iter()
            .find(|d| &d.widget_type == widget_type)
    }

    /// Iterates over all definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'static WidgetDefinition> {
        self.definitions.iter()
    }

    /// Count of registered widget types.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_type_is_registered_once() {
        let reg = WidgetRegistry::new();
        for t in WidgetType::KNOWN.iter() {
            let count = reg.iter().filter(|d| &d.widget_type == t).count();
            assert_eq!(count, 1, "expected exactly one entry for '{t}'");
        }
        assert_eq!(reg.len(), WidgetType::KNOWN.len());
    }

    #[test]
    fn test_registry_returns_none_for_unrecognized() {
        let reg = WidgetRegistry::new();
        assert!(reg.get(&WidgetType::from("legacy-widget")).is_none());
        assert!(reg.get(&WidgetType::from("")).is_none());
    }

    #[test]
    fn test_default_sizes_respect_bounds() {
        for def in WidgetRegistry::new().iter() {
            let size = def.default_size;
            assert!(size.w >= def.min_width, "{} default width below min", def.name);
            assert!(size.h >= def.min_height, "{} default height below min", def.name);
            if let Some(max) = def.max_width {
                assert!(size.w <= max, "{} default width above max", def.name);
            }
            if let Some(max) = def.max_height {
                assert!(size.h <= max, "{} default height above max", def.name);
            }
            assert!(size.w <= crate::layout::GRID_COLUMNS);
        }
    }

    #[test]
    fn test_widget_type_parse_and_display() {
        for t in WidgetType::KNOWN.iter() {
            let parsed: WidgetType = t.to_string().parse().expect("infallible");
            assert_eq!(&parsed, t);
        }
        let unknown = WidgetType::from("sunset-widget");
        assert_eq!(unknown, WidgetType::Unrecognized("sunset-widget".to_string()));
        assert_eq!(unknown.to_string(), "sunset-widget");
        assert!(!unknown.is_known());
    }

    #[test]
    fn test_widget_type_serde_uses_wire_names() {
        let json = serde_json::to_string(&WidgetType::BrandHealth).expect("serialize");
        assert_eq!(json, "\"brand-health\"");
        let back: WidgetType = serde_json::from_str("\"dark-room-gallery\"").expect("deserialize");
        assert_eq!(back, WidgetType::DarkRoomGallery);
        let unknown: WidgetType = serde_json::from_str("\"old-thing\"").expect("deserialize");
        assert_eq!(serde_json::to_string(&unknown).expect("serialize"), "\"old-thing\"");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(WidgetCategory::Ai.to_string(), "AI");
        assert_eq!(WidgetCategory::Content.to_string(), "Content");
    }
}
