//! Built-in default layout.
//!
//! Adopted the first time an organization has no persisted layout, after a
//! failed load, and by `reset_to_default`. Eight widgets fill the first
//! eight rows of the grid without overlapping:
//!
//! ```text
//! row 0-1  | quick-write | quick-actions | brand-health | ai-usage |
//! row 2-4  | campaign-performance (8)              | calendar (4) |
//! row 5-7  | recent-assets (6)        | team-activity (6)         |
//! ```

use super::{DashboardLayout, WidgetConfig, WidgetPosition};
use crate::widgets::WidgetType;

/// Count of widgets in the default layout.
pub const DEFAULT_WIDGET_COUNT: usize = 8;

/// Returns a fresh copy of the default layout.
pub fn default_layout() -> DashboardLayout {
    let placements = [
        ("w1", WidgetType::QuickWrite, WidgetPosition::new(0, 0, 3, 2)),
        ("w2", WidgetType::QuickActions, WidgetPosition::new(3, 0, 3, 2)),
        ("w3", WidgetType::BrandHealth, WidgetPosition::new(6, 0, 3, 2)),
        ("w4", WidgetType::AiUsage, WidgetPosition::new(9, 0, 3, 2)),
        ("w5", WidgetType::CampaignPerformance, WidgetPosition::new(0, 2, 8, 3)),
        ("w6", WidgetType::ContentCalendar, WidgetPosition::new(8, 2, 4, 3)),
        ("w7", WidgetType::RecentAssets, WidgetPosition::new(0, 5, 6, 3)),
        ("w8", WidgetType::TeamActivity, WidgetPosition::new(6, 5, 6, 3)),
    ];
    DashboardLayout::new(
        placements
            .into_iter()
            .map(|(id, widget_type, position)| WidgetConfig::new(id, widget_type, position))
            .collect(),
    )
}
