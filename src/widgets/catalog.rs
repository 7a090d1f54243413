//! Built-in widget definitions.

use super::{WidgetCategory, WidgetDefinition, WidgetType};
use crate::layout::GridSize;

const fn size(w: i32, h: i32) -> GridSize {
    GridSize { w, h }
}

/// The static widget catalog, one entry per known [`WidgetType`].
pub static CATALOG: [WidgetDefinition; 12] = [
    WidgetDefinition {
        widget_type: WidgetType::QuickWrite,
        name: "Quick Write",
        description: "Draft a post or caption with your brand voice",
        icon: "✎",
        default_size: size(3, 2),
        min_width: 2,
        min_height: 2,
        max_width: Some(6),
        max_height: Some(4),
        category: WidgetCategory::Content,
    },
    WidgetDefinition {
        widget_type: WidgetType::QuickActions,
        name: "Quick Actions",
        description: "Shortcuts to upload, generate and schedule",
        icon: "⚡",
        default_size: size(3, 2),
        min_width: 2,
        min_height: 2,
        max_width: Some(6),
        max_height: Some(3),
        category: WidgetCategory::Content,
    },
    WidgetDefinition {
        widget_type: WidgetType::BrandHealth,
        name: "Brand Health",
        description: "Consistency score across recent content",
        icon: "♥",
        default_size: size(3, 2),
        min_width: 2,
        min_height: 2,
        max_width: Some(6),
        max_height: Some(4),
        category: WidgetCategory::Analytics,
    },
    WidgetDefinition {
        widget_type: WidgetType::AiUsage,
        name: "AI Usage",
        description: "Generation credits used this billing period",
        icon: "◎",
        default_size: size(3, 2),
        min_width: 2,
        min_height: 2,
        max_width: Some(6),
        max_height: Some(3),
        category: WidgetCategory::Ai,
    },
    WidgetDefinition {
        widget_type: WidgetType::CampaignPerformance,
        name: "Campaign Performance",
        description: "Reach and engagement for active campaigns",
        icon: "▲",
        default_size: size(8, 3),
        min_width: 4,
        min_height: 2,
        max_width: None,
        max_height: Some(6),
        category: WidgetCategory::Analytics,
    },
    WidgetDefinition {
        widget_type: WidgetType::ContentCalendar,
        name: "Content Calendar",
        description: "What is going out this week",
        icon: "▦",
        default_size: size(4, 3),
        min_width: 3,
        min_height: 2,
        max_width: None,
        max_height: Some(6),
        category: WidgetCategory::Content,
    },
    WidgetDefinition {
        widget_type: WidgetType::RecentAssets,
        name: "Recent Assets",
        description: "Latest uploads to the asset library",
        icon: "▣",
        default_size: size(6, 3),
        min_width: 3,
        min_height: 2,
        max_width: None,
        max_height: Some(6),
        category: WidgetCategory::Assets,
    },
    WidgetDefinition {
        widget_type: WidgetType::TeamActivity,
        name: "Team Activity",
        description: "Who changed what, most recent first",
        icon: "☰",
        default_size: size(6, 3),
        min_width: 3,
        min_height: 2,
        max_width: None,
        max_height: Some(6),
        category: WidgetCategory::Team,
    },
    WidgetDefinition {
        widget_type: WidgetType::StorageUsage,
        name: "Storage Usage",
        description: "Asset library storage against plan quota",
        icon: "◔",
        default_size: size(3, 2),
        min_width: 2,
        min_height: 2,
        max_width: Some(6),
        max_height: Some(3),
        category: WidgetCategory::Assets,
    },
    WidgetDefinition {
        widget_type: WidgetType::DarkRoomGallery,
        name: "Dark Room Gallery",
        description: "Your latest AI generated images",
        icon: "◐",
        default_size: size(6, 3),
        min_width: 3,
        min_height: 2,
        max_width: None,
        max_height: Some(6),
        category: WidgetCategory::Ai,
    },
    WidgetDefinition {
        widget_type: WidgetType::ScheduledPosts,
        name: "Scheduled Posts",
        description: "Posts queued for publishing",
        icon: "⏲",
        default_size: size(4, 3),
        min_width: 3,
        min_height: 2,
        max_width: Some(8),
        max_height: Some(6),
        category: WidgetCategory::Content,
    },
    WidgetDefinition {
        widget_type: WidgetType::Announcements,
        name: "Announcements",
        description: "News from your workspace admins",
        icon: "✉",
        default_size: size(4, 2),
        min_width: 2,
        min_height: 2,
        max_width: None,
        max_height: Some(4),
        category: WidgetCategory::Team,
    },
];
