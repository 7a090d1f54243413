//! Studio Dashboard library
//!
//! A widget layout engine for a dashboard page: a 12-column grid of typed
//! widgets that users rearrange, resize, add and remove in an explicit edit
//! mode. The layout is persisted per organization through a pluggable
//! settings service, written back once when an edit session ends.
//!
//! The engine is UI-agnostic. [`store::LayoutStore`] owns the layout,
//! [`grid`] turns it into render items and drives drag-to-swap,
//! [`chrome`] holds the per-widget edit controls and [`picker`] the
//! catalog dialog. The [`tui`] module hosts all of it in a terminal.

/// Configuration file loading, defaults and XDG path resolution.
pub mod config;

/// Per-widget edit controls: size presets, resize handle and remove.
pub mod chrome;

/// Grid rendering, auto-flow placement and drag-to-swap.
pub mod grid;

/// Layout data model and the built-in default layout.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// User-visible notifications.
pub mod notify;

/// Widget catalog picker.
pub mod picker;

/// Organization settings service and its implementations.
pub mod settings;

/// Single-owner layout store with save-on-exit persistence.
pub mod store;

/// TUI module providing the terminal layout editor.
pub mod tui;

/// Widget type registry.
pub mod widgets;

pub use layout::{DashboardLayout, GridSize, WidgetConfig, WidgetPosition};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use settings::{SettingsError, SettingsService};
pub use store::{LayoutStore, LoadOutcome};
pub use widgets::{WidgetRegistry, WidgetType};
