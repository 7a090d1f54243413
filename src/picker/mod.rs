//! Widget catalog picker.
//!
//! Lists every registered widget type grouped by category. Types already
//! on the dashboard are listed but disabled. That is a picker policy only:
//! [`LayoutStore::add_widget`] accepts duplicates, and a layout holding two
//! widgets of one type is valid.

use crate::layout::DashboardLayout;
use crate::notify::Notifier;
use crate::settings::SettingsService;
use crate::store::LayoutStore;
use crate::widgets::{WidgetCategory, WidgetDefinition, WidgetRegistry, WidgetType};

/// One selectable row in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Registry entry for the type.
    pub definition: &'static WidgetDefinition,
    /// The type is already placed and cannot be added again here.
    pub disabled: bool,
}

/// Entries sharing a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGroup {
    /// Category shared by every entry.
    pub category: WidgetCategory,
    /// Entries in catalog order.
    pub entries: Vec<CatalogEntry>,
}

/// Groups the registry by category, in the order each category first
/// appears in the catalog, marking types present in `layout` as disabled.
pub fn catalog(registry: &WidgetRegistry, layout: &DashboardLayout) -> Vec<CatalogGroup> {
    let mut groups: Vec<CatalogGroup> = Vec::new();
    for definition in registry.iter() {
        let entry = CatalogEntry {
            definition,
            disabled: layout.contains_type(&definition.widget_type),
        };
        match groups
            .iter_mut()
            .find(|g| g.category == definition.category)
        {
            Some(group) => group.entries.push(entry),
            None => groups.push(CatalogGroup {
                category: definition.category,
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// Open/closed state and cursor of the picker dialog.
///
/// The cursor indexes the flattened entry list, group by group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPicker {
    open: bool,
    cursor: usize,
}

impl CatalogPicker {
    /// Creates a closed picker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dialog is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the highlighted entry in the flattened list.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Opens the dialog with the cursor on the first entry.
    pub fn open(&mut self) {
        self.open = true;
        self.cursor = 0;
    }

    /// Hides the dialog.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Moves the cursor down, wrapping after `len` entries.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Moves the cursor up, wrapping before the first entry.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(len - 1).min(len - 1);
        }
    }

    /// Entry under the cursor.
    pub fn highlighted<'a>(&self, groups: &'a [CatalogGroup]) -> Option<&'a CatalogEntry> {
        groups.iter().flat_map(|g| &g.entries).nth(self.cursor)
    }

    /// Adds a widget of `widget_type` and closes the dialog.
    ///
    /// A type already on the dashboard is disabled here: nothing is added
    /// and the dialog stays open. Returns the new widget's id.
    pub fn select<S: SettingsService, N: Notifier>(
        &mut self,
        store: &mut LayoutStore<S, N>,
        widget_type: WidgetType,
    ) -> Option<String> {
        if store.layout().contains_type(&widget_type) {
            tracing::debug!("{} is already on the dashboard", widget_type);
            return None;
        }
        let id = store.add_widget(widget_type);
        self.close();
        Some(id)
    }

    /// Selects the highlighted entry. See [`select`](Self::select).
    pub fn select_highlighted<S: SettingsService, N: Notifier>(
        &mut self,
        store: &mut LayoutStore<S, N>,
    ) -> Option<String> {
        let groups = catalog(store.registry(), store.layout());
        let entry = self.highlighted(&groups)?;
        if entry.disabled {
            return None;
        }
        let widget_type = entry.definition.widget_type.clone();
        self.select(store, widget_type)
    }
}

/// Number of entries across all groups.
pub fn entry_count(groups: &[CatalogGroup]) -> usize {
    groups.iter().map(|g| g.entries.len()).sum()
}
