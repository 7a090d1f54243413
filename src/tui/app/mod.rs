//! Application state and main event loop for the layout editor.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! The [`App`] owns the session's [`LayoutStore`] and routes keyboard and
//! mouse input to the drag context, the widget chrome and the catalog
//! picker. Saves produced when edit mode ends are spawned onto the runtime
//! so input handling never waits on storage.

use crate::chrome::{self, ResizeSession, SizePreset};
use crate::grid::drag::{apply_drop, DragContext};
use crate::grid::GridRenderer;
use crate::notify::{Notification, QueueNotifier};
use crate::picker::CatalogPicker;
use crate::settings::SettingsService;
use crate::store::{LayoutStore, LoadOutcome, SaveRequest};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::geometry::{cell_to_point, GridGeometry};
use crate::tui::ui::render_dashboard;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// How long a notification stays in the status line.
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Core application state for the layout editor.
#[derive(Debug)]
pub struct App<S> {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed.
    pub tick_count: u64,
    /// The session's layout store.
    pub store: LayoutStore<S, QueueNotifier>,
    /// Drag-to-reorder state.
    pub drag: DragContext,
    /// Active resize gesture, if any.
    pub resize: Option<ResizeSession>,
    /// Catalog picker dialog.
    pub picker: CatalogPicker,
    /// Id of the focused widget.
    pub selected: Option<String>,
    /// Latest notification and the time it expires.
    pub status_message: Option<(Notification, Instant)>,
    /// Widget rectangles from the last render pass, used for hit testing.
    pub geometry: GridGeometry,
    notifier: Arc<QueueNotifier>,
    renderer: GridRenderer,
    tick_rate: Duration,
    pending_saves: Vec<SaveRequest<S, QueueNotifier>>,
}

impl<S: SettingsService + 'static> App<S> {
    /// Creates an editor for `org_id` backed by `settings`.
    pub fn new(org_id: impl Into<String>, settings: Arc<S>, tick_rate: Duration) -> Self {
        let notifier = Arc::new(QueueNotifier::new());
        Self {
            should_quit: false,
            tick_count: 0,
            store: LayoutStore::new(org_id, settings, Arc::clone(&notifier)),
            drag: DragContext::new(),
            resize: None,
            picker: CatalogPicker::new(),
            selected: None,
            status_message: None,
            geometry: GridGeometry::default(),
            notifier,
            renderer: GridRenderer::default(),
            tick_rate,
            pending_saves: Vec::new(),
        }
    }

    /// Loads the organization's layout and focuses the first widget.
    pub async fn load(&mut self) -> LoadOutcome {
        let outcome = self.store.load().await;
        self.selected = self.render_order().into_iter().next();
        outcome
    }

    /// Renderer used for ordering and layout.
    pub fn renderer(&self) -> GridRenderer {
        self.renderer
    }

    /// Ids of renderable widgets in render order.
    pub fn render_order(&self) -> Vec<String> {
        self.renderer
            .items(self.store.layout())
            .iter()
            .map(|item| item.widget.id.clone())
            .collect()
    }

    /// Saves waiting to be spawned, oldest first.
    pub fn take_pending_saves(&mut self) -> Vec<SaveRequest<S, QueueNotifier>> {
        std::mem::take(&mut self.pending_saves)
    }

    /// Count of saves waiting to be spawned.
    pub fn pending_save_count(&self) -> usize {
        self.pending_saves.len()
    }

    /// Flips edit mode. Leaving edit mode queues the save and abandons any
    /// gesture in progress.
    pub fn toggle_edit_mode(&mut self) {
        if let Some(save) = self.store.toggle_edit_mode() {
            self.pending_saves.push(save);
        }
        if !self.store.is_editing() {
            self.drag.cancel();
            self.resize = None;
            self.picker.close();
        }
    }

    /// Moves focus `step` places through the render order, wrapping.
    pub fn select_step(&mut self, step: isize) {
        let order = self.render_order();
        if order.is_empty() {
            self.selected = None;
            return;
        }
        let len = order.len() as isize;
        let current = self
            .selected
            .as_ref()
            .and_then(|id| order.iter().position(|o| o == id));
        let next = match current {
            Some(i) => (i as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        };
        self.selected = order.get(next as usize).cloned();
    }

    /// Removes the focused widget and focuses the next one.
    pub fn remove_selected(&mut self) {
        let Some(id) = self.selected.clone() else {
            return;
        };
        let order = self.render_order();
        let index = order.iter().position(|o| *o == id);
        if chrome::remove(&mut self.store, &id) {
            let remaining = self.render_order();
            self.selected = index
                .and_then(|i| remaining.get(i.min(remaining.len().saturating_sub(1))))
                .cloned();
        }
    }

    /// Applies `preset` to the focused widget.
    pub fn apply_preset(&mut self, preset: SizePreset) {
        if let Some(id) = self.selected.as_deref() {
            chrome::apply_preset(&mut self.store, id, preset);
        }
    }

    /// Opens the catalog picker (edit mode only).
    pub fn open_picker(&mut self) {
        if self.store.is_editing() {
            self.picker.open();
        }
    }

    /// Adds the highlighted catalog entry and focuses it.
    pub fn pick_highlighted(&mut self) {
        if let Some(id) = self.picker.select_highlighted(&mut self.store) {
            self.selected = Some(id);
        }
    }

    /// Replaces the layout with the default (edit mode only).
    pub fn reset_layout(&mut self) {
        if self.store.is_editing() {
            self.store.reset_to_default();
            self.drag.cancel();
            self.selected = self.render_order().into_iter().next();
        }
    }

    /// Space: picks up the focused widget, or drops the one being carried.
    pub fn toggle_keyboard_drag(&mut self) {
        if self.drag.is_dragging() {
            if let Some(end) = self.drag.keyboard_drop() {
                apply_drop(&mut self.store, &end);
                self.selected = Some(end.active);
            }
        } else if self.store.is_editing() {
            if let Some(id) = self.selected.as_deref() {
                self.drag.keyboard_pick_up(id);
            }
        }
    }

    /// Moves the keyboard drop target.
    pub fn keyboard_drag_step(&mut self, step: isize) {
        let order = self.render_order();
        let order: Vec<&str> = order.iter().map(String::as_str).collect();
        self.drag.keyboard_move(step, &order);
    }

    /// Esc: cancels the innermost thing in progress.
    pub fn cancel(&mut self) {
        if self.picker.is_open() {
            self.picker.close();
        } else if self.drag.is_dragging() || self.resize.is_some() {
            self.drag.cancel();
            self.resize = None;
        } else {
            self.selected = None;
        }
    }

    /// Handles a mouse event.
    ///
    /// In edit mode a press on a title bar arms a drag and a press on the
    /// bottom-right corner starts a resize. Outside edit mode clicks only
    /// change focus.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let point = cell_to_point(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(hit) = self.geometry.widget_at(mouse.column, mouse.row).cloned() else {
                    return;
                };
                self.selected = Some(hit.id.clone());
                if !self.store.is_editing() || self.picker.is_open() {
                    return;
                }
                if hit.is_resize_handle(mouse.column, mouse.row) {
                    self.resize = chrome::begin_resize(&self.store, &hit.id, point);
                } else if hit.is_title_bar(mouse.column, mouse.row) {
                    self.drag.pointer_down(&hit.id, point);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(session) = &self.resize {
                    chrome::continue_resize(&mut self.store, session, point);
                } else {
                    let over = self
                        .geometry
                        .widget_at(mouse.column, mouse.row)
                        .map(|r| r.id.clone());
                    self.drag.pointer_move(point, over.as_deref());
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.resize.take().is_some() {
                    return;
                }
                if let Some(end) = self.drag.pointer_up() {
                    apply_drop(&mut self.store, &end);
                }
            }
            _ => {}
        }
    }

    /// Moves queued notifications into the status line.
    pub fn drain_notifications(&mut self) {
        if let Some(latest) = self.notifier.drain().pop() {
            self.status_message = Some((latest, Instant::now() + STATUS_MESSAGE_TTL));
        }
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Runs the editor: sets up the terminal, enters the event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        self.load().await;
        setup_terminal()?;
        let result = self.event_loop().await;
        restore_terminal()?;
        result
    }

    async fn event_loop(&mut self) -> io::Result<()> {
        let mut saves: Vec<JoinHandle<()>> = Vec::new();
        let result = self.drive(&mut saves).await;
        // Runs on error too, so an open edit session is never lost.
        self.finish(saves).await;
        result
    }

    async fn drive(&mut self, saves: &mut Vec<JoinHandle<()>>) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        loop {
            self.drain_notifications();
            terminal.draw(|frame| render_dashboard(frame, self))?;

            match event_handler.next(&mut reader).await? {
                Event::Key(key) => {
                    if handle_key_event(self, key) == Action::Quit {
                        self.should_quit = true;
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message();
                }
                Event::Resize(_, _) => {}
            }

            self.spawn_pending_saves(saves);
            saves.retain(|handle| !handle.is_finished());

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn spawn_pending_saves(&mut self, saves: &mut Vec<JoinHandle<()>>) {
        for save in self.take_pending_saves() {
            saves.push(tokio::spawn(async move {
                // The outcome is reported through the notifier.
                let _ = save.run().await;
            }));
        }
    }

    /// Ends an open edit session and waits for every save to complete.
    ///
    /// Called on every way out of the editor, including I/O errors.
    pub async fn finish(&mut self, mut saves: Vec<JoinHandle<()>>) {
        if self.store.is_editing() {
            self.toggle_edit_mode();
        }
        self.spawn_pending_saves(&mut saves);
        for handle in saves {
            if let Err(e) = handle.await {
                tracing::warn!("layout save task failed: {}", e);
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests;
