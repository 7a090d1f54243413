//! Event handling for the layout editor.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.

use crate::chrome::SizePreset;
use crate::picker::{catalog, entry_count};
use crate::settings::SettingsService;
use crate::tui::app::App;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                            return Ok(Event::Key(key))
                        }
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore focus, paste and key release events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No further action; the app state may have changed.
    None,
    /// Quit the application.
    Quit,
}

/// Handles a key event by dispatching to the appropriate app method.
///
/// The open picker captures navigation keys, then a keyboard drag captures
/// movement keys, then the dashboard bindings apply. Layout editing keys
/// only act in edit mode.
pub fn handle_key_event<S: SettingsService + 'static>(app: &mut App<S>, key: KeyEvent) -> Action {
    if should_quit(key) {
        return Action::Quit;
    }

    if app.picker.is_open() {
        handle_picker_key(app, key);
        return Action::None;
    }

    if app.drag.is_dragging() {
        match key.code {
            KeyCode::Left | KeyCode::Up => app.keyboard_drag_step(-1),
            KeyCode::Right | KeyCode::Down => app.keyboard_drag_step(1),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_keyboard_drag(),
            KeyCode::Esc => app.cancel(),
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Char('e') => app.toggle_edit_mode(),
        KeyCode::Tab | KeyCode::Char('j') | KeyCode::Down => app.select_step(1),
        KeyCode::BackTab | KeyCode::Char('k') | KeyCode::Up => app.select_step(-1),
        KeyCode::Esc => app.cancel(),
        KeyCode::Char(' ') => app.toggle_keyboard_drag(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(preset) = c.to_digit(10).and_then(SizePreset::from_digit) {
                app.apply_preset(preset);
            }
        }
        KeyCode::Char('a') => app.open_picker(),
        KeyCode::Char('R') => app.reset_layout(),
        _ => {}
    }
    Action::None
}

fn handle_picker_key<S: SettingsService + 'static>(app: &mut App<S>, key: KeyEvent) {
    let len = entry_count(&catalog(app.store.registry(), app.store.layout()));
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.picker.next(len),
        KeyCode::Char('k') | KeyCode::Up => app.picker.prev(len),
        KeyCode::Enter => app.pick_highlighted(),
        KeyCode::Esc => app.picker.close(),
        _ => {}
    }
}

/// Returns true if the key event should trigger application quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')))
}
