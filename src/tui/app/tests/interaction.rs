use super::*;
use crate::layout::{GridSize, WidgetPosition};
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

fn make_mouse_event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn press(app: &mut App<InMemorySettings>, column: u16, row: u16) {
    app.handle_mouse_event(make_mouse_event(
        MouseEventKind::Down(MouseButton::Left),
        column,
        row,
    ));
}

fn drag_to(app: &mut App<InMemorySettings>, column: u16, row: u16) {
    app.handle_mouse_event(make_mouse_event(
        MouseEventKind::Drag(MouseButton::Left),
        column,
        row,
    ));
}

fn release(app: &mut App<InMemorySettings>, column: u16, row: u16) {
    app.handle_mouse_event(make_mouse_event(
        MouseEventKind::Up(MouseButton::Left),
        column,
        row,
    ));
}

/// Lays the grid out the way a 120x40 terminal would: header on row 0.
fn lay_out(app: &mut App<InMemorySettings>) {
    app.geometry = GridGeometry::compute(app.renderer(), app.store.layout(), Rect::new(0, 1, 120, 38));
}

async fn editing_app() -> App<InMemorySettings> {
    let mut app = make_app().await;
    app.toggle_edit_mode();
    lay_out(&mut app);
    app
}

#[tokio::test]
async fn test_click_focuses_widget() {
    let mut app = make_app().await;
    lay_out(&mut app);
    press(&mut app, 65, 4);
    release(&mut app, 65, 4);
    assert_eq!(app.selected.as_deref(), Some("w3"));
}

#[tokio::test]
async fn test_click_outside_widgets_keeps_focus() {
    let mut app = make_app().await;
    lay_out(&mut app);
    press(&mut app, 5, 37);
    assert_eq!(app.selected.as_deref(), Some("w1"));
}

#[tokio::test]
async fn test_title_drag_swaps_widgets() {
    let mut app = editing_app().await;
    press(&mut app, 5, 1);
    drag_to(&mut app, 20, 2);
    drag_to(&mut app, 40, 4);
    assert_eq!(app.drag.over_id(), Some("w2"));
    release(&mut app, 40, 4);

    assert_eq!(position(&app, "w1"), WidgetPosition::new(3, 0, 3, 2));
    assert_eq!(position(&app, "w2"), WidgetPosition::new(0, 0, 3, 2));
    assert_eq!(position(&app, "w3"), WidgetPosition::new(6, 0, 3, 2));
    assert!(!app.drag.is_dragging());
}

#[tokio::test]
async fn test_press_and_release_in_place_is_a_click() {
    let mut app = editing_app().await;
    let before = app.store.layout().clone();
    press(&mut app, 5, 1);
    drag_to(&mut app, 5, 1);
    release(&mut app, 5, 1);
    assert_eq!(app.store.layout(), &before);
}

#[tokio::test]
async fn test_body_press_does_not_start_drag() {
    let mut app = editing_app().await;
    let before = app.store.layout().clone();
    press(&mut app, 5, 4);
    drag_to(&mut app, 40, 4);
    release(&mut app, 40, 4);
    assert_eq!(app.store.layout(), &before);
}

#[tokio::test]
async fn test_drag_ignored_outside_edit_mode() {
    let mut app = make_app().await;
    lay_out(&mut app);
    let before = app.store.layout().clone();
    press(&mut app, 5, 1);
    drag_to(&mut app, 40, 4);
    release(&mut app, 40, 4);
    assert_eq!(app.store.layout(), &before);
}

#[tokio::test]
async fn test_corner_drag_resizes_live() {
    let mut app = editing_app().await;
    // w1 occupies columns 0..30 and rows 1..9.
    press(&mut app, 29, 8);
    assert!(app.resize.is_some());

    // 20 cells right is 200px: two columns. 4 rows down is 80px: one row.
    drag_to(&mut app, 49, 12);
    assert_eq!(position(&app, "w1").size(), GridSize { w: 5, h: 3 });

    // Far outside the widget the clamp holds.
    drag_to(&mut app, 0, 1);
    assert_eq!(position(&app, "w1").size(), GridSize { w: 2, h: 2 });

    release(&mut app, 0, 1);
    assert!(app.resize.is_none());
    assert_eq!(position(&app, "w1").x, 0);
}

#[tokio::test]
async fn test_escape_cancels_pointer_drag() {
    let mut app = editing_app().await;
    let before = app.store.layout().clone();
    press(&mut app, 5, 1);
    drag_to(&mut app, 40, 4);
    app.cancel();
    release(&mut app, 40, 4);
    assert_eq!(app.store.layout(), &before);
}
