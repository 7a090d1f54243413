//! Rendering for the layout editor.
//!
//! Composes the header, the widget grid and the footer, plus the catalog
//! picker overlay when it is open. Grid rectangles come from
//! [`GridGeometry`] and are stored back on the [`App`] for mouse hit testing.

use crate::chrome::{SizePreset, WidgetChrome};
use crate::notify::NotificationLevel;
use crate::picker::catalog;
use crate::settings::SettingsService;
use crate::tui::app::App;
use crate::tui::geometry::{GridGeometry, WidgetRect};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

/// Header text displayed at the top of the editor.
const HEADER_TEXT: &str = "Studio Dashboard";

/// Footer hints outside edit mode.
const FOOTER_VIEW: &str = "[Tab] Focus  [e] Edit layout  [q] Quit";

/// Footer hints in edit mode.
const FOOTER_EDIT: &str =
    "[e] Done  [Space] Move  [x] Remove  [1-5] Size  [a] Add  [R] Reset  [q] Quit";

/// Footer hints while a widget is carried with the keyboard.
const FOOTER_CARRY: &str = "[←/→] Choose target  [Space] Drop  [Esc] Cancel";

/// Glyph drawn on the resize handle.
pub const RESIZE_HANDLE: &str = "◢";

/// Glyph prefixed to titles in edit mode.
pub const DRAG_HANDLE: &str = "⠿";

/// Renders the full editor.
pub fn render_dashboard<S: SettingsService + 'static>(frame: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // grid
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    app.geometry = GridGeometry::compute(app.renderer(), app.store.layout(), chunks[1]);
    let rects = app.geometry.rects.clone();
    for rect in &rects {
        render_widget(frame, app, rect);
    }
    if rects.is_empty() {
        let hint = if app.store.is_editing() {
            "No widgets. Press [a] to add one."
        } else {
            "No widgets. Press [e] then [a] to add one."
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }

    render_footer(frame, app, chunks[2]);

    if app.picker.is_open() {
        render_picker(frame, app, chunks[1]);
    }
}

fn render_header<S: SettingsService + 'static>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (badge, badge_style) = if app.store.is_editing() {
        (
            " EDITING ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (" VIEW ", Style::default().fg(Color::DarkGray))
    };
    let org = format!("  {}", app.store.org_id());
    let used = HEADER_TEXT.chars().count() + org.chars().count() + badge.chars().count();
    let padding = (area.width as usize).saturating_sub(used);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(HEADER_TEXT, Style::default().fg(Color::Cyan)),
        Span::styled(org, Style::default().fg(Color::Gray)),
        Span::raw(" ".repeat(padding)),
        Span::styled(badge, badge_style),
    ]));
    frame.render_widget(header, area);
}

fn render_widget<S: SettingsService + 'static>(
    frame: &mut Frame,
    app: &App<S>,
    rect: &WidgetRect,
) {
    let Some(widget) = app.store.widget(&rect.id) else {
        return;
    };
    let Some(definition) = app.store.registry().get(&widget.widget_type) else {
        return;
    };
    let chrome = WidgetChrome::for_widget(widget, app.store.is_editing());

    let is_selected = app.selected.as_deref() == Some(rect.id.as_str());
    let is_carried = app.drag.active_id() == Some(rect.id.as_str());
    let is_target = !is_carried && app.drag.over_id() == Some(rect.id.as_str());
    let border_color = if is_carried {
        Color::Magenta
    } else if is_target {
        Color::Cyan
    } else if is_selected {
        Color::Yellow
    } else if chrome.drag_handle {
        Color::Gray
    } else {
        Color::DarkGray
    };

    let mut title = Vec::new();
    if chrome.drag_handle {
        title.push(Span::styled(
            format!("{DRAG_HANDLE} "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    title.push(Span::styled(
        format!("{} {}", definition.icon, definition.name),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title_top(Line::from(title));
    if chrome.remove_button {
        block = block.title_top(
            Line::from(Span::styled("[x]", Style::default().fg(Color::Red))).right_aligned(),
        );
    }
    if chrome.size_menu {
        let presets: Vec<&str> = SizePreset::ALL.iter().map(|p| p.label()).collect();
        block = block.title_bottom(Line::from(Span::styled(
            presets.join(" "),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(label) = &chrome.size_label {
        block = block.title_bottom(Line::from(label.as_str()).right_aligned());
    }

    let body_style = if chrome.body_interactive {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut body = vec![Line::from(definition.description)];
    if let Some(settings) = widget.settings.as_ref().filter(|s| !s.is_empty()) {
        body.push(Line::from(format!("{} settings", settings.len())));
    }
    let paragraph = Paragraph::new(body)
        .style(body_style)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, rect.area);

    if chrome.resize_handle && rect.area.width >= 2 && rect.area.height >= 2 {
        let corner = (rect.area.right() - 1, rect.area.bottom() - 1);
        if let Some(cell) = frame.buffer_mut().cell_mut(corner) {
            cell.set_symbol(RESIZE_HANDLE)
                .set_style(Style::default().fg(border_color));
        }
    }
}

fn render_footer<S: SettingsService + 'static>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let line = match &app.status_message {
        Some((notification, expiry)) if Instant::now() < *expiry => {
            let color = match notification.level {
                NotificationLevel::Success => Color::Green,
                NotificationLevel::Error => Color::Red,
            };
            Line::from(Span::styled(
                notification.message.clone(),
                Style::default().fg(color),
            ))
        }
        _ => {
            let hints = if app.drag.is_dragging() {
                FOOTER_CARRY
            } else if app.store.is_editing() {
                FOOTER_EDIT
            } else {
                FOOTER_VIEW
            };
            Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_picker<S: SettingsService + 'static>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let groups = catalog(app.store.registry(), app.store.layout());
    let cursor = app.picker.cursor();

    let mut lines = Vec::new();
    let mut index = 0usize;
    for group in &groups {
        lines.push(Line::from(Span::styled(
            group.category.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for entry in &group.entries {
            let def = entry.definition;
            let mut style = if entry.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            if index == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let mut text = format!("  {} {}", def.icon, def.name);
            if entry.disabled {
                text.push_str("  (on dashboard)");
            }
            lines.push(Line::from(Span::styled(text, style)));
            index += 1;
        }
    }

    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup = centered(area, 44, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title_top(Line::from(" Add widget "))
                .title_bottom(Line::from(" [j/k] Move  [Enter] Add  [Esc] Close ")),
        ),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
