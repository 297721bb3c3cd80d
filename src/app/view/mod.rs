//! Rendering
//!
//! Every function here reads [`State`] and draws; nothing mutates it. Each
//! screen is a list of text lines with a `>` marking focus and a `*` marking
//! multi-selection, followed by a help line. The notification sits in its own
//! area at the bottom so it survives screen changes.

mod forms;
mod home;
mod profiles;
mod rules;

use crate::app::confirm::ConfirmDialog;
use crate::app::{Screen, State};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

pub const BUSY_TEXT: &str = "Running command, please wait...";

/// Tallest the notification area grows before wrapping text is cut off
const MAX_NOTIFICATION_HEIGHT: u16 = 8;

pub(crate) fn focused_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn heading_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn help_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub(crate) fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Two-column marker: focus then selection
pub(crate) fn row_prefix(focused: bool, selected: bool) -> &'static str {
    match (focused, selected) {
        (true, true) => ">*",
        (true, false) => "> ",
        (false, true) => " *",
        (false, false) => "  ",
    }
}

/// Draws the whole screen for `state`
pub fn render(frame: &mut Frame, state: &State) {
    let area = frame.area();

    if state.is_busy() {
        frame.render_widget(Paragraph::new(BUSY_TEXT), area);
        return;
    }

    let notification_height = state
        .notification
        .as_deref()
        .map_or(0, |text| {
            u16::try_from(text.lines().count() + 1).unwrap_or(MAX_NOTIFICATION_HEIGHT)
        })
        .min(MAX_NOTIFICATION_HEIGHT);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                      // Screen
            Constraint::Length(notification_height), // Notification
        ])
        .split(area);

    match &state.screen {
        Screen::Home => home::render(frame, chunks[0], state),
        Screen::CreateRule(form) => forms::render_rule_form(frame, chunks[0], form),
        Screen::DeleteRule => rules::render(frame, chunks[0], state),
        Screen::Profiles => profiles::render(frame, chunks[0], &state.profiles),
        Screen::SetDefaults(editor) => forms::render_defaults(frame, chunks[0], editor),
    }

    if let Some(text) = &state.notification {
        render_notification(frame, chunks[1], text);
    }
}

fn render_notification(frame: &mut Frame, area: Rect, text: &str) {
    let mut lines = vec![Line::default()];
    lines.extend(text.lines().map(|line| Line::from(line.to_string())));
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Draws a confirmation dialog in place of the screen it guards
pub(crate) fn render_dialog(frame: &mut Frame, area: Rect, dialog: &ConfirmDialog) {
    let mut lines = vec![
        Line::styled(dialog.prompt().to_string(), heading_style()),
        Line::default(),
    ];
    for (choice, focused) in dialog.options().iter() {
        let text = format!("{}{}", row_prefix(focused, false), choice.label());
        lines.push(if focused {
            Line::styled(text, focused_style())
        } else {
            Line::from(text)
        });
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// A heading, a scrolling list that keeps the focused row visible, and a
/// help line under it
pub(crate) fn render_list_screen(
    frame: &mut Frame,
    area: Rect,
    heading: &str,
    rows: Vec<(String, bool)>,
    help: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Min(0),    // Rows
            Constraint::Length(2), // Help
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::styled(heading.to_string(), heading_style())),
        chunks[0],
    );

    let focused = rows.iter().position(|(_, focused)| *focused);
    let items: Vec<ListItem> = rows
        .into_iter()
        .map(|(text, focused)| {
            if focused {
                ListItem::new(Line::styled(text, focused_style()))
            } else {
                ListItem::new(Line::from(text))
            }
        })
        .collect();
    let mut list_state = ListState::default().with_selected(focused);
    frame.render_stateful_widget(List::new(items), chunks[1], &mut list_state);

    render_help(frame, chunks[2], help);
}

pub(crate) fn render_help(frame: &mut Frame, area: Rect, help: &str) {
    let lines = vec![Line::default(), Line::styled(help.to_string(), help_style())];
    frame.render_widget(Paragraph::new(lines), area);
}
