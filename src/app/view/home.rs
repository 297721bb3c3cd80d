use super::{focused_style, heading_style, render_dialog, row_prefix};
use crate::app::State;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Width of the menu column, separator included
const MENU_WIDTH: u16 = 32;

/// Menu on the left, raw `status verbose` output on the right
pub(super) fn render(frame: &mut Frame, area: Rect, state: &State) {
    if let Some(dialog) = &state.reset_dialog {
        render_dialog(frame, area, dialog);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
        .split(area);

    let mut menu = vec![
        Line::default(),
        Line::styled("UFW Firewall Menu:", heading_style()),
        Line::default(),
    ];
    for (action, focused) in state.menu.iter() {
        let text = format!("{}{}", row_prefix(focused, false), action.title());
        menu.push(if focused {
            Line::styled(text, focused_style())
        } else {
            Line::from(text)
        });
    }
    frame.render_widget(
        Paragraph::new(menu).block(Block::default().borders(Borders::RIGHT)),
        columns[0],
    );

    let status: Vec<Line> = state
        .status_text
        .lines()
        .map(|line| Line::from(format!(" {line}")))
        .collect();
    frame.render_widget(Paragraph::new(status), columns[1]);
}
