use super::{render_dialog, render_list_screen, row_prefix};
use crate::app::State;
use ratatui::Frame;
use ratatui::layout::Rect;

pub(super) fn render(frame: &mut Frame, area: Rect, state: &State) {
    if let Some(dialog) = &state.delete_dialog {
        render_dialog(frame, area, dialog);
        return;
    }

    let rows = state
        .rules
        .iter()
        .map(|(rule, focused, selected)| {
            (
                format!("{} {}", row_prefix(focused, selected), rule.raw_line),
                focused,
            )
        })
        .collect();

    render_list_screen(
        frame,
        area,
        "Focus rule to delete:",
        rows,
        "↑↓ to navigate, d to delete, Space to select, Esc to cancel",
    );
}
