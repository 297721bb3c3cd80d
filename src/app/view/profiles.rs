use super::{focused_style, heading_style, render_dialog, render_list_screen, row_prefix};
use crate::app::ProfilesScreen;
use crate::app::ProfilesView;
use crate::app::selection::MultiSelectionList;
use crate::core::profiles::Profile;
use crate::utils::truncate_string;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

const NAME_WIDTH: usize = 20;
const TITLE_WIDTH: usize = 45;

pub(super) fn render(frame: &mut Frame, area: Rect, screen: &ProfilesScreen) {
    match &screen.view {
        ProfilesView::Menu => render_menu(frame, area, screen),
        ProfilesView::Installed => {
            if let Some(dialog) = &screen.delete_dialog {
                render_dialog(frame, area, dialog);
                return;
            }
            render_list_screen(
                frame,
                area,
                "Focus profile:",
                profile_rows(&screen.installed),
                "↑↓ to navigate, d to delete, Space to select, Enter to enable profile, Esc to cancel",
            );
        }
        ProfilesView::Catalog => render_list_screen(
            frame,
            area,
            "Focus profile to install:",
            profile_rows(&screen.installable),
            "↑↓ to navigate, Space to select, Enter to create profile, Esc to cancel",
        ),
        ProfilesView::Create(form) => super::forms::render_profile_form(frame, area, form),
    }
}

fn render_menu(frame: &mut Frame, area: Rect, screen: &ProfilesScreen) {
    let mut lines = vec![Line::styled("Focus profile action:", heading_style())];
    for (action, focused) in screen.menu.iter() {
        let text = format!("{}{}", row_prefix(focused, false), action.title());
        lines.push(if focused {
            Line::styled(text, focused_style())
        } else {
            Line::from(text)
        });
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// `name | title | ports` rows with fixed-width columns
fn profile_rows(list: &MultiSelectionList<Profile>) -> Vec<(String, bool)> {
    list.iter()
        .map(|(profile, focused, selected)| {
            let row = format!(
                "{} {:<NAME_WIDTH$} | {:<TITLE_WIDTH$} | {}",
                row_prefix(focused, selected),
                truncate_string(&profile.name, NAME_WIDTH),
                truncate_string(&profile.title, TITLE_WIDTH),
                profile.ports.join(", "),
            );
            (row, focused)
        })
        .collect()
}
