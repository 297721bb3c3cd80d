use super::{error_style, focused_style, heading_style, help_style, row_prefix};
use crate::app::defaults::DefaultPolicyEditor;
use crate::app::forms::{ProfileForm, RuleForm};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

const FORM_HELP: &str = "↑↓ to navigate, ←→ to change, type to edit, Enter to submit, Esc to cancel";

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let text = format!("{}{label}: {value}", row_prefix(focused, false));
    if focused {
        Line::styled(text, focused_style())
    } else {
        Line::from(text)
    }
}

/// Fields, then the inline error if any, then help
fn render_form(
    frame: &mut Frame,
    area: Rect,
    heading: Option<&str>,
    mut lines: Vec<Line<'static>>,
    error: Option<&str>,
    help: &str,
) {
    if let Some(heading) = heading {
        lines.insert(0, Line::styled(heading.to_string(), heading_style()));
    }
    if let Some(error) = error {
        lines.push(Line::default());
        lines.extend(
            error
                .lines()
                .map(|line| Line::styled(line.to_string(), error_style())),
        );
    }
    lines.push(Line::default());
    lines.push(Line::styled(help.to_string(), help_style()));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

pub(super) fn render_rule_form(frame: &mut Frame, area: Rect, form: &RuleForm) {
    let lines = form
        .fields()
        .iter()
        .map(|(field, focused)| field_line(field.label(), &form.value(*field), focused))
        .collect();
    render_form(frame, area, None, lines, form.error.as_deref(), FORM_HELP);
}

pub(super) fn render_profile_form(frame: &mut Frame, area: Rect, form: &ProfileForm) {
    let lines = form
        .fields()
        .iter()
        .map(|(field, focused)| field_line(field.label(), form.value(*field), focused))
        .collect();
    render_form(
        frame,
        area,
        None,
        lines,
        form.error.as_deref(),
        "↑↓ to navigate, type to edit, Enter to submit, Esc to cancel",
    );
}

pub(super) fn render_defaults(frame: &mut Frame, area: Rect, editor: &DefaultPolicyEditor) {
    let lines = editor
        .rows()
        .map(|(direction, action, focused)| {
            let value = match editor.replaced(direction) {
                Some(current) => format!("{action} (currently {current})"),
                None => action.to_string(),
            };
            field_line(direction.label(), &value, focused)
        })
        .collect();
    render_form(
        frame,
        area,
        Some("Default Rules:"),
        lines,
        None,
        "↑↓ to navigate, ←→ to change, Enter to submit, Esc to cancel",
    );
}
