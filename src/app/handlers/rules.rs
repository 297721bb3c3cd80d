//! Rule creation and deletion
//!
//! Handles:
//! - Routing keys to the rule form and submitting its command
//! - Multi-select deletion behind a confirmation dialog
//! - Completion of both, including inline errors for a rejected rule

use crate::app::confirm::{ConfirmDialog, ConfirmOutcome};
use crate::app::forms::FormOutcome;
use crate::app::{Completion, Effect, Key, Screen, State};
use crate::core::ufw::is_error_output;

/// Handles a key on the create rule screen
pub(crate) fn handle_create_rule_key(state: &mut State, key: Key) -> Effect {
    let Screen::CreateRule(form) = &mut state.screen else {
        return Effect::None;
    };

    match form.update(&key, state.ufw.tool()) {
        FormOutcome::Editing => Effect::None,
        FormOutcome::Cancel => {
            state.screen = Screen::Home;
            Effect::None
        }
        FormOutcome::Submit(command) => {
            tracing::info!("Creating rule: {command}");
            Effect::Run {
                commands: vec![command],
                completion: Completion::RuleCreated,
            }
        }
    }
}

/// Commits a created rule, or shows the tool's complaint inside the form
pub(crate) fn handle_rule_created(state: &mut State, output: &str) -> Effect {
    if is_error_output(output)
        && let Screen::CreateRule(form) = &mut state.screen
    {
        form.error = Some(output.trim().to_string());
        return Effect::None;
    }

    state.screen = Screen::Home;
    Effect::Batch(vec![state.notify(output), Effect::Reload])
}

/// Handles a key on the delete rule screen
pub(crate) fn handle_delete_rule_key(state: &mut State, key: Key) -> Effect {
    if let Some(dialog) = &mut state.delete_dialog {
        let outcome = dialog.update(&key);
        if outcome.is_terminal() {
            state.delete_dialog = None;
        }
        return match outcome {
            ConfirmOutcome::Yes => delete_rules(state),
            _ => Effect::None,
        };
    }

    match key {
        k if k.is_list_up() => state.rules.prev(),
        k if k.is_list_down() => state.rules.next(),
        Key::Char(' ') => state.rules.toggle(),
        Key::Char('d') | Key::Delete if !state.rules.is_empty() => {
            let prompt = if state.rules.none_selected() {
                "Are you sure you want to delete this rule?"
            } else {
                "Are you sure you want to delete selected rules?"
            };
            state.delete_dialog = Some(ConfirmDialog::new(prompt));
        }
        Key::Esc => {
            state.screen = Screen::Home;
            return Effect::Reload;
        }
        _ => {}
    }
    Effect::None
}

/// Builds the deletion batch for the focused rule or the selection.
///
/// Indices are positional, so they are deleted highest first: removing a
/// rule never shifts one that is still waiting to be deleted.
fn delete_rules(state: &State) -> Effect {
    let mut indices: Vec<usize> = state
        .rules
        .action_targets()
        .into_iter()
        .map(|rule| rule.index)
        .collect();
    if indices.is_empty() {
        return Effect::None;
    }
    indices.sort_unstable_by(|a, b| b.cmp(a));

    Effect::Run {
        commands: indices
            .into_iter()
            .map(|index| state.ufw.delete_rule(index))
            .collect(),
        completion: Completion::RulesDeleted,
    }
}

pub(crate) fn handle_rules_deleted(state: &mut State, output: &str) -> Effect {
    state.rules.focus_first();
    Effect::Batch(vec![state.notify(output), Effect::Reload])
}
