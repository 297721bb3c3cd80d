//! Home screen: menu, reset confirmation, reload results
//!
//! Handles:
//! - Menu navigation and activation
//! - The reset confirmation dialog
//! - Applying a reload snapshot to status, menu, rules and profiles
//! - Completion of enable/disable, logging and reset commands

use crate::app::confirm::{ConfirmDialog, ConfirmOutcome};
use crate::app::defaults::DefaultPolicyEditor;
use crate::app::forms::RuleForm;
use crate::app::menu::{MenuAction, build_menu};
use crate::app::{Completion, Effect, Key, ProfilesView, Screen, Snapshot, State};
use crate::core::status;

/// Handles a key on the home screen
pub(crate) fn handle_home_key(state: &mut State, key: Key) -> Effect {
    if let Some(dialog) = &mut state.reset_dialog {
        let outcome = dialog.update(&key);
        if outcome.is_terminal() {
            state.reset_dialog = None;
        }
        return match outcome {
            ConfirmOutcome::Yes => Effect::Run {
                commands: vec![state.ufw.reset()],
                completion: Completion::Reset,
            },
            _ => Effect::None,
        };
    }

    if key.is_list_up() {
        state.menu.prev();
    } else if key.is_list_down() {
        state.menu.next();
    } else if key == Key::Enter
        && let Some(action) = state.menu.focused().copied()
    {
        return handle_menu_action(state, action);
    }
    Effect::None
}

/// Activates a home menu entry
pub(crate) fn handle_menu_action(state: &mut State, action: MenuAction) -> Effect {
    match action {
        MenuAction::Enable => run_home(vec![state.ufw.enable()], Completion::FirewallToggled),
        MenuAction::Disable => {
            state.menu.focus_first();
            run_home(vec![state.ufw.disable()], Completion::FirewallToggled)
        }
        MenuAction::EnableLogging => {
            run_home(vec![state.ufw.logging(true)], Completion::LoggingToggled)
        }
        MenuAction::DisableLogging => {
            run_home(vec![state.ufw.logging(false)], Completion::LoggingToggled)
        }
        MenuAction::SetDefaults => match status::parse_default_policies(&state.status_text) {
            Ok(policies) => {
                state.screen = Screen::SetDefaults(DefaultPolicyEditor::new(&policies));
                Effect::None
            }
            Err(e) => {
                tracing::warn!("Cannot edit default policies: {e}");
                state.notify(e.to_string())
            }
        },
        MenuAction::Profiles => {
            state.profiles.view = ProfilesView::Menu;
            state.profiles.menu.focus_first();
            state.screen = Screen::Profiles;
            Effect::None
        }
        MenuAction::CreateRule => {
            state.screen = Screen::CreateRule(RuleForm::new());
            Effect::None
        }
        MenuAction::DeleteRule => {
            state.delete_dialog = None;
            state.screen = Screen::DeleteRule;
            Effect::None
        }
        MenuAction::ExportRules => Effect::Export,
        MenuAction::Reset => {
            state.reset_dialog = Some(ConfirmDialog::new("Are you sure you want to reset UFW?"));
            Effect::None
        }
        MenuAction::Quit => Effect::Quit,
    }
}

fn run_home(commands: Vec<String>, completion: Completion) -> Effect {
    Effect::Run {
        commands,
        completion,
    }
}

/// Shows the output of a home menu command and refreshes
pub(crate) fn handle_home_command_finished(state: &mut State, output: &str) -> Effect {
    Effect::Batch(vec![state.notify(output), Effect::Reload])
}

/// Applies freshly read tool output to every screen's data
pub(crate) fn handle_reloaded(state: &mut State, snapshot: Snapshot) {
    state.status = status::parse_verbose_status(&snapshot.status_text);
    state.status_text = snapshot.status_text;
    state.menu.set_items(build_menu(state.status));
    state
        .rules
        .set_items(status::parse_numbered_rules(&snapshot.rules_text));
    state.profiles.set_installed(snapshot.profiles);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Message;
    use crate::app::handlers::test_utils::{create_test_state, loaded_state};
    use crate::core::firewall::{Action, PolicyDirection};

    fn focus_menu(state: &mut State, action: MenuAction) {
        assert!(state.menu.focus(&action), "{action:?} not in menu");
    }

    #[test]
    fn test_reload_builds_menu_rules_and_profiles() {
        let state = loaded_state();
        assert!(state.status.enabled);
        assert!(state.status.logging_on);
        assert_eq!(state.menu.len(), 9);
        assert_eq!(state.rules.len(), 3);
        assert_eq!(state.profiles.installed.len(), 1);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_disabled_firewall_menu() {
        let mut state = create_test_state();
        handle_reloaded(
            &mut state,
            Snapshot {
                status_text: "Status: inactive\n".into(),
                ..Snapshot::default()
            },
        );
        assert_eq!(
            state.menu.items(),
            &[MenuAction::Enable, MenuAction::Reset, MenuAction::Quit]
        );
        assert!(state.rules.is_empty());
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut state = loaded_state();
        state.update(Message::Key(Key::Char('k')));
        assert_eq!(state.menu.focused(), Some(&MenuAction::Quit));
        state.update(Message::Key(Key::Down));
        assert_eq!(state.menu.focused(), Some(&MenuAction::Disable));
    }

    #[test]
    fn test_enable_runs_command_and_marks_busy() {
        let mut state = create_test_state();
        handle_reloaded(
            &mut state,
            Snapshot {
                status_text: "Status: inactive\n".into(),
                ..Snapshot::default()
            },
        );
        let effect = state.update(Message::Key(Key::Enter));
        assert_eq!(
            effect,
            Effect::Run {
                commands: vec!["ufw --force enable".into()],
                completion: Completion::FirewallToggled
            }
        );
        assert!(state.is_busy());
    }

    #[test]
    fn test_command_finished_notifies_and_reloads() {
        let mut state = loaded_state();
        state.update(Message::Key(Key::Enter));
        let effect = state.update(Message::CommandFinished {
            completion: Completion::FirewallToggled,
            output: "Firewall stopped and disabled on system startup\n".into(),
        });

        assert_eq!(
            state.notification.as_deref(),
            Some("Firewall stopped and disabled on system startup")
        );
        assert!(effect.leaves().contains(&&Effect::Reload));
        // the reload keeps the screen busy until it lands
        assert!(state.is_busy());
    }

    #[test]
    fn test_logging_toggle() {
        let mut state = loaded_state();
        focus_menu(&mut state, MenuAction::DisableLogging);
        assert_eq!(
            state.update(Message::Key(Key::Enter)),
            Effect::Run {
                commands: vec!["ufw logging off".into()],
                completion: Completion::LoggingToggled
            }
        );
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut state = loaded_state();
        focus_menu(&mut state, MenuAction::Reset);

        assert_eq!(state.update(Message::Key(Key::Enter)), Effect::None);
        assert!(state.reset_dialog.is_some());

        // menu keys go to the dialog while it is open
        state.update(Message::Key(Key::Down));
        assert_eq!(state.menu.focused(), Some(&MenuAction::Reset));
        state.update(Message::Key(Key::Up));

        let effect = state.update(Message::Key(Key::Enter));
        assert_eq!(
            effect,
            Effect::Run {
                commands: vec!["ufw --force reset".into()],
                completion: Completion::Reset
            }
        );
        assert!(state.reset_dialog.is_none());
    }

    #[test]
    fn test_reset_declined() {
        let mut state = loaded_state();
        focus_menu(&mut state, MenuAction::Reset);
        state.update(Message::Key(Key::Enter));
        state.update(Message::Key(Key::Down));
        assert_eq!(state.update(Message::Key(Key::Enter)), Effect::None);
        assert!(state.reset_dialog.is_none());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_set_defaults_opens_editor() {
        let mut state = loaded_state();
        focus_menu(&mut state, MenuAction::SetDefaults);
        state.update(Message::Key(Key::Enter));

        let Screen::SetDefaults(editor) = &state.screen else {
            panic!("expected defaults editor, got {:?}", state.screen);
        };
        assert_eq!(editor.action(PolicyDirection::Incoming), Action::Deny);
    }

    #[test]
    fn test_set_defaults_parse_error_notifies() {
        let mut state = loaded_state();
        state.status_text = "Status: active\n".into();
        let effect = handle_menu_action(&mut state, MenuAction::SetDefaults);

        assert_eq!(state.screen, Screen::Home);
        assert!(matches!(effect, Effect::ExpireNotification(_)));
        assert!(
            state
                .notification
                .as_deref()
                .is_some_and(|n| n.contains("default policy"))
        );
    }

    #[test]
    fn test_create_rule_always_fresh_form() {
        let mut state = loaded_state();
        focus_menu(&mut state, MenuAction::CreateRule);
        state.update(Message::Key(Key::Enter));
        state.update(Message::Key(Key::Char('8')));
        state.update(Message::Key(Key::Esc));
        assert_eq!(state.screen, Screen::Home);

        state.update(Message::Key(Key::Enter));
        assert_eq!(state.screen, Screen::CreateRule(RuleForm::new()));
    }

    #[test]
    fn test_export_and_quit() {
        let mut state = loaded_state();
        assert_eq!(handle_menu_action(&mut state, MenuAction::ExportRules), Effect::Export);
        assert_eq!(handle_menu_action(&mut state, MenuAction::Quit), Effect::Quit);
    }
}
