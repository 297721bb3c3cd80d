//! Default policy screen

use crate::app::forms::FormOutcome;
use crate::app::{Completion, Effect, Key, Screen, State};
use crate::core::ufw::is_error_output;

/// Handles a key on the default policy editor
pub(crate) fn handle_set_defaults_key(state: &mut State, key: Key) -> Effect {
    let Screen::SetDefaults(editor) = &mut state.screen else {
        return Effect::None;
    };

    match editor.update(&key) {
        FormOutcome::Editing => Effect::None,
        FormOutcome::Cancel => {
            state.screen = Screen::Home;
            Effect::Reload
        }
        FormOutcome::Submit(policies) => Effect::Run {
            commands: policies
                .into_iter()
                .map(|(direction, action)| state.ufw.set_default(direction, action))
                .collect(),
            completion: Completion::DefaultsUpdated,
        },
    }
}

/// Shows the tool output and refreshes status; the editor stays open
pub(crate) fn handle_defaults_updated(state: &mut State, output: &str) -> Effect {
    if !is_error_output(output)
        && let Screen::SetDefaults(editor) = &mut state.screen
    {
        editor.commit();
    }
    Effect::Batch(vec![state.notify(output), Effect::Reload])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Message;
    use crate::app::defaults::DefaultPolicyEditor;
    use crate::app::handlers::test_utils::loaded_state;
    use crate::core::firewall::{DefaultPolicies, PolicyDirection};

    fn defaults_screen() -> State {
        let mut state = loaded_state();
        let policies = DefaultPolicies {
            incoming: "deny".into(),
            outgoing: "allow".into(),
            routed: "disabled".into(),
        };
        state.screen = Screen::SetDefaults(DefaultPolicyEditor::new(&policies));
        state
    }

    #[test]
    fn test_enter_issues_three_commands() {
        let mut state = defaults_screen();
        state.update(Message::Key(Key::Right));

        assert_eq!(
            state.update(Message::Key(Key::Enter)),
            Effect::Run {
                commands: vec![
                    "ufw default reject incoming".into(),
                    "ufw default allow outgoing".into(),
                    "ufw default allow routed".into(),
                ],
                completion: Completion::DefaultsUpdated
            }
        );
    }

    #[test]
    fn test_update_keeps_editor_open() {
        let mut state = defaults_screen();
        state.update(Message::Key(Key::Enter));
        let effect = state.update(Message::CommandFinished {
            completion: Completion::DefaultsUpdated,
            output: "Default incoming policy changed to 'reject'\n".into(),
        });

        let Screen::SetDefaults(editor) = &state.screen else {
            panic!("editor closed");
        };
        assert_eq!(editor.replaced(PolicyDirection::Routed), None);
        assert!(effect.leaves().contains(&&Effect::Reload));
    }

    #[test]
    fn test_failed_update_keeps_reported_policy() {
        let mut state = defaults_screen();
        state.update(Message::Key(Key::Enter));
        state.update(Message::CommandFinished {
            completion: Completion::DefaultsUpdated,
            output: "Error: exit status: 1\n".into(),
        });

        let Screen::SetDefaults(editor) = &state.screen else {
            panic!("editor closed");
        };
        assert_eq!(editor.replaced(PolicyDirection::Routed), Some("disabled"));
    }

    #[test]
    fn test_esc_returns_home_with_reload() {
        let mut state = defaults_screen();
        assert_eq!(state.update(Message::Key(Key::Esc)), Effect::Reload);
        assert_eq!(state.screen, Screen::Home);
    }
}
