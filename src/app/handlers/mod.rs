//! Message handlers organized by screen
//!
//! Each handler takes the whole [`State`] mutably and returns the [`Effect`]
//! to execute. Key handlers are only reached when their screen is active and
//! no command is outstanding.

pub mod defaults;
pub mod effects;
pub mod home;
pub mod profiles;
pub mod rules;

#[cfg(test)]
pub mod test_utils;

pub(crate) use defaults::*;
pub(crate) use home::*;
pub(crate) use profiles::*;
pub(crate) use rules::*;

use crate::app::{Completion, Effect, State};

/// Routes a finished command batch to the screen that requested it
pub(crate) fn handle_command_finished(
    state: &mut State,
    completion: Completion,
    output: &str,
) -> Effect {
    tracing::debug!("Command batch finished: {completion:?}");
    match completion {
        Completion::Reset | Completion::FirewallToggled | Completion::LoggingToggled => {
            handle_home_command_finished(state, output)
        }
        Completion::Exported => state.notify(output),
        Completion::RuleCreated => handle_rule_created(state, output),
        Completion::RulesDeleted => handle_rules_deleted(state, output),
        Completion::ProfilesAllowed => state.notify(output),
        Completion::ProfilesInstalled | Completion::ProfilesDeleted => {
            handle_profiles_changed(state, output)
        }
        Completion::ProfileCreated => handle_profile_created(state, output),
        Completion::DefaultsUpdated => handle_defaults_updated(state, output),
    }
}
