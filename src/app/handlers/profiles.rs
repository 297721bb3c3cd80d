//! Profiles sub-screen
//!
//! Handles:
//! - The profiles menu (List, Create (from list), Create)
//! - Allowing and deleting installed profiles, batch-capable
//! - Installing catalog profiles, batch-capable
//! - The profile creation form

use crate::app::confirm::{ConfirmDialog, ConfirmOutcome};
use crate::app::forms::{FormOutcome, ProfileForm};
use crate::app::{Completion, Effect, Key, ProfilesMenuAction, ProfilesView, Screen, State};
use crate::core::profiles::Profile;
use crate::core::ufw::is_error_output;

/// Handles a key on the profiles screen, dispatching on the sub-view
pub(crate) fn handle_profiles_key(state: &mut State, key: Key) -> Effect {
    match state.profiles.view {
        ProfilesView::Menu => handle_menu_key(state, key),
        ProfilesView::Installed => handle_installed_key(state, key),
        ProfilesView::Catalog => handle_catalog_key(state, key),
        ProfilesView::Create(_) => handle_create_key(state, key),
    }
}

fn handle_menu_key(state: &mut State, key: Key) -> Effect {
    let profiles = &mut state.profiles;
    match key {
        k if k.is_list_up() => profiles.menu.prev(),
        k if k.is_list_down() => profiles.menu.next(),
        Key::Esc => {
            state.screen = Screen::Home;
            return Effect::Reload;
        }
        Key::Enter => match profiles.menu.focused() {
            Some(ProfilesMenuAction::List) => {
                profiles.installed.clear_selection();
                profiles.installed.focus_first();
                profiles.view = ProfilesView::Installed;
            }
            Some(ProfilesMenuAction::InstallFromCatalog) => {
                profiles.installable.clear_selection();
                profiles.installable.focus_first();
                profiles.view = ProfilesView::Catalog;
            }
            Some(ProfilesMenuAction::Create) => {
                profiles.view = ProfilesView::Create(ProfileForm::new());
            }
            None => {}
        },
        _ => {}
    }
    Effect::None
}

fn handle_installed_key(state: &mut State, key: Key) -> Effect {
    if let Some(dialog) = &mut state.profiles.delete_dialog {
        let outcome = dialog.update(&key);
        if outcome.is_terminal() {
            state.profiles.delete_dialog = None;
        }
        if outcome != ConfirmOutcome::Yes {
            return Effect::None;
        }
        let targets = cloned_targets(&state.profiles.installed.action_targets());
        state.profiles.installed.clear_selection();
        return if targets.is_empty() {
            Effect::None
        } else {
            Effect::DeleteProfiles(targets)
        };
    }

    let installed = &mut state.profiles.installed;
    match key {
        k if k.is_list_up() => installed.prev(),
        k if k.is_list_down() => installed.next(),
        Key::Char(' ') => installed.toggle(),
        Key::Char('d') | Key::Delete if !installed.is_empty() => {
            let prompt = if installed.none_selected() {
                "Are you sure you want to delete this profile?"
            } else {
                "Are you sure you want to delete selected profiles?"
            };
            state.profiles.delete_dialog = Some(ConfirmDialog::new(prompt));
        }
        Key::Esc => {
            state.profiles.view = ProfilesView::Menu;
            state.profiles.menu.focus_first();
        }
        Key::Enter => {
            let commands: Vec<String> = installed
                .action_targets()
                .into_iter()
                .map(|profile| state.ufw.allow_profile(&profile.name))
                .collect();
            if !commands.is_empty() {
                return Effect::Run {
                    commands,
                    completion: Completion::ProfilesAllowed,
                };
            }
        }
        _ => {}
    }
    Effect::None
}

fn handle_catalog_key(state: &mut State, key: Key) -> Effect {
    let installable = &mut state.profiles.installable;
    match key {
        k if k.is_list_up() => installable.prev(),
        k if k.is_list_down() => installable.next(),
        Key::Char(' ') => installable.toggle(),
        Key::Esc => state.profiles.view = ProfilesView::Menu,
        Key::Enter => {
            let profiles = cloned_targets(&installable.action_targets());
            if !profiles.is_empty() {
                return Effect::CreateProfiles {
                    profiles,
                    completion: Completion::ProfilesInstalled,
                };
            }
        }
        _ => {}
    }
    Effect::None
}

fn handle_create_key(state: &mut State, key: Key) -> Effect {
    let ProfilesView::Create(form) = &mut state.profiles.view else {
        return Effect::None;
    };

    match form.update(&key) {
        FormOutcome::Editing => Effect::None,
        FormOutcome::Cancel => {
            state.profiles.view = ProfilesView::Menu;
            Effect::None
        }
        FormOutcome::Submit(profile) => {
            tracing::info!("Creating profile '{}'", profile.name);
            Effect::CreateProfiles {
                profiles: vec![profile],
                completion: Completion::ProfileCreated,
            }
        }
    }
}

fn cloned_targets(targets: &[&Profile]) -> Vec<Profile> {
    targets.iter().map(|&profile| profile.clone()).collect()
}

/// A created profile returns to the profiles menu; a failure stays in the form
pub(crate) fn handle_profile_created(state: &mut State, output: &str) -> Effect {
    if is_error_output(output)
        && let ProfilesView::Create(form) = &mut state.profiles.view
    {
        form.error = Some(output.trim().to_string());
        return Effect::None;
    }

    state.profiles.view = ProfilesView::Menu;
    Effect::Batch(vec![state.notify(output), Effect::Reload])
}

/// Installs and deletions change the installed set, so both reload
pub(crate) fn handle_profiles_changed(state: &mut State, output: &str) -> Effect {
    Effect::Batch(vec![state.notify(output), Effect::Reload])
}
