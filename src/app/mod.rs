//! Interactive state machine
//!
//! [`State::update`] consumes one [`Message`] at a time and returns an
//! [`Effect`] describing any work to do off the update path: running tool
//! commands, writing profile files, reloading, or arming a notification
//! timer. The front-end executes effects on background tasks and feeds their
//! results back as messages, so state is only ever mutated here, one message
//! at a time.
//!
//! # Screens
//!
//! ```text
//! Home ──┬─ CreateRule (fresh form each time)
//!        ├─ DeleteRule
//!        ├─ Profiles ─┬─ List (installed)
//!        │            ├─ Create (from list)
//!        │            └─ Create (fresh form each time)
//!        └─ SetDefaults
//! ```
//!
//! Home, DeleteRule and the installed-profiles list may each be preempted by
//! a [`ConfirmDialog`]. `Key::Quit` ends the program from anywhere, even while
//! a command is running.

pub mod confirm;
pub mod defaults;
pub mod forms;
pub mod handlers;
pub mod menu;
pub mod selection;
pub mod view;

use crate::config::AppConfig;
use crate::core::firewall::{FirewallStatus, Rule};
use crate::core::profiles::{self, Profile};
use crate::core::ufw::Ufw;
use confirm::ConfirmDialog;
use defaults::DefaultPolicyEditor;
use forms::{ProfileForm, RuleForm};
use menu::MenuAction;
use selection::{MultiSelectionList, SelectionList};
use std::time::Duration;

/// Keyboard input, already decoded from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Delete,
    Char(char),
    /// ctrl+c, ctrl+d or ctrl+q
    Quit,
}

impl Key {
    /// Up arrow or `k`, for list screens (forms treat `k` as text)
    pub fn is_list_up(self) -> bool {
        matches!(self, Key::Up | Key::Char('k'))
    }

    pub fn is_list_down(self) -> bool {
        matches!(self, Key::Down | Key::Char('j'))
    }
}

/// What a finished command batch was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Reset,
    FirewallToggled,
    LoggingToggled,
    RuleCreated,
    RulesDeleted,
    ProfilesAllowed,
    ProfilesInstalled,
    ProfileCreated,
    ProfilesDeleted,
    DefaultsUpdated,
    Exported,
}

/// Raw tool output gathered by a reload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub status_text: String,
    pub rules_text: String,
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key(Key),
    CommandFinished {
        completion: Completion,
        output: String,
    },
    Reloaded(Snapshot),
    NotificationExpired,
}

/// Work requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Run commands in order and report their combined output once
    Run {
        commands: Vec<String>,
        completion: Completion,
    },
    /// Write definition files and register them with the tool
    CreateProfiles {
        profiles: Vec<Profile>,
        completion: Completion,
    },
    DeleteProfiles(Vec<Profile>),
    Export,
    /// Re-read status, rules and installed profiles
    Reload,
    ExpireNotification(Duration),
    Batch(Vec<Effect>),
}

impl Effect {
    pub fn is_quit(&self) -> bool {
        self.leaves().iter().any(|effect| matches!(effect, Effect::Quit))
    }

    /// Flattens nested batches, dropping `None`
    pub fn leaves(&self) -> Vec<&Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.iter().flat_map(Effect::leaves).collect(),
            other => vec![other],
        }
    }

    pub fn into_leaves(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::into_leaves).collect(),
            other => vec![other],
        }
    }

    /// Number of leaves that talk to the tool and answer with a message
    fn command_count(&self) -> usize {
        self.leaves()
            .iter()
            .filter(|effect| {
                matches!(
                    effect,
                    Effect::Run { .. }
                        | Effect::CreateProfiles { .. }
                        | Effect::DeleteProfiles(_)
                        | Effect::Export
                        | Effect::Reload
                )
            })
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    CreateRule(RuleForm),
    DeleteRule,
    Profiles,
    SetDefaults(DefaultPolicyEditor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilesMenuAction {
    List,
    InstallFromCatalog,
    Create,
}

impl ProfilesMenuAction {
    pub const fn title(self) -> &'static str {
        match self {
            ProfilesMenuAction::List => "List",
            ProfilesMenuAction::InstallFromCatalog => "Create (from list)",
            ProfilesMenuAction::Create => "Create",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilesView {
    Menu,
    Installed,
    Catalog,
    Create(ProfileForm),
}

/// Profiles sub-screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilesScreen {
    pub view: ProfilesView,
    pub menu: SelectionList<ProfilesMenuAction>,
    pub installed: MultiSelectionList<Profile>,
    /// Catalog entries not installed yet
    pub installable: MultiSelectionList<Profile>,
    pub delete_dialog: Option<ConfirmDialog>,
}

impl Default for ProfilesScreen {
    fn default() -> Self {
        Self {
            view: ProfilesView::Menu,
            menu: SelectionList::new(vec![
                ProfilesMenuAction::List,
                ProfilesMenuAction::InstallFromCatalog,
                ProfilesMenuAction::Create,
            ]),
            installed: MultiSelectionList::default(),
            installable: MultiSelectionList::new(profiles::catalog()),
            delete_dialog: None,
        }
    }
}

impl ProfilesScreen {
    /// Replaces the installed list and recomputes what can be installed
    pub fn set_installed(&mut self, installed: Vec<Profile>) {
        self.installable
            .set_items(profiles::installable(&installed));
        self.installed.set_items(installed);
    }
}

pub struct State {
    pub screen: Screen,
    pub menu: SelectionList<MenuAction>,
    pub reset_dialog: Option<ConfirmDialog>,
    pub delete_dialog: Option<ConfirmDialog>,
    /// Last `status verbose` output, shown on the home screen
    pub status_text: String,
    pub status: FirewallStatus,
    pub rules: MultiSelectionList<Rule>,
    pub profiles: ProfilesScreen,
    pub notification: Option<String>,
    pending_notifications: usize,
    pending_commands: usize,
    ufw: Ufw,
    notification_timeout: Duration,
}

impl State {
    /// Creates the initial state and the effect that loads it
    pub fn new(config: &AppConfig) -> (Self, Effect) {
        let mut state = Self {
            screen: Screen::Home,
            menu: SelectionList::new(menu::build_menu(FirewallStatus::default())),
            reset_dialog: None,
            delete_dialog: None,
            status_text: String::new(),
            status: FirewallStatus::default(),
            rules: MultiSelectionList::default(),
            profiles: ProfilesScreen::default(),
            notification: None,
            pending_notifications: 0,
            pending_commands: 0,
            ufw: Ufw::new(config.tool.clone()),
            notification_timeout: config.notification_timeout(),
        };
        let effect = Effect::Reload;
        state.pending_commands += effect.command_count();
        (state, effect)
    }

    /// True while any dispatched command has not reported back
    pub fn is_busy(&self) -> bool {
        self.pending_commands > 0
    }

    pub fn update(&mut self, message: Message) -> Effect {
        let effect = match message {
            Message::Key(Key::Quit) => return Effect::Quit,
            Message::Key(_) if self.is_busy() => Effect::None,
            Message::Key(key) => match self.screen {
                Screen::Home => handlers::handle_home_key(self, key),
                Screen::CreateRule(_) => handlers::handle_create_rule_key(self, key),
                Screen::DeleteRule => handlers::handle_delete_rule_key(self, key),
                Screen::Profiles => handlers::handle_profiles_key(self, key),
                Screen::SetDefaults(_) => handlers::handle_set_defaults_key(self, key),
            },
            Message::CommandFinished { completion, output } => {
                self.pending_commands = self.pending_commands.saturating_sub(1);
                handlers::handle_command_finished(self, completion, &output)
            }
            Message::Reloaded(snapshot) => {
                self.pending_commands = self.pending_commands.saturating_sub(1);
                handlers::handle_reloaded(self, snapshot);
                Effect::None
            }
            Message::NotificationExpired => {
                self.pending_notifications = self.pending_notifications.saturating_sub(1);
                if self.pending_notifications == 0 {
                    self.notification = None;
                }
                Effect::None
            }
        };

        self.pending_commands += effect.command_count();
        effect
    }

    /// Shows `text` and arms its expiry timer.
    ///
    /// Each notification arms its own timer; the text is only cleared once
    /// every outstanding timer has fired, so an older timer never clears a
    /// newer notification early.
    pub(crate) fn notify(&mut self, text: impl Into<String>) -> Effect {
        let text = text.into();
        self.notification = Some(text.trim_end().to_string());
        self.pending_notifications += 1;
        Effect::ExpireNotification(self.notification_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::test_utils::{create_test_state, loaded_state};

    #[test]
    fn test_new_state_requests_reload_and_is_busy() {
        let (state, effect) = State::new(&AppConfig::default());
        assert_eq!(effect, Effect::Reload);
        assert!(state.is_busy());
        assert_eq!(state.screen, Screen::Home);
    }

    #[test]
    fn test_keys_ignored_while_busy_except_quit() {
        let (mut state, _) = State::new(&AppConfig::default());
        let before = state.menu.focused_index();
        assert_eq!(state.update(Message::Key(Key::Down)), Effect::None);
        assert_eq!(state.menu.focused_index(), before);
        assert_eq!(state.update(Message::Key(Key::Quit)), Effect::Quit);
    }

    #[test]
    fn test_quit_from_nested_screen() {
        let mut state = loaded_state();
        state.screen = Screen::CreateRule(RuleForm::new());
        assert!(state.update(Message::Key(Key::Quit)).is_quit());
    }

    #[test]
    fn test_notification_survives_older_timer() {
        let mut state = create_test_state();
        let first = state.notify("first");
        let second = state.notify("second");
        assert!(matches!(first, Effect::ExpireNotification(_)));
        assert!(matches!(second, Effect::ExpireNotification(_)));

        state.update(Message::NotificationExpired);
        assert_eq!(state.notification.as_deref(), Some("second"));

        state.update(Message::NotificationExpired);
        assert!(state.notification.is_none());

        // stray timer never underflows or resurrects
        state.update(Message::NotificationExpired);
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_notification_uses_configured_timeout() {
        let config = AppConfig {
            notification_timeout_secs: 3,
            ..AppConfig::default()
        };
        let (mut state, _) = State::new(&config);
        assert_eq!(
            state.notify("x"),
            Effect::ExpireNotification(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_effect_leaves_flatten_batches() {
        let effect = Effect::Batch(vec![
            Effect::None,
            Effect::Reload,
            Effect::Batch(vec![Effect::Export, Effect::Quit]),
        ]);
        assert_eq!(
            effect.leaves(),
            vec![&Effect::Reload, &Effect::Export, &Effect::Quit]
        );
        assert!(effect.is_quit());
        assert_eq!(effect.command_count(), 2);
        assert_eq!(effect.into_leaves().len(), 3);
    }

    #[test]
    fn test_list_keys() {
        assert!(Key::Char('k').is_list_up());
        assert!(Key::Down.is_list_down());
        assert!(!Key::Char('x').is_list_down());
    }
}
