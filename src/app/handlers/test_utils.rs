//! Shared test utilities for handler modules

use crate::app::{Message, Snapshot, State};
use crate::config::AppConfig;
use crate::core::test_helpers::{STATUS_NUMBERED, STATUS_VERBOSE, installed_profile};

/// State with nothing loaded and no command outstanding
pub fn create_test_state() -> State {
    let mut state = State::new(&AppConfig::default()).0;
    state.pending_commands = 0;
    state
}

/// Snapshot of an active firewall with three rules and OpenSSH installed
pub fn active_snapshot() -> Snapshot {
    Snapshot {
        status_text: STATUS_VERBOSE.to_string(),
        rules_text: STATUS_NUMBERED.to_string(),
        profiles: vec![installed_profile("OpenSSH", "22/tcp")],
    }
}

/// State after the initial reload of [`active_snapshot`] completed
pub fn loaded_state() -> State {
    let mut state = State::new(&AppConfig::default()).0;
    state.update(Message::Reloaded(active_snapshot()));
    state
}
