//! Default policy editor
//!
//! One [`Action`] selector per [`PolicyDirection`]. Up/Down move between
//! directions, Left/Right cycle the action of the focused one. A policy the
//! tool reports that is not an action (`disabled` for routed traffic) starts
//! on the first action, and the reported value is kept so the row can show it.

use crate::app::Key;
use crate::app::forms::FormOutcome;
use crate::app::selection::SelectionList;
use crate::core::firewall::{Action, DefaultPolicies, PolicyDirection};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPolicyEditor {
    directions: SelectionList<PolicyDirection>,
    selectors: Vec<(PolicyDirection, SelectionList<Action>)>,
    reported: DefaultPolicies,
}

impl DefaultPolicyEditor {
    pub fn new(policies: &DefaultPolicies) -> Self {
        let selectors = PolicyDirection::iter()
            .map(|direction| {
                let mut actions: SelectionList<Action> = Action::iter().collect();
                if let Some(current) = policies.action(direction) {
                    actions.focus(&current);
                }
                (direction, actions)
            })
            .collect();

        Self {
            directions: PolicyDirection::iter().collect(),
            selectors,
            reported: policies.clone(),
        }
    }

    pub fn focused_direction(&self) -> PolicyDirection {
        self.directions
            .focused()
            .copied()
            .unwrap_or(PolicyDirection::Incoming)
    }

    /// The action currently chosen for `direction`
    pub fn action(&self, direction: PolicyDirection) -> Action {
        self.selectors
            .iter()
            .find(|(d, _)| *d == direction)
            .and_then(|(_, actions)| actions.focused().copied())
            .unwrap_or_default()
    }

    /// The policy the tool reported for `direction` when it differs from the
    /// chosen action, i.e. what submitting would change
    pub fn replaced(&self, direction: PolicyDirection) -> Option<&str> {
        let reported = self.reported.get(direction);
        let chosen = self.action(direction).to_string();
        (!reported.is_empty() && reported != chosen).then_some(reported)
    }

    /// Treats the chosen actions as the tool's current policies
    pub fn commit(&mut self) {
        for direction in PolicyDirection::iter() {
            let chosen = self.action(direction).to_string();
            match direction {
                PolicyDirection::Incoming => self.reported.incoming = chosen,
                PolicyDirection::Outgoing => self.reported.outgoing = chosen,
                PolicyDirection::Routed => self.reported.routed = chosen,
            }
        }
    }

    /// `(direction, chosen action, focused)` rows in display order
    pub fn rows(&self) -> impl Iterator<Item = (PolicyDirection, Action, bool)> + '_ {
        self.directions
            .iter()
            .map(|(direction, focused)| (*direction, self.action(*direction), focused))
    }

    fn focused_selector(&mut self) -> Option<&mut SelectionList<Action>> {
        let direction = self.focused_direction();
        self.selectors
            .iter_mut()
            .find(|(d, _)| *d == direction)
            .map(|(_, actions)| actions)
    }

    /// Feeds one key. Enter submits every direction's chosen action.
    pub fn update(&mut self, key: &Key) -> FormOutcome<Vec<(PolicyDirection, Action)>> {
        match key {
            Key::Up => self.directions.prev(),
            Key::Down => self.directions.next(),
            Key::Left => {
                if let Some(actions) = self.focused_selector() {
                    actions.prev();
                }
            }
            Key::Right => {
                if let Some(actions) = self.focused_selector() {
                    actions.next();
                }
            }
            Key::Esc => return FormOutcome::Cancel,
            Key::Enter => {
                return FormOutcome::Submit(
                    PolicyDirection::iter()
                        .map(|direction| (direction, self.action(direction)))
                        .collect(),
                );
            }
            _ => {}
        }
        FormOutcome::Editing
    }
}
