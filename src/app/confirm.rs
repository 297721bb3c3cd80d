//! Yes/No confirmation gate for destructive actions
//!
//! The owning screen keeps an `Option<ConfirmDialog>`, routes every key to it
//! while it is present, and clears it on any terminal outcome.

use crate::app::Key;
use crate::app::selection::SelectionList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub const fn label(self) -> &'static str {
        match self {
            Choice::Yes => "Yes",
            Choice::No => "No",
        }
    }
}

/// Result of feeding one key to a [`ConfirmDialog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Still waiting for an answer
    Pending,
    Yes,
    No,
    Esc,
}

impl ConfirmOutcome {
    /// True for every outcome that should close the dialog
    pub fn is_terminal(self) -> bool {
        self != ConfirmOutcome::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    prompt: String,
    options: SelectionList<Choice>,
}

impl ConfirmDialog {
    /// Creates a dialog with "Yes" focused
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options: SelectionList::new(vec![Choice::Yes, Choice::No]),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &SelectionList<Choice> {
        &self.options
    }

    pub fn update(&mut self, key: &Key) -> ConfirmOutcome {
        match key {
            Key::Up => self.options.prev(),
            Key::Down => self.options.next(),
            Key::Enter => {
                return match self.options.focused() {
                    Some(Choice::Yes) => ConfirmOutcome::Yes,
                    Some(Choice::No) | None => ConfirmOutcome::No,
                };
            }
            Key::Esc => return ConfirmOutcome::Esc,
            _ => {}
        }
        ConfirmOutcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_on_default_is_yes() {
        let mut dialog = ConfirmDialog::new("Are you sure you want to reset UFW?");
        assert_eq!(dialog.update(&Key::Enter), ConfirmOutcome::Yes);
    }

    #[test]
    fn test_navigate_to_no() {
        let mut dialog = ConfirmDialog::new("Delete?");
        assert_eq!(dialog.update(&Key::Down), ConfirmOutcome::Pending);
        assert_eq!(dialog.update(&Key::Enter), ConfirmOutcome::No);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut dialog = ConfirmDialog::new("Delete?");
        dialog.update(&Key::Up);
        assert_eq!(dialog.options().focused(), Some(&Choice::No));
    }

    #[test]
    fn test_esc_and_other_keys() {
        let mut dialog = ConfirmDialog::new("Delete?");
        assert_eq!(dialog.update(&Key::Char('y')), ConfirmOutcome::Pending);
        assert_eq!(dialog.update(&Key::Left), ConfirmOutcome::Pending);
        assert_eq!(dialog.update(&Key::Esc), ConfirmOutcome::Esc);
        assert!(ConfirmOutcome::Esc.is_terminal());
        assert!(!ConfirmOutcome::Pending.is_terminal());
    }
}
