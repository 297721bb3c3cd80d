//! Keyboard-driven input forms
//!
//! Forms own their field values and focus. They never run commands: on Enter
//! they validate and hand a finished value back to the caller through
//! [`FormOutcome::Submit`], or keep editing with an inline error.

pub mod profile;
pub mod rule;

pub use profile::{ProfileField, ProfileForm};
pub use rule::{RuleField, RuleForm};

use crate::app::Key;

/// Result of feeding one key to a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<T> {
    Editing,
    Cancel,
    Submit(T),
}

/// Applies a text-editing key to `value`.
///
/// Returns true if the key was an edit. Backspace on an empty value is a
/// no-op edit, not an error.
pub(crate) fn edit_text(value: &mut String, key: &Key) -> bool {
    match key {
        Key::Char(c) => {
            value.push(*c);
            true
        }
        Key::Backspace => {
            value.pop();
            true
        }
        _ => false,
    }
}
