//! Firewall domain types
//!
//! These are the value types the parsers produce and the forms edit. The
//! enums are closed sets that drive exhaustive `match` dispatch in the state
//! machine; their `Display` forms are exactly the tokens `ufw` expects on its
//! command line.
//!
//! # Example
//!
//! ```
//! use strum::IntoEnumIterator;
//! use ufwtui::core::firewall::{Action, Protocol};
//!
//! assert_eq!(Action::Deny.to_string(), "deny");
//! assert_eq!(Protocol::iter().count(), 3);
//! ```

/// Rule action (allow, deny, or reject)
///
/// Also used for default policies, which accept the same three values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Action {
    /// Let matching traffic through
    #[default]
    #[strum(serialize = "allow")]
    Allow,
    /// Drop matching traffic silently
    #[strum(serialize = "deny")]
    Deny,
    /// Drop matching traffic and notify the sender
    #[strum(serialize = "reject")]
    Reject,
}

/// Transport protocol for a rule's port match
///
/// Ordered with the combined value first because that is the form's default.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Protocol {
    /// Both TCP and UDP (no `proto` token is emitted)
    #[default]
    #[strum(serialize = "tcp+udp")]
    Both,
    #[strum(serialize = "tcp")]
    Tcp,
    #[strum(serialize = "udp")]
    Udp,
}

/// Traffic direction of a rule
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Direction {
    #[default]
    #[strum(serialize = "in")]
    In,
    #[strum(serialize = "out")]
    Out,
}

/// The three chains a default policy applies to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum PolicyDirection {
    #[strum(serialize = "incoming")]
    Incoming,
    #[strum(serialize = "outgoing")]
    Outgoing,
    #[strum(serialize = "routed")]
    Routed,
}

impl PolicyDirection {
    /// Returns the capitalized label shown next to the selector
    pub const fn label(self) -> &'static str {
        match self {
            PolicyDirection::Incoming => "Incoming",
            PolicyDirection::Outgoing => "Outgoing",
            PolicyDirection::Routed => "Routed",
        }
    }
}

/// One line of `ufw status numbered`
///
/// `index` is the 1-based position reported by the tool. It is positional, not
/// an identifier: any deletion invalidates it, so rules are always re-parsed
/// after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub index: usize,
    pub raw_line: String,
}

/// Flags extracted from `ufw status verbose`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirewallStatus {
    pub enabled: bool,
    pub logging_on: bool,
}

/// Default policies as reported on the `Default:` status line
///
/// Values are kept as the raw tokens the tool printed, since `routed` may be
/// `disabled`, which is not an [`Action`]. A direction missing from the line
/// is left empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefaultPolicies {
    pub incoming: String,
    pub outgoing: String,
    pub routed: String,
}

impl DefaultPolicies {
    pub fn get(&self, direction: PolicyDirection) -> &str {
        match direction {
            PolicyDirection::Incoming => &self.incoming,
            PolicyDirection::Outgoing => &self.outgoing,
            PolicyDirection::Routed => &self.routed,
        }
    }

    /// Returns the policy for `direction` as an [`Action`], if it is one
    pub fn action(&self, direction: PolicyDirection) -> Option<Action> {
        self.get(direction).parse().ok()
    }
}
