//! Rule creation form
//!
//! Which fields are visible depends on the direction: inbound rules expose a
//! source address and an interface, outbound rules a destination address.
//! Focus always stays on a visible field, so hidden fields can keep stale
//! values without ever reaching the synthesized command.
//!
//! # Command synthesis
//!
//! [`RuleForm::build_command`] is a pure projection of the fields:
//!
//! ```text
//! <tool> <action> [in on <iface>] from <src|any> to any  port <port> [proto <p>] [comment '<c>']
//! <tool> <action>                 from any to <dst|any>  port <port> [proto <p>] [comment '<c>']
//! ```
//!
//! The port is validated first, then addresses in the order they are emitted.

use super::{FormOutcome, edit_text};
use crate::app::Key;
use crate::app::selection::SelectionList;
use crate::core::error::ValidationError;
use crate::core::firewall::{Action, Direction, Protocol};
use crate::validators;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    Port,
    Protocol,
    Action,
    Direction,
    Comment,
    SourceIp,
    DestinationIp,
    Interface,
}

impl RuleField {
    pub const fn label(self) -> &'static str {
        match self {
            RuleField::Port => "Port",
            RuleField::Protocol => "Protocol",
            RuleField::Action => "Action",
            RuleField::Direction => "Direction",
            RuleField::Comment => "Comment (Optional)",
            RuleField::SourceIp => "Source IP (Optional)",
            RuleField::DestinationIp => "Destination IP (Optional)",
            RuleField::Interface => "Interface (Optional)",
        }
    }
}

/// Fields shown for `direction`, in display order
pub fn fields_for_direction(direction: Direction) -> Vec<RuleField> {
    let mut fields = vec![
        RuleField::Port,
        RuleField::Protocol,
        RuleField::Action,
        RuleField::Direction,
        RuleField::Comment,
    ];
    match direction {
        Direction::In => fields.extend([RuleField::SourceIp, RuleField::Interface]),
        Direction::Out => fields.push(RuleField::DestinationIp),
    }
    fields
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleForm {
    pub port: String,
    pub protocol: SelectionList<Protocol>,
    pub action: SelectionList<Action>,
    pub direction: SelectionList<Direction>,
    pub comment: String,
    pub source_ip: String,
    pub destination_ip: String,
    pub interface: String,
    fields: SelectionList<RuleField>,
    /// Inline validation or command error, cleared by the next edit
    pub error: Option<String>,
}

impl Default for RuleForm {
    fn default() -> Self {
        Self {
            port: String::new(),
            protocol: Protocol::iter().collect(),
            action: Action::iter().collect(),
            direction: Direction::iter().collect(),
            comment: String::new(),
            source_ip: String::new(),
            destination_ip: String::new(),
            interface: String::new(),
            fields: SelectionList::new(fields_for_direction(Direction::default())),
            error: None,
        }
    }
}

impl RuleForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_protocol(&self) -> Protocol {
        self.protocol.focused().copied().unwrap_or_default()
    }

    pub fn selected_action(&self) -> Action {
        self.action.focused().copied().unwrap_or_default()
    }

    pub fn selected_direction(&self) -> Direction {
        self.direction.focused().copied().unwrap_or_default()
    }

    /// Currently visible fields
    pub fn fields(&self) -> &SelectionList<RuleField> {
        &self.fields
    }

    pub fn focused_field(&self) -> RuleField {
        self.fields.focused().copied().unwrap_or(RuleField::Port)
    }

    /// Display value of `field`
    pub fn value(&self, field: RuleField) -> String {
        match field {
            RuleField::Port => self.port.clone(),
            RuleField::Protocol => self.selected_protocol().to_string(),
            RuleField::Action => self.selected_action().to_string(),
            RuleField::Direction => self.selected_direction().to_string(),
            RuleField::Comment => self.comment.clone(),
            RuleField::SourceIp => self.source_ip.clone(),
            RuleField::DestinationIp => self.destination_ip.clone(),
            RuleField::Interface => self.interface.clone(),
        }
    }

    fn text_field_mut(&mut self, field: RuleField) -> Option<&mut String> {
        match field {
            RuleField::Port => Some(&mut self.port),
            RuleField::Comment => Some(&mut self.comment),
            RuleField::SourceIp => Some(&mut self.source_ip),
            RuleField::DestinationIp => Some(&mut self.destination_ip),
            RuleField::Interface => Some(&mut self.interface),
            RuleField::Protocol | RuleField::Action | RuleField::Direction => None,
        }
    }

    /// Cycles the enum under focus. `forward` is Right, otherwise Left.
    fn cycle(&mut self, forward: bool) {
        fn step<T>(list: &mut SelectionList<T>, forward: bool) {
            if forward { list.next() } else { list.prev() }
        }

        match self.focused_field() {
            RuleField::Protocol => step(&mut self.protocol, forward),
            RuleField::Action => step(&mut self.action, forward),
            RuleField::Direction => {
                step(&mut self.direction, forward);
                self.refresh_fields();
            }
            _ => {}
        }
    }

    /// Recomputes visible fields, keeping focus if it is still visible
    fn refresh_fields(&mut self) {
        let focused = self.focused_field();
        self.fields
            .set_items(fields_for_direction(self.selected_direction()));
        self.fields.focus(&focused);
    }

    /// Feeds one key to the form. `tool` is the first command token.
    pub fn update(&mut self, key: &Key, tool: &str) -> FormOutcome<String> {
        match key {
            Key::Up => self.fields.prev(),
            Key::Down => self.fields.next(),
            Key::Left => {
                self.cycle(false);
                self.error = None;
            }
            Key::Right => {
                self.cycle(true);
                self.error = None;
            }
            Key::Esc => return FormOutcome::Cancel,
            Key::Enter => match self.build_command(tool) {
                Ok(command) => return FormOutcome::Submit(command),
                Err(e) => self.error = Some(e.to_string()),
            },
            _ => {
                let field = self.focused_field();
                if let Some(value) = self.text_field_mut(field)
                    && edit_text(value, key)
                {
                    self.error = None;
                }
            }
        }
        FormOutcome::Editing
    }

    /// Validates the fields and synthesizes the full command string.
    ///
    /// Never mutates the form; the first failing check wins. Checks run in
    /// order: port, then (inbound) interface and source IP, then (outbound)
    /// destination IP.
    ///
    /// The interface is spliced unquoted into a shell command, so it must be a
    /// plausible Linux interface name. An aliased name such as `eth0:1` is
    /// refused with [`ValidationError::InvalidInterface`] before the source IP
    /// is looked at.
    pub fn build_command(&self, tool: &str) -> Result<String, ValidationError> {
        validators::validate_rule_port(&self.port)?;

        let mut parts: Vec<String> = vec![tool.to_string(), self.selected_action().to_string()];

        match self.selected_direction() {
            Direction::In => {
                if !self.interface.is_empty() {
                    // stricter than the bare emptiness check: shell-safe names only
                    validators::validate_interface(&self.interface)?;
                    parts.extend(["in".into(), "on".into(), self.interface.clone()]);
                }
                if !self.source_ip.is_empty() && !validators::is_ip_or_cidr(&self.source_ip) {
                    return Err(ValidationError::InvalidSourceIp(self.source_ip.clone()));
                }
                parts.extend(["from".into(), or_any(&self.source_ip)]);
                parts.extend(["to".into(), "any".into()]);
            }
            Direction::Out => {
                parts.extend(["from".into(), "any".into()]);
                if !self.destination_ip.is_empty()
                    && !validators::is_ip_or_cidr(&self.destination_ip)
                {
                    return Err(ValidationError::InvalidDestinationIp(
                        self.destination_ip.clone(),
                    ));
                }
                parts.extend(["to".into(), or_any(&self.destination_ip)]);
            }
        }

        parts.extend(["port".into(), self.port.clone()]);
        let protocol = self.selected_protocol();
        if protocol != Protocol::Both {
            parts.extend(["proto".into(), protocol.to_string()]);
        }

        // TODO: escape single quotes once the tool's comment quoting rules are pinned down
        if !self.comment.is_empty() {
            parts.extend(["comment".into(), format!("'{}'", self.comment)]);
        }

        Ok(parts.join(" "))
    }
}

fn or_any(value: &str) -> String {
    if value.is_empty() {
        "any".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut RuleForm, text: &str) {
        for c in text.chars() {
            form.update(&Key::Char(c), "ufw");
        }
    }

    fn focus_field(form: &mut RuleForm, field: RuleField) {
        for _ in 0..form.fields().len() {
            if form.focused_field() == field {
                return;
            }
            form.update(&Key::Down, "ufw");
        }
        panic!("field {field:?} not visible");
    }

    #[test]
    fn test_new_form_defaults() {
        let form = RuleForm::new();
        assert_eq!(form.focused_field(), RuleField::Port);
        assert_eq!(form.selected_protocol(), Protocol::Both);
        assert_eq!(form.selected_action(), Action::Allow);
        assert_eq!(form.selected_direction(), Direction::In);
        assert_eq!(
            form.fields().items(),
            fields_for_direction(Direction::In).as_slice()
        );
    }

    #[test]
    fn test_simple_inbound_command() {
        let mut form = RuleForm::new();
        type_text(&mut form, "22");
        assert_eq!(
            form.build_command("ufw").unwrap(),
            "ufw allow from any to any port 22"
        );
    }

    #[test]
    fn test_full_inbound_command() {
        let mut form = RuleForm::new();
        type_text(&mut form, "8000:8100");
        focus_field(&mut form, RuleField::Protocol);
        form.update(&Key::Right, "ufw");
        focus_field(&mut form, RuleField::Action);
        form.update(&Key::Left, "ufw");
        focus_field(&mut form, RuleField::Comment);
        type_text(&mut form, "web");
        focus_field(&mut form, RuleField::SourceIp);
        type_text(&mut form, "10.0.0.0/8");
        focus_field(&mut form, RuleField::Interface);
        type_text(&mut form, "eth0");

        assert_eq!(
            form.build_command("ufw").unwrap(),
            "ufw reject in on eth0 from 10.0.0.0/8 to any port 8000:8100 proto tcp comment 'web'"
        );
    }

    #[test]
    fn test_outbound_command() {
        let mut form = RuleForm::new();
        type_text(&mut form, "53");
        focus_field(&mut form, RuleField::Direction);
        form.update(&Key::Right, "ufw");
        focus_field(&mut form, RuleField::Protocol);
        form.update(&Key::Left, "ufw");
        focus_field(&mut form, RuleField::DestinationIp);
        type_text(&mut form, "1.1.1.1");

        assert_eq!(
            form.build_command("ufw").unwrap(),
            "ufw allow from any to 1.1.1.1 port 53 proto udp"
        );
    }

    #[test]
    fn test_direction_change_swaps_fields_and_keeps_focus() {
        let mut form = RuleForm::new();
        focus_field(&mut form, RuleField::Direction);
        form.update(&Key::Right, "ufw");

        assert_eq!(form.focused_field(), RuleField::Direction);
        assert!(form.fields().items().contains(&RuleField::DestinationIp));
        assert!(!form.fields().items().contains(&RuleField::SourceIp));
        assert!(!form.fields().items().contains(&RuleField::Interface));
    }

    #[test]
    fn test_hidden_fields_do_not_leak_into_command() {
        let mut form = RuleForm::new();
        type_text(&mut form, "80");
        focus_field(&mut form, RuleField::SourceIp);
        type_text(&mut form, "not-an-ip");
        focus_field(&mut form, RuleField::Direction);
        form.update(&Key::Right, "ufw");

        assert_eq!(
            form.build_command("ufw").unwrap(),
            "ufw allow from any to any port 80"
        );
    }

    #[test]
    fn test_invalid_port_stops_synthesis() {
        let mut form = RuleForm::new();
        type_text(&mut form, "0");
        focus_field(&mut form, RuleField::SourceIp);
        type_text(&mut form, "bogus");
        assert_eq!(
            form.build_command("ufw"),
            Err(ValidationError::InvalidPort("0".into()))
        );
    }

    #[test]
    fn test_invalid_source_ip() {
        let mut form = RuleForm::new();
        type_text(&mut form, "22");
        focus_field(&mut form, RuleField::SourceIp);
        type_text(&mut form, "300.1.1.1");
        assert_eq!(
            form.build_command("ufw"),
            Err(ValidationError::InvalidSourceIp("300.1.1.1".into()))
        );
    }

    #[test]
    fn test_invalid_destination_ip() {
        let mut form = RuleForm::new();
        type_text(&mut form, "22");
        focus_field(&mut form, RuleField::Direction);
        form.update(&Key::Right, "ufw");
        focus_field(&mut form, RuleField::DestinationIp);
        type_text(&mut form, "nope");
        assert_eq!(
            form.build_command("ufw"),
            Err(ValidationError::InvalidDestinationIp("nope".into()))
        );
    }

    #[test]
    fn test_enter_reports_error_inline_and_keeps_state() {
        let mut form = RuleForm::new();
        type_text(&mut form, "abc");
        assert_eq!(form.update(&Key::Enter, "ufw"), FormOutcome::Editing);
        assert_eq!(form.error.as_deref(), Some("invalid port: abc"));
        assert_eq!(form.port, "abc");

        form.update(&Key::Backspace, "ufw");
        assert!(form.error.is_none());
        assert_eq!(form.port, "ab");
    }

    #[test]
    fn test_enter_submits_command() {
        let mut form = RuleForm::new();
        type_text(&mut form, "443");
        assert_eq!(
            form.update(&Key::Enter, "/usr/sbin/ufw"),
            FormOutcome::Submit("/usr/sbin/ufw allow from any to any port 443".into())
        );
    }

    #[test]
    fn test_backspace_edits_focused_field_only() {
        let mut form = RuleForm::new();
        type_text(&mut form, "22");
        focus_field(&mut form, RuleField::Direction);
        form.update(&Key::Right, "ufw");
        focus_field(&mut form, RuleField::DestinationIp);
        type_text(&mut form, "1.2.3.4");
        form.update(&Key::Backspace, "ufw");

        assert_eq!(form.destination_ip, "1.2.3.");
        assert_eq!(form.port, "22");
    }

    #[test]
    fn test_characters_on_enum_fields_are_ignored() {
        let mut form = RuleForm::new();
        focus_field(&mut form, RuleField::Protocol);
        type_text(&mut form, "x");
        assert_eq!(form.selected_protocol(), Protocol::Both);
        assert!(form.port.is_empty());
    }

    #[test]
    fn test_esc_cancels() {
        let mut form = RuleForm::new();
        assert_eq!(form.update(&Key::Esc, "ufw"), FormOutcome::Cancel);
    }

    #[test]
    fn test_build_command_is_pure() {
        let mut form = RuleForm::new();
        type_text(&mut form, "22");
        let before = form.clone();
        let first = form.build_command("ufw");
        let second = form.build_command("ufw");
        assert_eq!(first, second);
        assert_eq!(form, before);
    }

    #[test]
    fn test_invalid_interface_rejected() {
        let mut form = RuleForm::new();
        type_text(&mut form, "22");
        focus_field(&mut form, RuleField::Interface);
        type_text(&mut form, "eth0;id");
        assert_eq!(
            form.build_command("ufw"),
            Err(ValidationError::InvalidInterface("eth0;id".into()))
        );
    }

    #[test]
    fn test_interface_checked_before_source_ip() {
        let mut form = RuleForm::new();
        type_text(&mut form, "22");
        focus_field(&mut form, RuleField::Interface);
        type_text(&mut form, "eth0:1");
        focus_field(&mut form, RuleField::SourceIp);
        type_text(&mut form, "not-an-ip");
        assert_eq!(
            form.build_command("ufw"),
            Err(ValidationError::InvalidInterface("eth0:1".into()))
        );
    }
}
