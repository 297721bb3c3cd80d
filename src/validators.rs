//! Input validation for rule and profile forms
//!
//! Every check returns a [`ValidationError`] naming the offending token so
//! the form can show it inline and keep the user's input intact.

use crate::core::error::ValidationError;
use ipnetwork::IpNetwork;
use std::net::IpAddr;

/// Maximum length of a profile name
pub const MAX_PROFILE_NAME_LEN: usize = 64;

/// Parses a single port in `1..=65535`.
///
/// # Examples
///
/// ```
/// use ufwtui::validators::parse_port_number;
///
/// assert_eq!(parse_port_number("443"), Some(443));
/// assert_eq!(parse_port_number("0"), None);
/// assert_eq!(parse_port_number("65536"), None);
/// ```
pub fn parse_port_number(token: &str) -> Option<u16> {
    token.parse::<u16>().ok().filter(|port| *port != 0)
}

/// Validates the port field of the rule form.
///
/// A `:` makes the value a range `A:B` with `A <= B`. Any failure is
/// [`ValidationError::InvalidPort`] naming the bad token, or the whole range
/// when its bounds are reversed.
pub fn validate_rule_port(port: &str) -> Result<(), ValidationError> {
    if let Some((start, end)) = port.split_once(':') {
        let start_port =
            parse_port_number(start).ok_or_else(|| ValidationError::InvalidPort(start.into()))?;
        let end_port =
            parse_port_number(end).ok_or_else(|| ValidationError::InvalidPort(end.into()))?;
        if start_port > end_port {
            return Err(ValidationError::InvalidPort(port.into()));
        }
        Ok(())
    } else {
        parse_port_number(port)
            .map(|_| ())
            .ok_or_else(|| ValidationError::InvalidPort(port.into()))
    }
}

/// Returns true for a single IP address or a CIDR block, v4 or v6.
///
/// The address part must be a complete address; `ipnetwork` alone would
/// accept shorthand like `10/8`.
pub fn is_ip_or_cidr(input: &str) -> bool {
    match input.split_once('/') {
        Some((addr, _)) => addr.parse::<IpAddr>().is_ok() && input.parse::<IpNetwork>().is_ok(),
        None => input.parse::<IpAddr>().is_ok(),
    }
}

/// Validates a network interface name.
///
/// Linux kernel interface name rules: at most 15 characters (IFNAMSIZ - 1),
/// ASCII alphanumerics plus `.`, `-`, `_`, and not `.` or `..`. An empty
/// name means "any interface" and is accepted.
pub fn validate_interface(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Ok(());
    }

    if name.len() > 15
        || name == "."
        || name == ".."
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return Err(ValidationError::InvalidInterface(name.into()));
    }

    Ok(())
}

/// Validates a profile port specification such as `80,443/tcp|53/udp`.
///
/// Groups are split on `|` and trimmed. Each group is a comma-separated port list with an
/// optional `/tcp` or `/udp` suffix. A range `start:end` is only accepted when
/// its group names a protocol.
///
/// # Examples
///
/// ```
/// use ufwtui::validators::validate_port_spec;
///
/// assert!(validate_port_spec("80,443/tcp").is_ok());
/// assert!(validate_port_spec("100:200/udp").is_ok());
/// assert!(validate_port_spec("100:200").is_err());
/// ```
pub fn validate_port_spec(spec: &str) -> Result<(), ValidationError> {
    if spec.trim().is_empty() {
        return Err(ValidationError::EmptyField("ports"));
    }

    for group in spec.split('|').map(str::trim) {
        let parts: Vec<&str> = group.split('/').collect();
        if parts.len() > 2 {
            return Err(ValidationError::TooManyProtocolSeparators(group.into()));
        }
        let has_protocol = parts.len() == 2;
        if has_protocol && !matches!(parts[1], "tcp" | "udp") {
            return Err(ValidationError::InvalidProtocol(parts[1].into()));
        }

        for entry in parts[0].split(',') {
            if entry.contains(':') {
                validate_spec_range(entry, has_protocol)?;
            } else {
                let entry = entry.trim();
                parse_port_number(entry)
                    .ok_or_else(|| ValidationError::InvalidPort(entry.into()))?;
            }
        }
    }

    Ok(())
}

fn validate_spec_range(entry: &str, has_protocol: bool) -> Result<(), ValidationError> {
    if !has_protocol {
        return Err(ValidationError::RangeRequiresProtocol(entry.into()));
    }

    let bounds: Vec<&str> = entry.split(':').map(str::trim).collect();
    let [start, end] = bounds.as_slice() else {
        return Err(ValidationError::InvalidPortRange(entry.into()));
    };

    let start_port =
        parse_port_number(start).ok_or_else(|| ValidationError::InvalidPort((*start).into()))?;
    let end_port =
        parse_port_number(end).ok_or_else(|| ValidationError::InvalidPort((*end).into()))?;
    if start_port > end_port {
        return Err(ValidationError::InvalidPortRange(entry.into()));
    }
    Ok(())
}

/// Validates a profile name for use as an INI section and a file name.
///
/// Names may contain spaces (`Nginx Full`) but no path separators, quotes,
/// shell metacharacters or control characters, and cannot be `.` or `..`.
pub fn validate_profile_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyField("name"));
    }

    if name.chars().count() > MAX_PROFILE_NAME_LEN
        || name == "."
        || name == ".."
        || name != name.trim()
        || name.chars().any(|c| {
            c.is_control() || matches!(c, '/' | '\\' | '"' | '\'' | '$' | '`' | '[' | ']')
        })
    {
        return Err(ValidationError::InvalidProfileName(name.into()));
    }

    Ok(())
}
