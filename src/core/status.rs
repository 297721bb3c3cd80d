//! Parsers for `ufw` text output
//!
//! Every parser here is defensive: short or malformed input degrades to empty
//! or default values. The only hard failure is a missing `Default:` line,
//! which is surfaced to the user as a [`ParseError`].
//!
//! Numbered listings are split on `'\n'` rather than with `lines()` so the
//! trailing blank line the tool emits is counted as part of the footer.

use crate::core::error::ParseError;
use crate::core::firewall::{DefaultPolicies, FirewallStatus, Rule};
use crate::core::profiles::Profile;

/// Header lines `ufw status numbered` prints before the first rule
const NUMBERED_HEADER_LINES: usize = 4;

/// Footer lines (blank line plus trailing newline) after the last rule
const NUMBERED_FOOTER_LINES: usize = 2;

/// Extracts the enabled and logging flags from `ufw status verbose`.
///
/// A missing `Status:` or `Logging:` line leaves the corresponding flag false.
pub fn parse_verbose_status(text: &str) -> FirewallStatus {
    let mut status = FirewallStatus::default();

    for line in text.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("Status:") {
            status.enabled = rest.trim_start().starts_with("active");
        } else if let Some(rest) = line.strip_prefix("Logging:") {
            status.logging_on = rest.contains("on");
        }
    }

    status
}

/// Parses `ufw status numbered` into rules.
///
/// Drops the fixed header and footer. Anything shorter than header plus
/// footer means there are no rules.
pub fn parse_numbered_rules(text: &str) -> Vec<Rule> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < NUMBERED_HEADER_LINES + NUMBERED_FOOTER_LINES {
        return Vec::new();
    }

    lines[NUMBERED_HEADER_LINES..lines.len() - NUMBERED_FOOTER_LINES]
        .iter()
        .enumerate()
        .map(|(position, line)| Rule {
            index: position + 1,
            raw_line: (*line).to_string(),
        })
        .collect()
}

/// Parses the `Default:` line of `ufw status verbose`.
///
/// Example input: `Default: deny (incoming), allow (outgoing), disabled (routed)`
pub fn parse_default_policies(text: &str) -> Result<DefaultPolicies, ParseError> {
    let line = text
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("Default:"))
        .ok_or(ParseError::DefaultPolicyLineMissing)?;

    let mut policies = DefaultPolicies::default();
    for segment in line.split(',').map(str::trim) {
        let value = first_token(segment);
        if segment.contains("incoming") {
            policies.incoming = value;
        } else if segment.contains("outgoing") {
            policies.outgoing = value;
        } else if segment.contains("routed") {
            policies.routed = value;
        }
    }

    Ok(policies)
}

fn first_token(segment: &str) -> String {
    segment
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Parses `ufw app list`: a header line followed by one profile name per line.
pub fn parse_app_list(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parses one `ufw app info <name>` block.
///
/// `Profile:`, `Title:` and `Description:` values are captured directly. After a
/// `Ports:` or `Port:` line, every following non-blank line up to the first
/// blank one is a port entry.
pub fn parse_profile_info(name: &str, text: &str) -> Profile {
    let mut profile = Profile {
        name: name.to_string(),
        installed: true,
        ..Profile::default()
    };

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    for (i, line) in lines.iter().enumerate() {
        if let Some(value) = line.strip_prefix("Profile:") {
            profile.name = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("Title:") {
            profile.title = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("Description:") {
            profile.description = value.trim().to_string();
        } else if line.starts_with("Ports:") || line.starts_with("Port:") {
            profile.ports = lines[i + 1..]
                .iter()
                .take_while(|port| !port.is_empty())
                .map(ToString::to_string)
                .collect();
        }
    }

    profile
}
