//! Shared test utilities for core and app tests
//!
//! Provides canned `ufw` output and a scripted [`CommandRunner`] so tests never
//! touch the real firewall. This module is only compiled in test mode.

use crate::core::profiles::Profile;
use crate::core::ufw::CommandRunner;
use std::sync::{Arc, Mutex};

/// `ufw status verbose` on an enabled firewall with logging on
pub const STATUS_VERBOSE: &str = "Status: active
Logging: on (low)
Default: deny (incoming), allow (outgoing), disabled (routed)
New profiles: skip

To                         Action      From
--                         ------      ----
22/tcp                     ALLOW IN    Anywhere
";

/// `ufw status verbose` on a disabled firewall
pub const STATUS_INACTIVE: &str = "Status: inactive\n";

/// `ufw status numbered` with three rules
pub const STATUS_NUMBERED: &str = "Status: active

     To                         Action      From
     --                         ------      ----
[ 1] 22/tcp                     ALLOW IN    Anywhere
[ 2] 80/tcp                     ALLOW IN    Anywhere
[ 3] 443/tcp                    ALLOW IN    Anywhere

";

pub const APP_LIST: &str = "Available applications:
  OpenSSH
";

pub const APP_INFO_OPENSSH: &str = "Profile: OpenSSH
Title: Secure shell server, an rshd replacement
Description: OpenSSH is a free implementation of the Secure Shell protocol.

Port:
  22/tcp
";

/// Creates an installed profile with a single port
pub fn installed_profile(name: &str, port: &str) -> Profile {
    Profile {
        name: name.to_string(),
        title: format!("{name} title"),
        description: String::new(),
        ports: vec![port.to_string()],
        installed: true,
    }
}

/// Command runner that answers from a script and records every command.
///
/// The first response whose pattern is a substring of the command wins;
/// unmatched commands produce empty output. Clones share the command log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    responses: Vec<(String, String)>,
    log: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn respond(mut self, pattern: &str, output: &str) -> Self {
        self.responses.push((pattern.to_string(), output.to_string()));
        self
    }

    /// Runner answering the reload queries for an active firewall
    pub fn active_firewall() -> Self {
        Self::default()
            .respond("status verbose", STATUS_VERBOSE)
            .respond("status numbered", STATUS_NUMBERED)
            .respond("app list", APP_LIST)
            .respond("app info", APP_INFO_OPENSSH)
    }

    pub fn commands(&self) -> Vec<String> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str) -> String {
        if let Ok(mut log) = self.log.lock() {
            log.push(command.to_string());
        }
        self.responses
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_default()
    }
}
