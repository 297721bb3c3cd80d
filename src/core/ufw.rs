//! `ufw` command construction and execution
//!
//! The state machine never spawns processes itself. It builds full command
//! strings with [`Ufw`] and hands them to a [`CommandRunner`] off the update
//! path. The runner folds every outcome into text: a non-zero exit or a spawn
//! failure becomes output prefixed with `"Error: "` instead of a distinct
//! error channel, because the tool's own text already explains the failure.
//!
//! # Example
//!
//! ```
//! use ufwtui::core::ufw::Ufw;
//!
//! let ufw = Ufw::new("ufw");
//! assert_eq!(ufw.delete_rule(3), "ufw --force delete 3");
//! assert_eq!(ufw.allow_profile("Nginx Full"), "ufw allow \"Nginx Full\"");
//! ```

use crate::core::firewall::{Action, PolicyDirection};
use std::future::Future;
use tokio::process::Command;

/// Prefix marking output of a command that failed
pub const ERROR_PREFIX: &str = "Error: ";

/// Returns true if `output` came from a failed command.
pub fn is_error_output(output: &str) -> bool {
    output.starts_with(ERROR_PREFIX)
}

/// Builds command strings for a specific `ufw` executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ufw {
    tool: String,
}

impl Ufw {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// The executable name used as the first token of every command
    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn status(&self) -> String {
        format!("{} status", self.tool)
    }

    pub fn status_verbose(&self) -> String {
        format!("{} status verbose", self.tool)
    }

    pub fn status_numbered(&self) -> String {
        format!("{} status numbered", self.tool)
    }

    pub fn enable(&self) -> String {
        format!("{} --force enable", self.tool)
    }

    pub fn disable(&self) -> String {
        format!("{} disable", self.tool)
    }

    pub fn reset(&self) -> String {
        format!("{} --force reset", self.tool)
    }

    pub fn logging(&self, on: bool) -> String {
        format!("{} logging {}", self.tool, if on { "on" } else { "off" })
    }

    /// Deletes the rule at 1-based position `index` without prompting
    pub fn delete_rule(&self, index: usize) -> String {
        format!("{} --force delete {index}", self.tool)
    }

    pub fn set_default(&self, direction: PolicyDirection, action: Action) -> String {
        format!("{} default {action} {direction}", self.tool)
    }

    pub fn app_list(&self) -> String {
        format!("{} app list", self.tool)
    }

    pub fn app_info(&self, name: &str) -> String {
        format!("{} app info \"{name}\"", self.tool)
    }

    /// Asks the tool to re-index a profile definition after it was written
    pub fn app_update(&self, name: &str) -> String {
        format!("{} app update \"{name}\"", self.tool)
    }

    pub fn allow_profile(&self, name: &str) -> String {
        format!("{} allow \"{name}\"", self.tool)
    }
}

/// Executes a full command string and returns its combined output
///
/// Implementations must never fail: errors are folded into the returned text
/// with an [`ERROR_PREFIX`].
pub trait CommandRunner: Send + Sync + 'static {
    fn run(&self, command: &str) -> impl Future<Output = String> + Send;
}

/// Runs commands through `sh -c` so quoting in synthesized commands is honored
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> String {
        tracing::debug!("Running command: {command}");

        let output = match Command::new("sh").arg("-c").arg(command).output().await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Failed to spawn '{command}': {e}");
                return format!("{ERROR_PREFIX}{e}");
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            text
        } else {
            tracing::warn!("Command '{command}' exited with {}", output.status);
            format!("{ERROR_PREFIX}{}\n{text}", output.status)
        }
    }
}

/// Checks that the tool can be invoked at all.
///
/// Used once during bootstrap, before the terminal is taken over.
pub fn check_available(ufw: &Ufw) -> crate::Result<()> {
    let unavailable = |reason: String| crate::Error::ToolUnavailable {
        tool: ufw.tool().to_string(),
        reason,
    };
    let output = std::process::Command::new("sh")
        .arg("-c")
        .arg(ufw.status())
        .output()
        .map_err(|e| unavailable(e.to_string()))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(unavailable(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}
