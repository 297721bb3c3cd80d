//! Core firewall management functionality
//!
//! This module contains everything that touches the `ufw` boundary:
//!
//! - [`firewall`]: Domain types (actions, protocols, directions, rules, policies)
//! - [`status`]: Parsers for `ufw status` / `ufw app` text output
//! - [`ufw`]: Command-string builders and the [`ufw::CommandRunner`] seam
//! - [`profiles`]: Application profile entity, catalog and definition files
//! - [`export`]: Restore-script export of the current rule files
//! - [`error`]: Error types for validation, parsing and I/O

pub mod error;
pub mod export;
pub mod firewall;
pub mod profiles;
pub mod status;
pub mod ufw;

#[cfg(test)]
pub mod test_helpers;
