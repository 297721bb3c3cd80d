//! ufwtui - terminal front-end for ufw
//!
//! An interactive terminal manager for host firewall rules, application profiles
//! and default policies. All firewall logic is owned by the `ufw` executable; this
//! crate captures user intent, validates it, turns it into command strings, and
//! parses the tool's textual output back into structured state.
//!
//! # Architecture
//!
//! - [`core`] - Tool boundary: command builders, output parsers, profile files
//! - [`app`] - View/form state machine driven by key and completion messages
//! - [`tui`] - Terminal setup and the async event loop
//! - [`audit`] - Audit logging for every mutating operation
//! - [`validators`] - Port, port-spec, IP and profile-name validation
//! - [`config`] - Configuration loading
//! - [`utils`] - Utility functions (XDG directories, etc.)
//!
//! # Data Flow
//!
//! A key event enters [`app::State::update`], is routed to the active screen,
//! and may produce an [`app::Effect`] (e.g. "run this command"). Effects run off
//! the update path and their results re-enter as new [`app::Message`]s.

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod app;
pub mod audit;
pub mod config;
pub mod core;
pub mod tui;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use core::error::{Error, ParseError, Result, ValidationError};
pub use core::firewall::{Action, DefaultPolicies, Direction, FirewallStatus, Protocol, Rule};
pub use core::profiles::Profile;
