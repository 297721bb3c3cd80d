use thiserror::Error;

/// Core error types for ufwtui
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The firewall tool could not be invoked at startup
    #[error("{tool} is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    /// A persisted rule file needed for export could not be read
    #[error("reading {path}: {source}")]
    RuleFile {
        path: String,
        source: std::io::Error,
    },

    /// No per-user state directory could be determined
    #[error("no state directory available")]
    NoStateDir,
}

/// Form input errors
///
/// Never fatal: the form stays open with its state preserved and the message
/// is shown inline so the user can correct and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("invalid port range: {0}")]
    InvalidPortRange(String),

    #[error("invalid source IP: {0}")]
    InvalidSourceIp(String),

    #[error("invalid destination IP: {0}")]
    InvalidDestinationIp(String),

    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),

    #[error("port range must specify protocol: {0}")]
    RangeRequiresProtocol(String),

    #[error("too many '/' in group: {0}")]
    TooManyProtocolSeparators(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("invalid profile name: {0}")]
    InvalidProfileName(String),

    #[error("invalid interface: {0}")]
    InvalidInterface(String),
}

/// Errors raised while interpreting `ufw` output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("default policy line not found in ufw output")]
    DefaultPolicyLineMissing,
}

pub type Result<T> = std::result::Result<T, Error>;
