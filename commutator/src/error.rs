//! Error types for commutator.

use std::io;
use thiserror::Error;

/// Main error type for commutator operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Port identifier could not be translated to an interface
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Device output did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Illegal VLAN configuration
    #[error("VLAN configuration error: {0}")]
    VlanConfig(#[from] VlanConfigError),

    /// Failed to read a command script
    #[error("Script error: {0}")]
    Script(#[source] io::Error),
}

/// Coarse error category, for callers that only care about which layer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The port could not be addressed; nothing was sent.
    Address,
    /// The session or the device rejected or lost the exchange.
    Transport,
    /// The device answered, but not in the expected format.
    Parse,
    /// The request itself was invalid.
    Config,
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Address(_) => ErrorKind::Address,
            Error::Transport(_) | Error::Channel(_) | Error::Script(_) => ErrorKind::Transport,
            Error::Driver(DriverError::InvalidConfig { .. }) => ErrorKind::Config,
            Error::Driver(_) => ErrorKind::Transport,
            Error::Parse(_) => ErrorKind::Parse,
            Error::VlanConfig(_) => ErrorKind::Config,
        }
    }

    /// Whether the device rejected a command as invalid.
    pub fn is_invalid_command(&self) -> bool {
        matches!(self, Error::Driver(DriverError::InvalidCommand { .. }))
    }
}

/// Port addressing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The numeric port matches none of the twisted-pair or fiber ranges
    #[error("Port number {0} does not map to any interface")]
    Unclassified(u32),

    /// Empty raw interface string
    #[error("Empty interface name")]
    Empty,
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Host key is not in known_hosts and verification is strict
    #[error("Unknown host key for {host}:{port}")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// Failed to read or update known_hosts
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Channel layer errors (pattern matching, PTY operations).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Failed to open PTY channel
    #[error("Failed to open PTY channel")]
    PtyOpenFailed,

    /// Pattern matching timed out
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(std::time::Duration),

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Driver layer errors (command execution, session state).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Session not connected
    #[error("Session not connected - call open() first")]
    NotConnected,

    /// Session already connected
    #[error("Session already connected")]
    AlreadyConnected,

    /// The device rejected the command. The session still buffers the output.
    #[error("Command '{command}' rejected: {message}")]
    InvalidCommand { command: String, message: String },

    /// Invalid configuration in the builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Response format mismatches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Expected key phrase is absent from the output
    #[error("Marker '{marker}' not found in output")]
    MarkerNotFound { marker: &'static str },

    /// A line or whitespace field is missing
    #[error("Missing field {index} after '{marker}'")]
    MissingField { marker: &'static str, index: usize },

    /// A field held a value outside the expected set
    #[error("Unexpected value '{value}' after '{marker}'")]
    UnexpectedField { marker: &'static str, value: String },

    /// A trailing token was not a number
    #[error("Invalid number '{value}' in line '{line}'")]
    InvalidNumber { value: String, line: String },
}

/// Illegal combinations of VLAN switchport settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VlanConfigError {
    /// Settings carry VLAN fields but no mode
    #[error("Switchport settings have no mode")]
    MissingMode,

    /// Access mode needs an access VLAN
    #[error("Access mode requires an access VLAN")]
    MissingAccessVlan,

    /// A field is not valid for the given mode
    #[error("Field '{field}' is not valid in {mode} mode")]
    FieldNotAllowed { field: &'static str, mode: String },
}

/// Result type alias using commutator's Error.
pub type Result<T> = std::result::Result<T, Error>;
