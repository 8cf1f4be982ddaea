//! Interactive CLI sessions.
//!
//! [`Session`] is the contract the switch client is written against: send a
//! command and get its output back, send raw input, change what counts as
//! the end of a response, and close. [`SshSession`] implements it over an
//! SSH PTY.

#[cfg(test)]
pub(crate) mod mock;
pub(crate) mod response;
mod ssh;

pub use response::Response;
pub use ssh::SshSession;

use std::future::Future;

use crate::error::Result;

/// A stateful, single-stream CLI session.
///
/// Commands are strictly sequential: each call waits for the full response
/// before returning, and `&mut self` keeps a second command from being
/// issued while one is in flight.
pub trait Session: Send {
    /// Send a command and wait for the terminator.
    ///
    /// If the device rejects the command, this returns
    /// [`DriverError::InvalidCommand`](crate::error::DriverError::InvalidCommand)
    /// but the output is still recorded and available via
    /// [`last_response`](Self::last_response).
    fn execute(&mut self, command: &str) -> impl Future<Output = Result<Response>> + Send;

    /// Send raw input without waiting for anything.
    fn send(&mut self, raw: &str) -> impl Future<Output = Result<()>> + Send;

    /// Treat `pattern` (a regex) as the end of a response instead of the prompt.
    fn set_terminator(&mut self, pattern: &str) -> Result<()>;

    /// Go back to the prompt as the response terminator.
    fn reset_terminator(&mut self);

    /// Output of the most recent `execute`, successful or not.
    fn last_response(&self) -> Option<&str>;

    /// Close the session.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Check if the session is open.
    fn is_open(&self) -> bool;
}
