//! Scripted in-memory session for tests.

use std::collections::HashMap;
use std::time::Duration;

use super::{Response, Session};
use crate::error::{ChannelError, DriverError, Result};

/// Something the client did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Execute(String),
    Raw(String),
    Terminator(Option<String>),
    Close,
}

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Rejected(String),
    Lost,
}

/// Session that answers from a table of canned outputs and records traffic.
#[derive(Debug, Default)]
pub struct MockSession {
    replies: HashMap<String, Reply>,
    pub sent: Vec<Sent>,
    last_response: Option<String>,
    closed: bool,
    close_fails: bool,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `output`.
    pub fn reply(mut self, command: &str, output: &str) -> Self {
        self.replies
            .insert(command.to_string(), Reply::Output(output.to_string()));
        self
    }

    /// Reject `command` as invalid, while still buffering `output`.
    pub fn reject(mut self, command: &str, output: &str) -> Self {
        self.replies
            .insert(command.to_string(), Reply::Rejected(output.to_string()));
        self
    }

    /// Drop the connection when `command` is sent.
    pub fn lose_on(mut self, command: &str) -> Self {
        self.replies.insert(command.to_string(), Reply::Lost);
        self
    }

    /// Report an error from `close`, after closing anyway.
    pub fn failing_close(mut self) -> Self {
        self.close_fails = true;
        self
    }

    /// Commands passed to `execute`, in order.
    pub fn executed(&self) -> Vec<&str> {
        self.sent
            .iter()
            .filter_map(|sent| match sent {
                Sent::Execute(command) => Some(command.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Session for MockSession {
    async fn execute(&mut self, command: &str) -> Result<Response> {
        if self.closed {
            return Err(DriverError::NotConnected.into());
        }
        self.sent.push(Sent::Execute(command.to_string()));

        let reply = self
            .replies
            .get(command)
            .cloned()
            .unwrap_or(Reply::Output(String::new()));

        match reply {
            Reply::Output(output) => {
                self.last_response = Some(output.clone());
                Ok(Response::new(
                    command,
                    output.clone(),
                    output,
                    "console#",
                    Duration::ZERO,
                ))
            }
            Reply::Rejected(output) => {
                self.last_response = Some(output);
                Err(DriverError::InvalidCommand {
                    command: command.to_string(),
                    message: "% Unrecognized command".to_string(),
                }
                .into())
            }
            Reply::Lost => Err(ChannelError::Closed.into()),
        }
    }

    async fn send(&mut self, raw: &str) -> Result<()> {
        self.sent.push(Sent::Raw(raw.to_string()));
        Ok(())
    }

    fn set_terminator(&mut self, pattern: &str) -> Result<()> {
        regex::Regex::new(pattern).map_err(ChannelError::InvalidPattern)?;
        self.sent.push(Sent::Terminator(Some(pattern.to_string())));
        Ok(())
    }

    fn reset_terminator(&mut self) {
        self.sent.push(Sent::Terminator(None));
    }

    fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.sent.push(Sent::Close);
        if self.close_fails {
            return Err(ChannelError::Closed.into());
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.closed
    }
}
