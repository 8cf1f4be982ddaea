//! PTY shell channel for interactive switch sessions.

use std::time::Duration;

use log::trace;
use regex::bytes::Regex;
use russh::client::Msg;
use russh::{Channel, ChannelMsg};

use super::buffer::PatternBuffer;
use crate::error::{ChannelError, Result};

/// Configuration for PTY channel behavior.
#[derive(Debug, Clone)]
pub struct PtyConfig {
    /// Default timeout for reads.
    pub timeout: Duration,

    /// Search depth for terminator matching.
    pub search_depth: usize,
}

impl Default for PtyConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            search_depth: 1000,
        }
    }
}

/// Interactive shell channel with pattern-based reads.
pub struct PtyChannel {
    channel: Channel<Msg>,
    config: PtyConfig,
    buffer: PatternBuffer,
    is_open: bool,
}

impl PtyChannel {
    /// Wrap an SSH channel that already has a PTY and a shell.
    pub fn new(channel: Channel<Msg>, config: PtyConfig) -> Self {
        Self {
            channel,
            buffer: PatternBuffer::new(config.search_depth),
            config,
            is_open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
    }

    /// Send a line of input.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        self.write(format!("{line}\n").as_bytes()).await
    }

    /// Send bytes exactly as given.
    pub async fn write(&mut self, data: &[u8]) -> Result<()> {
        if !self.is_open {
            return Err(ChannelError::Closed.into());
        }
        trace!("pty write: {:?}", String::from_utf8_lossy(data));
        self.channel.data(data).await.map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Read until `pattern` matches the tail of the output.
    ///
    /// Returns everything up to and including the match.
    pub async fn read_until(&mut self, pattern: &Regex) -> Result<Vec<u8>> {
        let timeout = self.config.timeout;
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if let Some(data) = self.buffer.take_through(pattern) {
                return Ok(data);
            }

            let msg = tokio::time::timeout_at(deadline, self.channel.wait())
                .await
                .map_err(|_| ChannelError::PatternTimeout(timeout))?;

            match msg {
                Some(ChannelMsg::Data { data }) => {
                    trace!("pty read: {} bytes", data.len());
                    self.buffer.extend(&data);
                }
                Some(ChannelMsg::ExtendedData { data, .. }) => self.buffer.extend(&data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    self.is_open = false;
                    return Err(ChannelError::Closed.into());
                }
                Some(_) => {}
            }
        }
    }

    /// Output received so far that did not end in a terminator.
    pub fn pending(&self) -> std::borrow::Cow<'_, str> {
        self.buffer.as_str_lossy()
    }

    /// Discard unread output.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Send EOF and close the channel.
    pub async fn close(&mut self) -> Result<()> {
        if !self.is_open {
            return Ok(());
        }
        self.is_open = false;
        // The switch may already have hung up after `exit` or `reload`.
        let _ = self.channel.eof().await;
        self.channel.close().await.map_err(ChannelError::Ssh)?;
        Ok(())
    }
}
