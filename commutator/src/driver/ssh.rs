//! SSH session implementation.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use super::Session;
use super::response::{Response, normalize_output};
use crate::channel::{PtyChannel, PtyConfig, Terminator};
use crate::error::{ChannelError, DriverError, Result};
use crate::platform::PlatformDefinition;
use crate::transport::{SshConfig, SshTransport};

/// CLI session over an SSH PTY.
///
/// Handles:
/// - SSH transport and PTY channel lifetime
/// - Command execution with prompt (or custom terminator) detection
/// - Tracking the current CLI mode from the prompt
/// - Flagging rejected commands using the platform's failure phrases
pub struct SshSession {
    ssh_config: SshConfig,
    platform: PlatformDefinition,

    /// SSH transport (None when disconnected).
    transport: Option<SshTransport>,

    /// Shell channel (None when disconnected).
    channel: Option<PtyChannel>,

    terminator: Terminator,
    timeout: Duration,

    /// Normalized output of the last command.
    last_response: Option<String>,

    /// Name of the CLI mode seen in the last prompt.
    current_privilege: Option<String>,
}

impl SshSession {
    /// Create a session. Nothing is sent until [`open`](Self::open).
    pub fn new(ssh_config: SshConfig, platform: PlatformDefinition) -> Result<Self> {
        let prompt = platform.prompt_pattern().map_err(ChannelError::InvalidPattern)?;
        Ok(Self {
            timeout: ssh_config.timeout,
            ssh_config,
            platform,
            transport: None,
            channel: None,
            terminator: Terminator::new(prompt),
            last_response: None,
            current_privilege: None,
        })
    }

    /// Connect, wait for the first prompt and run the platform's open commands.
    pub async fn open(&mut self) -> Result<()> {
        if self.transport.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let transport = SshTransport::connect(self.ssh_config.clone()).await?;
        let channel = transport.open_channel().await?;
        self.transport = Some(transport);
        self.channel = Some(PtyChannel::new(
            channel,
            PtyConfig {
                timeout: self.timeout,
                ..Default::default()
            },
        ));

        let prompt_pattern = self.terminator.prompt().clone();
        let banner = self.channel_mut()?.read_until(&prompt_pattern).await?;
        let banner = String::from_utf8_lossy(&banner);
        self.track_privilege(last_line(&banner));

        for command in self.platform.on_open_commands.clone() {
            self.execute(&command).await?;
        }

        debug!(
            "session to {} open, mode {:?}",
            self.ssh_config.host, self.current_privilege
        );
        Ok(())
    }

    /// The platform this session speaks.
    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    /// Current CLI mode name, as seen in the last prompt.
    pub fn current_privilege(&self) -> Option<&str> {
        self.current_privilege.as_deref()
    }

    /// Set the response timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
        if let Some(channel) = self.channel.as_mut() {
            channel.set_timeout(timeout);
        }
    }

    fn channel_mut(&mut self) -> Result<&mut PtyChannel> {
        Ok(self.channel.as_mut().ok_or(DriverError::NotConnected)?)
    }

    fn track_privilege(&mut self, prompt: &str) {
        if let Some(level) = self.platform.determine_privilege(prompt) {
            trace!("mode: {}", level.name);
            self.current_privilege = Some(level.name.clone());
        }
    }
}

impl Session for SshSession {
    async fn execute(&mut self, command: &str) -> Result<Response> {
        let pattern = self.terminator.active().clone();
        let start = Instant::now();

        debug!("execute: {:?}", command);
        let channel = self.channel_mut()?;
        if !channel.pending().is_empty() {
            trace!("discarding unread output: {:?}", channel.pending());
            channel.clear();
        }
        channel.send_line(command).await?;
        let data = channel.read_until(&pattern).await?;

        let elapsed = start.elapsed();
        let raw_result = String::from_utf8_lossy(&data).to_string();
        let prompt = last_line(&raw_result).trim().to_string();
        self.track_privilege(&prompt);

        let result = normalize_output(&raw_result, command);
        trace!("response ({:?}): {:?}", elapsed, result);
        self.last_response = Some(result.clone());

        if let Some(failure) = self.platform.detect_failure(&result) {
            debug!("command {:?} rejected: {}", command, failure);
            return Err(DriverError::InvalidCommand {
                command: command.to_string(),
                message: failure.to_string(),
            }
            .into());
        }

        Ok(Response::new(command, result, raw_result, prompt, elapsed))
    }

    async fn send(&mut self, raw: &str) -> Result<()> {
        debug!("send: {:?}", raw);
        self.channel_mut()?.write(raw.as_bytes()).await
    }

    fn set_terminator(&mut self, pattern: &str) -> Result<()> {
        self.terminator
            .set(pattern)
            .map_err(ChannelError::InvalidPattern)?;
        Ok(())
    }

    fn reset_terminator(&mut self) {
        self.terminator.reset();
    }

    fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut channel) = self.channel.take() {
            for command in &self.platform.on_close_commands {
                if let Err(e) = channel.send_line(command).await {
                    warn!("failed to send {:?} on close: {}", command, e);
                }
            }
            channel.close().await?;
        }
        if let Some(transport) = self.transport.take() {
            transport.close().await?;
        }
        self.current_privilege = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.channel.as_ref().is_some_and(PtyChannel::is_open)
    }
}

fn last_line(text: &str) -> &str {
    text.rsplit('\n').next().unwrap_or(text)
}
