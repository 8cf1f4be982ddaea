//! Switch management client.
//!
//! [`Switch`] turns port identifiers and typed settings into MES CLI
//! commands and parses the answers. It works over any [`Session`]; in
//! production that is an [`SshSession`] built with [`SwitchBuilder`].
//!
//! Every operation returns a [`Result`]. Nothing panics on unexpected device
//! output: a missing marker or field is a [`ParseError`](crate::error::ParseError),
//! an unaddressable port is an [`AddressError`](crate::error::AddressError),
//! so "no answer" can always be told apart from `false`.

mod builder;
mod scope;
mod script;

pub use builder::{DEFAULT_LOGIN, DEFAULT_PASSWORD, SwitchBuilder};
pub use scope::ConfigScope;
pub use script::{RELOAD_CONFIRM, ScriptLine, ScriptOutcome, WRITE_CONFIRM};

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::driver::{Session, SshSession};
use crate::error::{Error, Result};
use crate::parse::{self, LinkState};
use crate::poe::{PoeQuery, PoeStatus};
use crate::port::{InterfaceToken, Port};
use crate::vlan::{self, SwitchportMode, SwitchportSettings, VlanConfig};

/// What to read from an interface's switchport configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VlanQuery {
    /// Parsed settings (mode, access, allowed, native, mtv).
    #[default]
    Settings,
    /// Just the switchport mode.
    Mode,
    /// The raw `switchport` lines.
    Lines,
}

/// Answer to a [`VlanQuery`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum VlanInfo {
    Settings(SwitchportSettings),
    Mode(Option<SwitchportMode>),
    Lines(Vec<String>),
}

/// Descriptive data about the managed switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchInfo {
    /// Management address.
    pub host: String,
    /// Vendor, e.g. "Eltex".
    pub brand: String,
    /// Model, e.g. "MES2324".
    pub model: Option<String>,
}

/// A managed Ethernet switch.
///
/// Owns its session for its whole lifetime. Call [`close`](Self::close) when
/// done; dropping an open switch logs a warning.
pub struct Switch<S: Session> {
    session: S,
    info: SwitchInfo,
    echo: bool,
}

impl<S: Session> Switch<S> {
    /// Manage a switch over an already prepared session.
    pub fn new(session: S, info: SwitchInfo) -> Self {
        Self {
            session,
            info,
            echo: false,
        }
    }

    pub fn info(&self) -> &SwitchInfo {
        &self.info
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Log the output of [`execute`](Self::execute) at info level.
    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    /// Run an arbitrary command and return its output.
    pub async fn execute(&mut self, command: &str) -> Result<String> {
        let response = self.session.execute(command).await?;
        if self.echo {
            info!("{}", response.result);
        }
        Ok(response.result)
    }

    /// `show interfaces` for all ports.
    pub async fn show_interfaces(&mut self) -> Result<String> {
        Ok(self.session.execute("sh int").await?.result)
    }

    /// `show interfaces` for one port.
    pub async fn show_interface(&mut self, port: impl Into<Port>) -> Result<String> {
        let interface = port.into().interface()?;
        Ok(self
            .session
            .execute(&format!("sh int {interface}"))
            .await?
            .result)
    }

    /// `show running-config` for the whole switch.
    pub async fn show_running_config(&mut self) -> Result<String> {
        Ok(self.session.execute("sh ru").await?.result)
    }

    /// `show running-config` for one interface.
    pub async fn show_interface_config(&mut self, port: impl Into<Port>) -> Result<String> {
        let interface = port.into().interface()?;
        self.interface_config(&interface).await
    }

    /// Firmware version, e.g. `4.0.13.3`.
    pub async fn firmware_version(&mut self) -> Result<String> {
        let response = self.session.execute("show version").await?;
        Ok(parse::firmware_version(&response.result)?)
    }

    /// Link state of a port.
    pub async fn link_state(&mut self, port: impl Into<Port>) -> Result<LinkState> {
        let interface = port.into().interface()?;
        let response = self
            .session
            .execute(&format!("show int status {interface}"))
            .await?;
        Ok(parse::link_state(&response.result)?)
    }

    /// Switchport configuration of a port.
    pub async fn get_vlan(&mut self, port: impl Into<Port>, query: VlanQuery) -> Result<VlanInfo> {
        let interface = port.into().interface()?;
        let config = self.interface_config(&interface).await?;
        Ok(match query {
            VlanQuery::Settings => VlanInfo::Settings(parse::switchport_settings(&config)?),
            VlanQuery::Mode => VlanInfo::Mode(parse::switchport_mode(&config)),
            VlanQuery::Lines => VlanInfo::Lines(parse::switchport_lines(&config)),
        })
    }

    /// Parsed switchport settings of a port.
    pub async fn vlan_settings(&mut self, port: impl Into<Port>) -> Result<SwitchportSettings> {
        let interface = port.into().interface()?;
        self.switchport_settings(&interface).await
    }

    /// Replace the switchport configuration of a port.
    ///
    /// The current settings are removed first; [`VlanConfig::None`] leaves
    /// the port with no switchport configuration at all.
    pub async fn set_vlan(&mut self, port: impl Into<Port>, config: &VlanConfig) -> Result<()> {
        let interface = port.into().interface()?;
        let current = self.switchport_settings(&interface).await?;
        debug!("set_vlan {}: {:?} -> {:?}", interface, current, config);

        let commands = vlan::apply_commands(&current, config);
        self.configure_interface(&interface, &commands).await
    }

    /// PoE information of a port.
    pub async fn get_poe(&mut self, port: impl Into<Port>, query: PoeQuery) -> Result<PoeStatus> {
        let interface = port.into().interface()?;
        let command = format!("show power inline {interface}");

        let output = match self.session.execute(&command).await {
            Ok(response) => response.result,
            // The switch flags this command as invalid but still prints the table.
            Err(e) if e.is_invalid_command() => {
                debug!("recovering PoE output for {} from buffer", interface);
                let buffered = self.session.last_response().ok_or(e)?;
                strip_echo(buffered, &command).to_string()
            }
            Err(e) => return Err(e),
        };

        Ok(query.parse(&output)?)
    }

    /// Whether PoE is delivering power on a port.
    pub async fn poe_enabled(&mut self, port: impl Into<Port>) -> Result<bool> {
        match self.get_poe(port, PoeQuery::Status).await? {
            PoeStatus::Enabled(enabled) => Ok(enabled),
            other => Err(Error::Parse(crate::error::ParseError::UnexpectedField {
                marker: "Port Status",
                value: format!("{other:?}"),
            })),
        }
    }

    /// Turn PoE on (`auto`) or off (`never`) for a port.
    pub async fn set_poe(&mut self, port: impl Into<Port>, enabled: bool) -> Result<()> {
        let interface = port.into().interface()?;
        let command = if enabled {
            "power inline auto"
        } else {
            "power inline never"
        };
        self.configure_interface(&interface, &[command]).await
    }

    /// Save the running configuration, confirming the overwrite question.
    pub async fn write(&mut self) -> Result<()> {
        self.confirmed_write("write").await
    }

    /// Run a command script from a file. See [`ScriptLine`] for the format.
    pub async fn execute_file(&mut self, path: impl AsRef<Path>) -> Result<ScriptOutcome> {
        let script = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(Error::Script)?;
        self.execute_script(&script).await
    }

    /// Run a command script held in memory.
    pub async fn execute_script(&mut self, script: &str) -> Result<ScriptOutcome> {
        let mut outcome = ScriptOutcome::default();

        for line in script.lines() {
            match ScriptLine::parse(line) {
                ScriptLine::Blank => continue,
                ScriptLine::Command(command) => {
                    self.execute(command).await?;
                }
                ScriptLine::Write(command) => self.confirmed_write(command).await?,
                ScriptLine::Reload(command) => {
                    self.session.set_terminator(RELOAD_CONFIRM)?;
                    let confirmed = match self.execute(command).await {
                        Ok(_) => self.session.send("y").await,
                        Err(e) => Err(e),
                    };
                    if confirmed.is_err() {
                        self.session.reset_terminator();
                    }
                    confirmed?;
                    if let Err(e) = self.session.close().await {
                        warn!("Error while disconnecting from {}: {}", self.info.host, e);
                    }
                    info!("{} is reloading", self.info.host);
                    outcome.executed += 1;
                    outcome.reloaded = true;
                    break;
                }
            }
            outcome.executed += 1;
        }

        Ok(outcome)
    }

    /// Disconnect. Failures are logged, never returned.
    pub async fn close(&mut self) {
        if !self.session.is_open() {
            return;
        }
        info!("Disconnecting from {}", self.info.host);
        if let Err(e) = self.session.close().await {
            warn!("Error while disconnecting from {}: {}", self.info.host, e);
        }
    }

    async fn confirmed_write(&mut self, command: &str) -> Result<()> {
        self.session.set_terminator(WRITE_CONFIRM)?;
        let asked = self.execute(command).await;
        self.session.reset_terminator();
        asked?;
        self.execute("y").await?;
        Ok(())
    }

    async fn interface_config(&mut self, interface: &InterfaceToken) -> Result<String> {
        Ok(self
            .session
            .execute(&format!("sh ru int {interface}"))
            .await?
            .result)
    }

    async fn switchport_settings(
        &mut self,
        interface: &InterfaceToken,
    ) -> Result<SwitchportSettings> {
        let config = self.interface_config(interface).await?;
        Ok(parse::switchport_settings(&config)?)
    }

    /// Run `commands` in the interface's configuration mode, always leaving it.
    async fn configure_interface<C: AsRef<str>>(
        &mut self,
        interface: &InterfaceToken,
        commands: &[C],
    ) -> Result<()> {
        let mut scope = ConfigScope::interface(&mut self.session, interface).await?;
        let applied = scope.send_commands(commands).await;
        let exited = scope.exit().await;
        applied?;
        exited
    }
}

impl Switch<SshSession> {
    /// Connect and log in.
    pub async fn open(&mut self) -> Result<()> {
        info!("Connecting to {}", self.info.host);
        self.session.open().await?;
        info!("Logged in to {}", self.info.host);
        Ok(())
    }
}

impl<S: Session> fmt::Display for Switch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} commutator, ip {}", self.info.brand, self.info.host)
    }
}

impl<S: Session> Drop for Switch<S> {
    fn drop(&mut self) {
        if self.session.is_open() {
            warn!("Switch {} dropped without close()", self.info.host);
        }
    }
}

fn strip_echo<'a>(output: &'a str, command: &str) -> &'a str {
    output
        .strip_prefix(command)
        .unwrap_or(output)
        .trim_start_matches(['\r', '\n'])
}

#[cfg(test)]
mod tests;
