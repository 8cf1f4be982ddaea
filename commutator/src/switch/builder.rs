//! Builder for switch clients.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::{Switch, SwitchInfo};
use crate::driver::SshSession;
use crate::error::{DriverError, Result};
use crate::platform::{PlatformDefinition, eltex_mes};
use crate::transport::{AuthMethod, HostKeyVerification, SshConfig};

/// Default login of factory-fresh MES switches.
pub const DEFAULT_LOGIN: &str = "admin";

/// Default password of factory-fresh MES switches.
pub const DEFAULT_PASSWORD: &str = "admin";

/// Builder for an SSH-managed [`Switch`].
///
/// # Example
///
/// ```rust,no_run
/// use commutator::{SwitchBuilder, VlanConfig};
///
/// # async fn example() -> Result<(), commutator::Error> {
/// let mut switch = SwitchBuilder::new("192.168.1.10")
///     .username("admin")
///     .password("secret")
///     .model("MES2324")
///     .connect()
///     .await?;
///
/// switch.set_vlan(12u32, &VlanConfig::access(107)).await?;
/// switch.close().await;
/// # Ok(())
/// # }
/// ```
pub struct SwitchBuilder {
    host: String,
    port: u16,
    username: String,
    auth: AuthMethod,
    platform: Option<PlatformDefinition>,
    timeout: Duration,
    terminal_width: Option<u32>,
    terminal_height: Option<u32>,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    brand: String,
    model: Option<String>,
    echo: bool,
}

impl SwitchBuilder {
    /// Start a builder for the switch at `host`, with factory credentials.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: DEFAULT_LOGIN.to_string(),
            auth: AuthMethod::Password(SecretString::from(DEFAULT_PASSWORD.to_string())),
            platform: None,
            timeout: Duration::from_secs(30),
            terminal_width: None,
            terminal_height: None,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
            brand: "Eltex".to_string(),
            model: None,
            echo: false,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = AuthMethod::Password(SecretString::from(password.into()));
        self
    }

    /// Authenticate with a private key instead of a password.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        };
        self
    }

    pub fn private_key_with_passphrase(
        mut self,
        key_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        };
        self
    }

    /// Use a different CLI dialect than Eltex MES.
    pub fn platform(mut self, platform: PlatformDefinition) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Connect and per-response timeout (default: 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the platform's terminal dimensions.
    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = Some(width);
        self.terminal_height = Some(height);
        self
    }

    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Accept any host key. For lab switches only.
    pub fn danger_disable_host_key_verification(mut self) -> Self {
        self.host_key_verification = HostKeyVerification::Disabled;
        self
    }

    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Vendor name shown when the switch is displayed (default: "Eltex").
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Switch model, e.g. "MES2324".
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Log the output of every [`Switch::execute`] call at info level.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Build the client without connecting.
    pub fn build(self) -> Result<Switch<SshSession>> {
        if self.host.trim().is_empty() {
            return Err(DriverError::InvalidConfig {
                message: "Host is required".to_string(),
            }
            .into());
        }
        if self.username.is_empty() {
            return Err(DriverError::InvalidConfig {
                message: "Username is required".to_string(),
            }
            .into());
        }

        let platform = self.platform.unwrap_or_else(eltex_mes::platform);

        let ssh_config = SshConfig {
            host: self.host.clone(),
            port: self.port,
            username: self.username,
            auth: self.auth,
            timeout: self.timeout,
            terminal_width: self.terminal_width.unwrap_or(platform.terminal_width),
            terminal_height: self.terminal_height.unwrap_or(platform.terminal_height),
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        };

        let info = SwitchInfo {
            host: self.host,
            brand: self.brand,
            model: self.model,
        };

        let mut switch = Switch::new(SshSession::new(ssh_config, platform)?, info);
        switch.set_echo(self.echo);
        Ok(switch)
    }

    /// Build the client and open the session.
    pub async fn connect(self) -> Result<Switch<SshSession>> {
        let mut switch = self.build()?;
        switch.open().await?;
        Ok(switch)
    }
}
