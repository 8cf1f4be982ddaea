//! Configuration mode guard.
//!
//! Configuration changes on the switch happen between an `enter` and an
//! `exit`: `config` then `interface <port>` on the way in, one `ex` per level
//! on the way out. [`ConfigScope`] counts the levels it entered and
//! [`exit`](ConfigScope::exit) leaves exactly that many:
//!
//! - the guard holds `&mut` to the session, so nothing else can be sent while
//!   the switch is in configuration mode;
//! - `exit()` consumes the guard, so it happens once;
//! - dropping the guard without `exit()` leaves the switch in configuration
//!   mode and logs a warning.

use log::{debug, warn};

use crate::driver::{Response, Session};
use crate::error::Result;
use crate::port::InterfaceToken;

const ENTER_CONFIG: &str = "config";
const EXIT: &str = "ex";

/// Guard for a configuration mode exchange.
pub struct ConfigScope<'a, S: Session> {
    session: &'a mut S,
    depth: usize,
    consumed: bool,
}

impl<'a, S: Session> ConfigScope<'a, S> {
    /// Enter interface configuration mode for `interface`.
    ///
    /// If the interface is rejected, the global configuration level already
    /// entered is left again before the error is returned.
    pub async fn interface(session: &'a mut S, interface: &InterfaceToken) -> Result<Self> {
        session.execute(ENTER_CONFIG).await?;
        let mut scope = Self {
            session,
            depth: 1,
            consumed: false,
        };

        if let Err(e) = scope.send_command(&format!("interface {interface}")).await {
            if let Err(exit_error) = scope.exit().await {
                warn!("failed to leave configuration mode: {}", exit_error);
            }
            return Err(e);
        }
        scope.depth = 2;
        debug!("entered configuration of {}", interface);

        Ok(scope)
    }

    /// Number of levels `exit()` will leave.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Send a command inside the scope.
    pub async fn send_command(&mut self, command: &str) -> Result<Response> {
        self.session.execute(command).await
    }

    /// Send commands in order, stopping at the first failure.
    pub async fn send_commands<C: AsRef<str>>(&mut self, commands: &[C]) -> Result<()> {
        for command in commands {
            self.send_command(command.as_ref()).await?;
        }
        Ok(())
    }

    /// Leave every level this scope entered.
    ///
    /// All exits are attempted even if one fails; the first error is
    /// returned.
    pub async fn exit(mut self) -> Result<()> {
        self.consumed = true;
        let mut first_error = None;
        for _ in 0..self.depth {
            if let Err(e) = self.session.execute(EXIT).await {
                warn!("exit from configuration mode failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<S: Session> Drop for ConfigScope<'_, S> {
    fn drop(&mut self) {
        if !self.consumed {
            warn!(
                "ConfigScope dropped without exit(), {} configuration level(s) left open",
                self.depth
            );
        }
    }
}
