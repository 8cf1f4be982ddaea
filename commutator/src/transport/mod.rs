//! SSH transport layer wrapping russh.
//!
//! Connection setup, authentication, host key checks and PTY channel
//! creation. Everything above this layer only sees a [`russh::Channel`].

pub mod config;
mod ssh;

pub use config::{AuthMethod, HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
