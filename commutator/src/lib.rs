//! # Commutator
//!
//! Async SSH management client for Eltex MES Ethernet switches.
//!
//! Commutator drives the switch's interactive CLI over SSH the way an
//! operator would: it sends commands, waits for the prompt and scrapes the
//! answers into typed values.
//!
//! ## Features
//!
//! - Async SSH sessions via russh
//! - Port numbers translated to MES interface names (`12` is `gi 1/0/12`)
//! - Typed VLAN, PoE and link state queries
//! - VLAN and PoE changes that always leave configuration mode
//! - Command scripts with `write` and `reload` confirmation handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use commutator::{PoeQuery, SwitchBuilder, VlanConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), commutator::Error> {
//!     let mut switch = SwitchBuilder::new("192.168.1.10")
//!         .username("admin")
//!         .password("secret")
//!         .connect()
//!         .await?;
//!
//!     println!("firmware {}", switch.firmware_version().await?);
//!     println!("port 12 is {:?}", switch.link_state(12u32).await?);
//!
//!     switch.set_vlan(12u32, &VlanConfig::access(107)).await?;
//!     println!("{:?}", switch.get_poe(12u32, PoeQuery::Params).await?);
//!
//!     switch.write().await?;
//!     switch.close().await;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod parse;
pub mod platform;
pub mod poe;
pub mod port;
pub mod switch;
pub mod transport;
pub mod vlan;

// Re-export main types for convenience
pub use driver::{Response, Session, SshSession};
pub use error::{Error, ErrorKind, Result};
pub use parse::LinkState;
pub use platform::PlatformDefinition;
pub use poe::{PoeParams, PoeQuery, PoeStatus};
pub use port::{InterfaceToken, Port};
pub use switch::{ScriptOutcome, Switch, SwitchBuilder, SwitchInfo, VlanInfo, VlanQuery};
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};
pub use vlan::{SwitchportMode, SwitchportSettings, VlanConfig};
