//! Platform definitions.
//!
//! A platform describes a CLI dialect: prompt patterns per mode, the phrases
//! the device uses to reject a command, and the commands run on open and
//! close. Only the Eltex MES dialect is built in; other dialects can be
//! passed to the builder as a custom [`PlatformDefinition`].

mod definition;
pub mod eltex_mes;
mod privilege_level;

pub use definition::PlatformDefinition;
pub use privilege_level::PrivilegeLevel;
