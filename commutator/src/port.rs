//! Port addressing.
//!
//! Switch ports are addressed by number, by explicit path or by a raw
//! interface string, and translated to the interface syntax of the MES CLI:
//!
//! | Identifier                 | Interface      |
//! |----------------------------|----------------|
//! | `24`                       | `gi 1/0/24`    |
//! | `222`                      | `gi 2/0/22`    |
//! | `1001`                     | `te 1/0/1`     |
//! | `1404`                     | `te 4/0/4`     |
//! | `("gi", 1, 0, 1)`          | `gi 1/0/1`     |
//! | `"po 1"`                   | `po 1`         |
//!
//! Numbers below 1000 are copper (GigabitEthernet) ports, numbers above 1000
//! are fiber (TenGigabitEthernet) ports. The hundreds digit selects the stack
//! unit. `100` and `1000` belong to neither range and cannot be addressed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AddressError;

/// A port identifier, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Port {
    /// Numeric port: twisted-pair below 1000, fiber above.
    Number(u32),

    /// Explicit `<prefix> <unit>/<slot>/<port>` path.
    Path {
        prefix: String,
        unit: u32,
        slot: u32,
        port: u32,
    },

    /// Interface string passed to the CLI unchanged (e.g. `po 1`).
    Raw(String),
}

impl Port {
    /// Build an explicit path identifier.
    pub fn path(prefix: impl Into<String>, unit: u32, slot: u32, port: u32) -> Self {
        Port::Path {
            prefix: prefix.into(),
            unit,
            slot,
            port,
        }
    }

    /// Translate this identifier to a CLI interface token.
    pub fn interface(&self) -> Result<InterfaceToken, AddressError> {
        match self {
            Port::Number(n) => translate_number(*n),
            Port::Path {
                prefix,
                unit,
                slot,
                port,
            } => Ok(InterfaceToken(format!("{prefix} {unit}/{slot}/{port}"))),
            Port::Raw(raw) => {
                if raw.trim().is_empty() {
                    Err(AddressError::Empty)
                } else {
                    Ok(InterfaceToken(raw.clone()))
                }
            }
        }
    }
}

fn translate_number(n: u32) -> Result<InterfaceToken, AddressError> {
    let token = match n {
        0..100 => format!("gi 1/0/{n}"),
        101..1000 => format!("gi {}/0/{}", n / 100, n % 100),
        1001..1100 => format!("te 1/0/{}", n % 100),
        1100.. => format!("te {}/0/{}", (n - 1000) / 100, n % 100),
        // 100 and 1000 fall between the ranges
        _ => return Err(AddressError::Unclassified(n)),
    };
    Ok(InterfaceToken(token))
}

impl From<u32> for Port {
    fn from(n: u32) -> Self {
        Port::Number(n)
    }
}

impl From<&str> for Port {
    fn from(raw: &str) -> Self {
        Port::Raw(raw.to_string())
    }
}

impl From<String> for Port {
    fn from(raw: String) -> Self {
        Port::Raw(raw)
    }
}

impl From<(&str, u32, u32, u32)> for Port {
    fn from((prefix, unit, slot, port): (&str, u32, u32, u32)) -> Self {
        Port::path(prefix, unit, slot, port)
    }
}

impl From<&Port> for Port {
    fn from(port: &Port) -> Self {
        port.clone()
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{n}"),
            Port::Path {
                prefix,
                unit,
                slot,
                port,
            } => write!(f, "{prefix} {unit}/{slot}/{port}"),
            Port::Raw(raw) => write!(f, "{raw}"),
        }
    }
}

/// An interface name in CLI syntax, e.g. `gi 1/0/24`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceToken(String);

impl InterfaceToken {
    /// The token as it appears in commands.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
