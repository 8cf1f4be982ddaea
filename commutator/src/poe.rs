//! Power-over-Ethernet queries.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::parse;

/// What to read from `show power inline <port>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoeQuery {
    /// Operational status: on, or off/fault.
    #[default]
    Status,
    /// Current in mA.
    Current,
    /// Voltage in V.
    Voltage,
    /// The full command output.
    Verbose,
    /// Status, current and voltage together.
    Params,
}

/// Answer to a [`PoeQuery`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoeStatus {
    Enabled(bool),
    Current(f64),
    Voltage(f64),
    Verbose(String),
    Params(PoeParams),
}

impl PoeStatus {
    /// The on/off state, if this answer carries one.
    pub fn enabled(&self) -> Option<bool> {
        match self {
            PoeStatus::Enabled(on) => Some(*on),
            PoeStatus::Params(params) => Some(params.enabled),
            _ => None,
        }
    }
}

/// PoE readings of a port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoeParams {
    pub enabled: bool,
    pub current_ma: Option<f64>,
    pub voltage_v: Option<f64>,
}

impl PoeParams {
    /// Delivered power in W, when both current and voltage are known.
    pub fn power_w(&self) -> Option<f64> {
        Some(self.current_ma? * self.voltage_v? / 1000.0)
    }
}

impl PoeQuery {
    /// Interpret `show power inline` output for this query.
    pub fn parse(self, text: &str) -> Result<PoeStatus, ParseError> {
        Ok(match self {
            PoeQuery::Status => PoeStatus::Enabled(parse::poe_enabled(text)?),
            PoeQuery::Current => PoeStatus::Current(parse::poe_current(text)?),
            PoeQuery::Voltage => PoeStatus::Voltage(parse::poe_voltage(text)?),
            PoeQuery::Verbose => PoeStatus::Verbose(text.to_string()),
            PoeQuery::Params => PoeStatus::Params(PoeParams {
                enabled: parse::poe_enabled(text)?,
                current_ma: parse::poe_current(text).ok(),
                voltage_v: parse::poe_voltage(text).ok(),
            }),
        })
    }
}
