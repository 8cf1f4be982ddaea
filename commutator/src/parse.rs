//! Parsers for `show` command output.
//!
//! Every parser works line by line, looking for fixed key phrases of the MES
//! CLI. They are pure functions over the response text, so they can be used
//! on output captured elsewhere.

use crate::error::ParseError;
use crate::vlan::{SwitchportMode, SwitchportSettings};

const VERSION_LINE: &str = "Version";
const VERSION_MARKER: &str = "Version:";
const STATUS_HEADER: &str = "Port";
const LINK_STATE_FIELD: usize = 6;
const POE_STATUS: &str = "Port Status";
const POE_ON: &str = "Port is on";
const POE_CURRENT: &str = "Current";
const POE_VOLTAGE: &str = "Voltage";

/// Link state reported by `show interfaces status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LinkState {
    Up,
    Down,
}

impl LinkState {
    /// Whether the link is up.
    pub fn is_up(self) -> bool {
        self == LinkState::Up
    }
}

/// Firmware version from `show version`.
///
/// ```text
/// SW version    4.0.13.3 ( date  16-Feb-2020 time  16:24:01 )
/// Active-image: flash://system/images/image1.bin
///   Version: 4.0.13.3
/// ```
pub fn firmware_version(text: &str) -> Result<String, ParseError> {
    let line = text
        .lines()
        .find(|line| line.contains(VERSION_LINE))
        .ok_or(ParseError::MarkerNotFound {
            marker: VERSION_LINE,
        })?;

    line.split_once(VERSION_MARKER)
        .map(|(_, version)| version.trim().to_string())
        .ok_or(ParseError::MarkerNotFound {
            marker: VERSION_MARKER,
        })
}

/// Link state of a single port from `show interfaces status <port>`.
///
/// The status is the 7th column of the row two lines below a header line.
/// Header lines are tried in order until one yields `Up` or `Down`; a
/// missing row or column ends the search with an error.
///
/// ```text
///                                              Flow Link          Back   Mdix
/// Port     Type         Duplex  Speed Neg      ctrl State       Pressure Mode
/// -------- ------------ ------  ----- -------- ---- ----------- -------- -------
/// gi1/0/1  1G-Copper    Full    1000  Enabled  Off  Up          Disabled On
/// ```
pub fn link_state(text: &str) -> Result<LinkState, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut error = ParseError::MarkerNotFound {
        marker: STATUS_HEADER,
    };

    for (header, _) in lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains(STATUS_HEADER))
    {
        let field = lines
            .get(header + 2)
            .and_then(|row| row.split_whitespace().nth(LINK_STATE_FIELD))
            .ok_or(ParseError::MissingField {
                marker: STATUS_HEADER,
                index: LINK_STATE_FIELD,
            })?;

        match field {
            "Up" => return Ok(LinkState::Up),
            "Down" => return Ok(LinkState::Down),
            other => {
                error = ParseError::UnexpectedField {
                    marker: STATUS_HEADER,
                    value: other.to_string(),
                }
            }
        }
    }

    Err(error)
}

/// Switchport mode from `show running-config interface <port>`.
///
/// The first line naming a mode wins.
pub fn switchport_mode(text: &str) -> Option<SwitchportMode> {
    text.lines().find_map(|line| {
        if line.contains("switchport access") {
            Some(SwitchportMode::Access)
        } else if line.contains("switchport mode trunk") {
            Some(SwitchportMode::Trunk)
        } else if line.contains("switchport mode customer") {
            Some(SwitchportMode::Customer)
        } else if line.contains("switchport mode general") {
            Some(SwitchportMode::General)
        } else {
            None
        }
    })
}

/// All `switchport` lines of an interface config, trimmed.
pub fn switchport_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.contains("switchport"))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Switchport settings from `show running-config interface <port>`.
///
/// ```text
/// interface gigabitethernet1/0/12
///  switchport mode trunk
///  switchport trunk allowed vlan add 102,104
///  switchport trunk native vlan 110
///  switchport trunk multicast-tv vlan 118
/// exit
/// ```
///
/// Later lines overwrite earlier ones. The allowed list stays textual since
/// it may hold ranges.
pub fn switchport_settings(text: &str) -> Result<SwitchportSettings, ParseError> {
    let mut settings = SwitchportSettings::default();

    for line in text.lines() {
        if line.contains("switchport access vlan") {
            settings.mode = Some(SwitchportMode::Access);
            settings.access = Some(last_number(line)?);
        } else if line.contains("multicast-tv vlan") {
            settings.mtv = Some(last_number(line)?);
        } else if line.contains("switchport mode trunk") {
            settings.mode = Some(SwitchportMode::Trunk);
        } else if line.contains("switchport trunk native") {
            settings.native = Some(last_number(line)?);
        } else if line.contains("switchport trunk allowed") {
            if let Some(allowed) = last_token(line) {
                settings.allowed = Some(allowed.to_string());
            }
        }
    }

    Ok(settings)
}

/// Operational PoE status from `show power inline <port>`.
///
/// `true` when the port status line reads "Port is on"; off and fault
/// conditions are both `false`.
pub fn poe_enabled(text: &str) -> Result<bool, ParseError> {
    text.lines()
        .find(|line| line.contains(POE_STATUS))
        .map(|line| line.contains(POE_ON))
        .ok_or(ParseError::MarkerNotFound { marker: POE_STATUS })
}

/// PoE current in mA.
pub fn poe_current(text: &str) -> Result<f64, ParseError> {
    trailing_float(text, POE_CURRENT)
}

/// PoE voltage in V.
pub fn poe_voltage(text: &str) -> Result<f64, ParseError> {
    trailing_float(text, POE_VOLTAGE)
}

fn trailing_float(text: &str, marker: &'static str) -> Result<f64, ParseError> {
    let line = text
        .lines()
        .find(|line| line.contains(marker))
        .ok_or(ParseError::MarkerNotFound { marker })?;

    let value = last_token(line).ok_or(ParseError::MissingField { marker, index: 0 })?;
    value.parse().map_err(|_| ParseError::InvalidNumber {
        value: value.to_string(),
        line: line.trim().to_string(),
    })
}

fn last_token(line: &str) -> Option<&str> {
    line.split_whitespace().last()
}

fn last_number(line: &str) -> Result<u16, ParseError> {
    let value = last_token(line).unwrap_or_default();
    value.parse().map_err(|_| ParseError::InvalidNumber {
        value: value.to_string(),
        line: line.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS_TABLE: &str = "\
                                             Flow Link          Back   Mdix
Port     Type         Duplex  Speed Neg      ctrl State       Pressure Mode
-------- ------------ ------  ----- -------- ---- ----------- -------- -------
gi1/0/1  1G-Copper    Full    1000  Enabled  Off  Up          Disabled On
";

    const TRUNK_CONFIG: &str = "\
interface gigabitethernet1/0/12
 switchport mode trunk
 switchport trunk allowed vlan add 102,104
 switchport trunk native vlan 110
 switchport trunk multicast-tv vlan 118
exit
";

    const ACCESS_CONFIG: &str = "\
interface gigabitethernet1/0/3
 switchport access vlan 107
 switchport access multicast-tv vlan 118
exit
";

    #[test]
    fn test_firmware_version() {
        let text = "SW version    4.0.13.3 ( date  16-Feb-2020 )\n  Version: 4.0.13.3\n";
        assert_eq!(firmware_version(text).unwrap(), "4.0.13.3");

        // Only the first line holding "Version" is looked at.
        let text = "Boot Version 1.0.2\n  Version: 4.0.13.3\n";
        assert!(firmware_version(text).is_err());

        let text = "Unit  Version: 4.0.13.3\nBoot Version: 1.0\n";
        assert_eq!(firmware_version(text).unwrap(), "4.0.13.3");
    }

    #[test]
    fn test_firmware_version_missing() {
        assert_eq!(
            firmware_version("no such line"),
            Err(ParseError::MarkerNotFound { marker: "Version" })
        );
    }

    #[test]
    fn test_link_state_up_and_down() {
        assert_eq!(link_state(STATUS_TABLE).unwrap(), LinkState::Up);

        let down = STATUS_TABLE.replace("Off  Up  ", "Off  Down");
        assert_eq!(link_state(&down).unwrap(), LinkState::Down);
    }

    #[test]
    fn test_link_state_indeterminate() {
        let short = "Port  Type\n-----\ngi1/0/1 1G-Copper\n";
        assert!(matches!(
            link_state(short),
            Err(ParseError::MissingField { index: 6, .. })
        ));

        let no_row = "Port  Type\n-----\n";
        assert!(link_state(no_row).is_err());

        let odd = STATUS_TABLE.replace("Off  Up  ", "Off  Testing");
        assert!(matches!(
            link_state(&odd),
            Err(ParseError::UnexpectedField { .. })
        ));

        assert!(matches!(
            link_state(""),
            Err(ParseError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn test_link_state_later_header() {
        let text = "\
Port Summary
x
gi1/0/1 a b c d e Testing
Port  Type
----
gi1/0/1 1G-Copper Full 1000 Enabled Off Up
";
        assert_eq!(link_state(text).unwrap(), LinkState::Up);

        let text = "Port Summary\nx\ngi1/0/1 a b c d e Testing\nPort  Type\n";
        assert!(matches!(
            link_state(text),
            Err(ParseError::MissingField { index: 6, .. })
        ));
    }

    #[test]
    fn test_switchport_mode_priority() {
        assert_eq!(switchport_mode(TRUNK_CONFIG), Some(SwitchportMode::Trunk));
        assert_eq!(switchport_mode(ACCESS_CONFIG), Some(SwitchportMode::Access));
        assert_eq!(
            switchport_mode(" switchport mode general\n switchport mode customer\n"),
            Some(SwitchportMode::General)
        );
        assert_eq!(switchport_mode("interface gi1/0/1\nexit\n"), None);
    }

    #[test]
    fn test_switchport_lines() {
        assert_eq!(
            switchport_lines(TRUNK_CONFIG),
            vec![
                "switchport mode trunk",
                "switchport trunk allowed vlan add 102,104",
                "switchport trunk native vlan 110",
                "switchport trunk multicast-tv vlan 118",
            ]
        );
        assert!(switchport_lines("exit").is_empty());
    }

    #[test]
    fn test_switchport_settings_trunk() {
        let settings = switchport_settings(TRUNK_CONFIG).unwrap();
        assert_eq!(settings.mode, Some(SwitchportMode::Trunk));
        assert_eq!(settings.allowed.as_deref(), Some("102,104"));
        assert_eq!(settings.native, Some(110));
        assert_eq!(settings.mtv, Some(118));
        assert_eq!(settings.access, None);
    }

    #[test]
    fn test_switchport_settings_access() {
        let settings = switchport_settings(ACCESS_CONFIG).unwrap();
        assert_eq!(settings.mode, Some(SwitchportMode::Access));
        assert_eq!(settings.access, Some(107));
        assert_eq!(settings.mtv, Some(118));
    }

    #[test]
    fn test_switchport_settings_last_line_wins() {
        let text = " switchport access vlan 10\n switchport access vlan 20\n";
        assert_eq!(switchport_settings(text).unwrap().access, Some(20));
    }

    #[test]
    fn test_switchport_settings_is_idempotent() {
        for text in [TRUNK_CONFIG, ACCESS_CONFIG, ""] {
            assert_eq!(
                switchport_settings(text).unwrap(),
                switchport_settings(text).unwrap()
            );
        }
        assert!(switchport_settings("").unwrap().is_empty());
    }

    #[test]
    fn test_switchport_settings_bad_number() {
        assert!(matches!(
            switchport_settings(" switchport access vlan abc\n"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_poe_enabled() {
        assert_eq!(poe_enabled("Port Status: Port is on"), Ok(true));
        assert_eq!(poe_enabled("Port Status: Port is off"), Ok(false));
        assert_eq!(
            poe_enabled("Port Status: Port is off - Fault (overload)"),
            Ok(false)
        );
        assert!(poe_enabled("Power limit: 30W").is_err());
    }

    #[test]
    fn test_poe_metrics() {
        let text = "\
Port Status: Port is on - Valid PD resistance signature detected
Current (mA): 87
Voltage (V): 53.7
";
        assert_eq!(poe_current(text).unwrap(), 87.0);
        assert_eq!(poe_voltage(text).unwrap(), 53.7);
        assert!(poe_current("Current (mA): n/a").is_err());
        assert!(poe_voltage("Port Status: Port is on").is_err());
    }
}
