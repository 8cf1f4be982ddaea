//! VLAN switchport settings and the commands that apply them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VlanConfigError;

/// Switchport operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchportMode {
    Access,
    Trunk,
    Customer,
    General,
}

impl SwitchportMode {
    /// Keyword used by `switchport mode <mode>`.
    pub fn as_str(self) -> &'static str {
        match self {
            SwitchportMode::Access => "access",
            SwitchportMode::Trunk => "trunk",
            SwitchportMode::Customer => "customer",
            SwitchportMode::General => "general",
        }
    }
}

impl fmt::Display for SwitchportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Switchport settings as read back from the running config.
///
/// Every field is optional: this is whatever the device reported, with no
/// cross-field validation. Use [`VlanConfig::try_from`] to turn it into a
/// configuration that can be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchportSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SwitchportMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<u16>,
    /// Allowed VLAN list, kept as text (e.g. `102,104,111-112`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<u16>,
    /// Multicast-TV VLAN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtv: Option<u16>,
}

impl SwitchportSettings {
    /// True when no switchport setting was found.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A switchport configuration to apply to a port.
///
/// Only legal field combinations can be expressed: an access VLAN exists
/// only in access mode, allowed and native VLANs only in trunk mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum VlanConfig {
    /// Remove every switchport setting from the port.
    #[default]
    None,

    Access {
        vlan: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mtv: Option<u16>,
    },

    Trunk {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        allowed: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        native: Option<u16>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mtv: Option<u16>,
    },

    Customer,

    General,
}

impl VlanConfig {
    /// Access port on `vlan`.
    pub fn access(vlan: u16) -> Self {
        VlanConfig::Access { vlan, mtv: None }
    }

    /// Trunk port with no VLAN lists yet.
    pub fn trunk() -> Self {
        VlanConfig::Trunk {
            allowed: None,
            native: None,
            mtv: None,
        }
    }

    /// Set the allowed VLAN list. No effect outside trunk mode.
    pub fn with_allowed(mut self, list: impl Into<String>) -> Self {
        if let VlanConfig::Trunk { allowed, .. } = &mut self {
            *allowed = Some(list.into());
        }
        self
    }

    /// Set the native VLAN. No effect outside trunk mode.
    pub fn with_native(mut self, vlan: u16) -> Self {
        if let VlanConfig::Trunk { native, .. } = &mut self {
            *native = Some(vlan);
        }
        self
    }

    /// Set the multicast-TV VLAN. No effect outside access and trunk mode.
    pub fn with_mtv(mut self, vlan: u16) -> Self {
        match &mut self {
            VlanConfig::Access { mtv, .. } | VlanConfig::Trunk { mtv, .. } => *mtv = Some(vlan),
            _ => {}
        }
        self
    }

    /// The mode this configuration sets, `None` for a cleared port.
    pub fn mode(&self) -> Option<SwitchportMode> {
        match self {
            VlanConfig::None => None,
            VlanConfig::Access { .. } => Some(SwitchportMode::Access),
            VlanConfig::Trunk { .. } => Some(SwitchportMode::Trunk),
            VlanConfig::Customer => Some(SwitchportMode::Customer),
            VlanConfig::General => Some(SwitchportMode::General),
        }
    }

    /// Commands that set this configuration on a port with no switchport
    /// settings.
    pub fn set_commands(&self) -> Vec<String> {
        let Some(mode) = self.mode() else {
            return Vec::new();
        };

        let mut commands = vec![format!("switchport mode {mode}")];
        match self {
            VlanConfig::Trunk {
                allowed,
                native,
                mtv,
            } => {
                if let Some(allowed) = allowed {
                    commands.push(format!("switchport trunk allowed vlan add {allowed}"));
                }
                if let Some(native) = native {
                    commands.push(format!("switchport trunk native vlan {native}"));
                }
                if let Some(mtv) = mtv {
                    commands.push(format!("switchport trunk multicast-tv vlan {mtv}"));
                }
            }
            VlanConfig::Access { vlan, mtv } => {
                commands.push(format!("switchport access vlan {vlan}"));
                if let Some(mtv) = mtv {
                    commands.push(format!("switchport access multicast-tv vlan {mtv}"));
                }
            }
            _ => {}
        }
        commands
    }
}

impl TryFrom<SwitchportSettings> for VlanConfig {
    type Error = VlanConfigError;

    fn try_from(settings: SwitchportSettings) -> Result<Self, Self::Error> {
        let SwitchportSettings {
            mode,
            access,
            allowed,
            native,
            mtv,
        } = settings;

        let Some(mode) = mode else {
            if access.is_some() || allowed.is_some() || native.is_some() || mtv.is_some() {
                return Err(VlanConfigError::MissingMode);
            }
            return Ok(VlanConfig::None);
        };

        let not_allowed = |field| VlanConfigError::FieldNotAllowed {
            field,
            mode: mode.to_string(),
        };

        match mode {
            SwitchportMode::Access => {
                if allowed.is_some() {
                    return Err(not_allowed("allowed"));
                }
                if native.is_some() {
                    return Err(not_allowed("native"));
                }
                let vlan = access.ok_or(VlanConfigError::MissingAccessVlan)?;
                Ok(VlanConfig::Access { vlan, mtv })
            }
            SwitchportMode::Trunk => {
                if access.is_some() {
                    return Err(not_allowed("access"));
                }
                Ok(VlanConfig::Trunk {
                    allowed,
                    native,
                    mtv,
                })
            }
            SwitchportMode::Customer | SwitchportMode::General => {
                let field = if access.is_some() {
                    Some("access")
                } else if allowed.is_some() {
                    Some("allowed")
                } else if native.is_some() {
                    Some("native")
                } else if mtv.is_some() {
                    Some("mtv")
                } else {
                    None
                };
                if let Some(field) = field {
                    return Err(not_allowed(field));
                }
                Ok(if mode == SwitchportMode::Customer {
                    VlanConfig::Customer
                } else {
                    VlanConfig::General
                })
            }
        }
    }
}

/// Commands that remove the current switchport settings.
///
/// Always ends with `no switchport mode`.
pub fn clear_commands(current: &SwitchportSettings) -> Vec<String> {
    let mut commands = Vec::new();
    match current.mode {
        Some(SwitchportMode::Trunk) => {
            commands.push("no switchport trunk multicast-tv vlan".to_string());
            commands.push("switchport trunk allowed vlan remove all".to_string());
            commands.push("no switchport trunk native vlan".to_string());
        }
        Some(SwitchportMode::Access) => {
            commands.push("no switchport access multicast-tv vlan".to_string());
            commands.push("no switchport access vlan".to_string());
        }
        _ => {}
    }
    commands.push("no switchport mode".to_string());
    commands
}

/// Interface-level commands that replace `current` with `desired`.
pub fn apply_commands(current: &SwitchportSettings, desired: &VlanConfig) -> Vec<String> {
    let mut commands = clear_commands(current);
    commands.extend(desired.set_commands());
    commands
}
