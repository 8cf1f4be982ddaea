//! Eltex MES platform definition.
//!
//! MES switches (MES2324, MES3324, ...) use a Cisco-like CLI:
//!
//! ```text
//! console>                  # exec mode
//! console#                  # privilege_exec mode
//! console(config)#          # configuration mode
//! console(config-if)#       # interface configuration mode
//! ```

use crate::platform::{PlatformDefinition, PrivilegeLevel};

pub const PLATFORM_NAME: &str = "eltex_mes";

/// Create the Eltex MES platform definition.
pub fn platform() -> PlatformDefinition {
    let exec = PrivilegeLevel::new("exec", r"(?m)^[\w.\-@/: ]{1,63}>\s?$")
        .expect("valid exec prompt pattern");

    let privilege_exec = PrivilegeLevel::new("privilege_exec", r"(?m)^[\w.\-@/: ]{1,63}#\s?$")
        .expect("valid privilege_exec prompt pattern")
        .with_not_contains("(config");

    let configuration = PrivilegeLevel::new(
        "configuration",
        r"(?m)^[\w.\-@/: ]{1,63}\(config\)#\s?$",
    )
    .expect("valid configuration prompt pattern");

    let interface = PrivilegeLevel::new(
        "interface",
        r"(?m)^[\w.\-@/: ]{1,63}\(config-[\w.\-/]{1,63}\)#\s?$",
    )
    .expect("valid interface prompt pattern");

    PlatformDefinition::new(PLATFORM_NAME)
        .with_privilege(exec)
        .with_privilege(privilege_exec)
        .with_privilege(configuration)
        .with_privilege(interface)
        .with_failure_pattern("% Unrecognized command")
        .with_failure_pattern("% Invalid input")
        .with_failure_pattern("% Incomplete command")
        .with_failure_pattern("% Ambiguous command")
        .with_failure_pattern("% Wrong number of parameters")
        .with_on_open_command("terminal datadump")
        .with_on_close_command("exit")
        .with_terminal_size(511, 24)
}
