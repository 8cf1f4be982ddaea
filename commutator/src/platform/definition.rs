//! Platform definition: prompts, modes and failure phrases of a CLI dialect.

use indexmap::IndexMap;
use regex::bytes::Regex;

use super::privilege_level::PrivilegeLevel;

/// Everything the session needs to know about a switch CLI dialect.
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g. "eltex_mes").
    pub name: String,

    /// CLI modes, in match priority order.
    pub privilege_levels: IndexMap<String, PrivilegeLevel>,

    /// Phrases that mark a command as rejected by the device.
    pub failed_when_contains: Vec<String>,

    /// Commands to run when the session is opened.
    pub on_open_commands: Vec<String>,

    /// Commands to send (without waiting) before the session is closed.
    pub on_close_commands: Vec<String>,

    /// Terminal width for PTY.
    pub terminal_width: u32,

    /// Terminal height for PTY.
    pub terminal_height: u32,
}

impl PlatformDefinition {
    /// Create a new platform definition with minimal required fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privilege_levels: IndexMap::new(),
            failed_when_contains: vec![],
            on_open_commands: vec![],
            on_close_commands: vec![],
            terminal_width: 511,
            terminal_height: 24,
        }
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.privilege_levels.insert(level.name.clone(), level);
        self
    }

    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    pub fn with_on_open_command(mut self, command: impl Into<String>) -> Self {
        self.on_open_commands.push(command.into());
        self
    }

    pub fn with_on_close_command(mut self, command: impl Into<String>) -> Self {
        self.on_close_commands.push(command.into());
        self
    }

    pub fn with_terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// A single pattern matching the prompt of any mode.
    pub fn prompt_pattern(&self) -> Result<Regex, regex::Error> {
        if self.privilege_levels.is_empty() {
            return Regex::new(r"[$#>]\s*$");
        }
        let combined = self
            .privilege_levels
            .values()
            .map(|level| format!("(?:{})", level.pattern.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&combined)
    }

    /// The mode whose prompt matches `prompt`.
    pub fn determine_privilege(&self, prompt: &str) -> Option<&PrivilegeLevel> {
        self.privilege_levels
            .values()
            .find(|level| level.matches(prompt))
    }

    /// The first failure phrase found in `output`.
    pub fn detect_failure(&self, output: &str) -> Option<&str> {
        self.failed_when_contains
            .iter()
            .find(|pattern| output.contains(pattern.as_str()))
            .map(String::as_str)
    }
}
