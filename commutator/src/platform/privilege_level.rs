//! CLI mode definition.

use regex::bytes::Regex;

/// A CLI mode of the switch (exec, privileged exec, configuration, ...).
///
/// Modes are recognized by their prompt. Modes whose patterns overlap are
/// told apart with `not_contains` (a `#` prompt is both privileged exec and
/// configuration mode).
#[derive(Debug, Clone)]
pub struct PrivilegeLevel {
    /// Name of this mode (e.g. "privilege_exec", "configuration").
    pub name: String,

    /// Regex pattern matching the prompt of this mode.
    pub pattern: Regex,

    /// Strings that must NOT be in the prompt for this mode to match.
    pub not_contains: Vec<String>,
}

impl PrivilegeLevel {
    /// Create a mode from its name and prompt pattern.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            not_contains: vec![],
        })
    }

    /// Add a not_contains pattern.
    pub fn with_not_contains(mut self, pattern: impl Into<String>) -> Self {
        self.not_contains.push(pattern.into());
        self
    }

    /// Check if this mode matches a prompt.
    pub fn matches(&self, prompt: &str) -> bool {
        if self.not_contains.iter().any(|nc| prompt.contains(nc)) {
            return false;
        }
        self.pattern.is_match(prompt.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_contains_separates_modes() {
        let level = PrivilegeLevel::new("privilege_exec", r"#\s?$")
            .unwrap()
            .with_not_contains("(config");

        assert_eq!(level.name, "privilege_exec");
        assert!(level.matches("console#"));
        assert!(!level.matches("console(config)#"));
        assert!(!level.matches("console>"));
    }
}
