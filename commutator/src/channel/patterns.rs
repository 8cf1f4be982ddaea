//! Response terminator selection.
//!
//! A response normally ends at the device prompt. Commands that ask for
//! confirmation (`write`, `reload`) end at the question instead, so the
//! session can switch to a custom terminator for a single exchange.

use regex::bytes::Regex;

/// The pattern that marks the end of a response.
#[derive(Debug, Clone)]
pub struct Terminator {
    prompt: Regex,
    custom: Option<Regex>,
}

impl Terminator {
    /// Terminate on `prompt` until told otherwise.
    pub fn new(prompt: Regex) -> Self {
        Self {
            prompt,
            custom: None,
        }
    }

    /// Terminate on `pattern`, at the end of output, instead of the prompt.
    pub fn set(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.custom = Some(compile_prompt_pattern(pattern)?);
        Ok(())
    }

    /// Go back to the prompt.
    pub fn reset(&mut self) {
        self.custom = None;
    }

    /// The pattern currently in force.
    pub fn active(&self) -> &Regex {
        self.custom.as_ref().unwrap_or(&self.prompt)
    }

    /// The prompt pattern, regardless of overrides.
    pub fn prompt(&self) -> &Regex {
        &self.prompt
    }

    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }
}

/// Compile a prompt pattern, anchoring it to the end of output if needed.
pub fn compile_prompt_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let pattern = if pattern.ends_with('$') {
        pattern.to_string()
    } else {
        format!("{}\\s*$", pattern)
    };

    Regex::new(&pattern)
}
