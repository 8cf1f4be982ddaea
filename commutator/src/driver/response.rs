//! Response type for command execution results.

use std::time::Duration;

/// Output of one command.
#[derive(Debug, Clone)]
pub struct Response {
    /// The command that was executed.
    pub command: String,

    /// The command output with the echoed command and trailing prompt removed.
    pub result: String,

    /// The raw output before normalization.
    pub raw_result: String,

    /// The terminator text that ended the response (usually the prompt).
    pub prompt: String,

    /// Time taken to execute the command.
    pub elapsed: Duration,
}

impl Response {
    pub fn new(
        command: impl Into<String>,
        result: impl Into<String>,
        raw_result: impl Into<String>,
        prompt: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            result: result.into(),
            raw_result: raw_result.into(),
            prompt: prompt.into(),
            elapsed,
        }
    }

    /// Get the result lines as an iterator.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.result.lines()
    }

    /// Check if the result contains a substring.
    pub fn contains(&self, pattern: &str) -> bool {
        self.result.contains(pattern)
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.result)
    }
}

/// Strip the echoed command and the trailing prompt line from raw output.
pub fn normalize_output(raw: &str, command: &str) -> String {
    let output = raw
        .strip_prefix(command)
        .unwrap_or(raw)
        .trim_start_matches(['\r', '\n']);

    match output.rfind('\n') {
        Some(pos) => output[..pos].to_string(),
        // Only the prompt came back
        None => String::new(),
    }
}
