//! Command scripts.
//!
//! A script is a plain list of CLI lines run one after another. Two
//! prefixes are special because the switch answers them with a confirmation
//! question instead of a prompt:
//!
//! - `wr...` (`write`): the response ends at `?`, then `y` is sent as a
//!   normal command;
//! - `rel...` (`reload`): the response ends at `] `, then `y` is sent raw and
//!   the session is closed. Nothing after a reload line runs.

/// Terminator for the `write` confirmation question.
pub const WRITE_CONFIRM: &str = r"\?";

/// Terminator for the `reload` confirmation question.
pub const RELOAD_CONFIRM: &str = r"\] ";

/// One interpreted script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine<'a> {
    /// Save the configuration, answering the confirmation.
    Write(&'a str),
    /// Reload the switch, answering the confirmation, then disconnect.
    Reload(&'a str),
    /// Any other command, run as is.
    Command(&'a str),
    /// Nothing to send.
    Blank,
}

impl<'a> ScriptLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let command = line.trim();
        if command.is_empty() {
            ScriptLine::Blank
        } else if line.starts_with("wr") {
            ScriptLine::Write(command)
        } else if line.starts_with("rel") {
            ScriptLine::Reload(command)
        } else {
            ScriptLine::Command(command)
        }
    }
}

/// What a script run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    /// Lines sent to the switch (directives count once).
    pub executed: usize,
    /// Whether the script ended with a reload.
    pub reloaded: bool,
}
