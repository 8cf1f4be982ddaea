//! Channel layer: PTY shell, output buffering and response terminators.

mod buffer;
mod patterns;
mod pty;

pub use buffer::PatternBuffer;
pub use patterns::{Terminator, compile_prompt_pattern};
pub use pty::{PtyChannel, PtyConfig};
