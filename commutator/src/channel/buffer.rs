//! Output buffer with tail search for the response terminator.
//!
//! Only the last `search_depth` bytes are searched for the terminator, so a
//! long `show running-config` does not get rescanned on every read.

use regex::bytes::Regex;

/// Accumulates session output until the terminator shows up.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: Vec<u8>,

    /// How many bytes from the end to search.
    search_depth: usize,
}

impl PatternBuffer {
    /// Create a buffer searching the last `search_depth` bytes.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
        }
    }

    /// Append output, stripping ANSI escape sequences and carriage returns.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi_escapes::strip(data);
        self.buffer
            .extend(cleaned.into_iter().filter(|&b| b != b'\r'));
    }

    /// Offset just past the terminator, if it is in the tail.
    pub fn find_in_tail(&self, pattern: &Regex) -> Option<usize> {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        pattern
            .find(&self.buffer[start..])
            .map(|m| start + m.end())
    }

    /// Remove and return everything up to and including the terminator.
    ///
    /// Bytes after the terminator stay buffered for the next response.
    pub fn take_through(&mut self, pattern: &Regex) -> Option<Vec<u8>> {
        let end = self.find_in_tail(pattern)?;
        let rest = self.buffer.split_off(end);
        Some(std::mem::replace(&mut self.buffer, rest))
    }

    /// Buffered output as text.
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop stale output, e.g. a banner left over after login.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}
