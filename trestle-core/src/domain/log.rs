//! Log domain types

/// A span of progressive console text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogChunk {
    pub text: String,
    /// Offset to request next (`X-Text-Size`)
    pub next_offset: u64,
    /// Server hint that more text is already available (`X-More-Data`)
    pub has_more: bool,
}

/// Byte offset into a build's append-only console log
///
/// Owned by a single poller; starts at 0 and never moves backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogCursor(u64);

impl LogCursor {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn offset(&self) -> u64 {
        self.0
    }

    /// Moves the cursor to `next`, ignoring offsets behind the current one
    pub fn advance(&mut self, next: u64) {
        self.0 = self.0.max(next);
    }
}
