/// Budgets for one context extraction.
///
/// All fields have conservative floors applied at use time, so a caller
/// passing zero gets the floor rather than an empty or degenerate result.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Tail window size: how many bytes to read from the end of the
    /// transcript file (floor 1).
    pub max_bytes: u64,
    /// Maximum number of messages surfaced in the block, oldest evicted
    /// first (floor 1).
    pub max_messages: usize,
    /// Total character budget for the assembled block (floor 200).
    pub max_chars: usize,
    /// Character budget per rendered message line (floor 50).
    pub max_line_chars: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_bytes: 256_000,
            max_messages: 14,
            max_chars: 5_000,
            max_line_chars: 420,
        }
    }
}

impl BuildOptions {
    /// Copy with floors applied.
    pub(crate) fn clamped(&self) -> Self {
        Self {
            max_bytes: self.max_bytes.max(1),
            max_messages: self.max_messages.max(1),
            max_chars: self.max_chars.max(200),
            max_line_chars: self.max_line_chars.max(50),
        }
    }
}
