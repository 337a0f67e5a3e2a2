/// Unified diff text of the changes staged for the next commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedDiff(String);

impl StagedDiff {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-only output counts as nothing staged.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Cuts the diff down to at most `max_chars` characters. `0` means no limit.
    /// Returns whether anything was dropped.
    pub fn truncate_chars(&mut self, max_chars: usize) -> bool {
        if max_chars == 0 {
            return false;
        }
        match self.0.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => {
                self.0.truncate(byte_idx);
                true
            }
            None => false,
        }
    }
}
