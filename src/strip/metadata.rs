//! Untrusted-metadata block removal.

use std::borrow::Cow;

use regex::Regex;

/// Literal gate checked before the block regex runs at all.
const UNTRUSTED_GATE: &str = "(untrusted";

/// Removes labelled fenced-JSON "untrusted metadata" blocks.
///
/// A block is a line such as `Sender (untrusted metadata):` followed by a
/// ` ```json ` fence, arbitrary content, and a closing fence. The gateway may
/// inject several back to back (conversation info, sender, thread starter);
/// all of them are removed in one pass, anywhere in the text.
#[derive(Debug)]
pub struct MetadataBlockStripper {
    block: Regex,
}

impl MetadataBlockStripper {
    pub fn new() -> Self {
        // Label line, fence, non-greedy body, closing fence, and whatever
        // blank separator follows.
        let block = Regex::new(r"(?ms)^[A-Z][^\n]*\(untrusted[^)]*\):\n```json\n.*?\n```\s*")
            .expect("valid untrusted block regex");
        Self { block }
    }

    /// Remove every untrusted-metadata block from the text.
    ///
    /// Returns `Cow::Borrowed` of the input when nothing was removed. When
    /// blocks were removed, whitespace left at the very start of the result
    /// is trimmed.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains(UNTRUSTED_GATE) {
            return Cow::Borrowed(text);
        }
        match self.block.replace_all(text, "") {
            Cow::Borrowed(_) => Cow::Borrowed(text),
            Cow::Owned(stripped) => Cow::Owned(stripped.trim_start().to_string()),
        }
    }
}

impl Default for MetadataBlockStripper {
    fn default() -> Self {
        Self::new()
    }
}
