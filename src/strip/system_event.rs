//! Leading system connection-event removal.

use std::borrow::Cow;

use regex::Regex;

use crate::strip::split_lines;

/// Literal prefix checked before any line scanning happens.
const SYSTEM_GATE: &str = "System: [";

/// Removes a leading run of `System: [...]` connection-event lines.
///
/// Only a leading run is ever removed, together with the blank separator
/// lines immediately after it. A `System:` line appearing later in the body,
/// after real content has started, is never touched.
#[derive(Debug)]
pub struct SystemEventStripper {
    line: Regex,
}

impl SystemEventStripper {
    pub fn new() -> Self {
        Self {
            line: Regex::new(r"^System: \[.+\].*$").expect("valid system event line regex"),
        }
    }

    /// Remove the leading system-event block, if present.
    ///
    /// Returns `Cow::Borrowed` of the input when nothing was removed. A
    /// rewritten text is rejoined with `\n`, so CRLF input comes out
    /// normalized.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.starts_with(SYSTEM_GATE) {
            return Cow::Borrowed(text);
        }
        let lines = split_lines(text);
        let mut i = 0;
        while i < lines.len() && self.line.is_match(lines[i]) {
            i += 1;
        }
        if i == 0 {
            // Starts with the gate but the first line is not a complete
            // event line (no closing bracket).
            return Cow::Borrowed(text);
        }
        while i < lines.len() && lines[i].trim().is_empty() {
            i += 1;
        }
        Cow::Owned(lines[i..].join("\n"))
    }
}

impl Default for SystemEventStripper {
    fn default() -> Self {
        Self::new()
    }
}
