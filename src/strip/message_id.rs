//! Standalone message-id hint line removal.

use std::borrow::Cow;

use regex::Regex;

use crate::strip::split_lines;

/// Literal gate checked before the line regex runs. Case-sensitive, while the
/// line pattern below is case-insensitive; this mirrors the gateway's
/// established behavior.
const MESSAGE_ID_GATE: &str = "[message_id:";

/// Removes lines that consist entirely of a `[message_id: ...]` hint.
///
/// A message-id token appearing mid-line alongside user-typed text is never
/// removed; the pattern requires the whole trimmed line to be just the hint.
#[derive(Debug)]
pub struct MessageIdStripper {
    line: Regex,
}

impl MessageIdStripper {
    pub fn new() -> Self {
        Self {
            line: Regex::new(r"(?i)^\s*\[message_id:\s*[^\]]+\]\s*$")
                .expect("valid message id line regex"),
        }
    }

    /// Remove every standalone message-id hint line.
    ///
    /// Returns `Cow::Borrowed` of the input when no line was removed.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains(MESSAGE_ID_GATE) {
            return Cow::Borrowed(text);
        }
        let lines = split_lines(text);
        let kept: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| !self.line.is_match(line))
            .collect();
        if kept.len() == lines.len() {
            return Cow::Borrowed(text);
        }
        Cow::Owned(kept.join("\n"))
    }
}

impl Default for MessageIdStripper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_standalone_hint_line() {
        let stripper = MessageIdStripper::new();
        assert_eq!(stripper.strip("yolo\n[message_id: 7b8b]"), "yolo");
    }

    #[test]
    fn test_removes_hint_line_with_surrounding_whitespace() {
        let stripper = MessageIdStripper::new();
        assert_eq!(stripper.strip("hi\n  [message_id: abc123]  "), "hi");
    }

    #[test]
    fn test_inline_token_is_never_removed() {
        let stripper = MessageIdStripper::new();
        let input = "I typed [message_id: 123] on purpose";
        let result = stripper.strip(input);
        assert_eq!(result, input);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_no_gate_substring_is_identity() {
        let stripper = MessageIdStripper::new();
        let input = "nothing to see";
        let result = stripper.strip(input);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_uppercase_hint_removed_when_lowercase_gate_present() {
        let stripper = MessageIdStripper::new();
        let input = "[MESSAGE_ID: 9]\n[message_id: 8]\nhi";
        assert_eq!(stripper.strip(input), "hi");
    }

    #[test]
    fn test_uppercase_hint_alone_fails_the_gate() {
        let stripper = MessageIdStripper::new();
        let input = "[MESSAGE_ID: 9]\nhi";
        let result = stripper.strip(input);
        assert_eq!(result, input);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_hint_without_id_is_kept() {
        let stripper = MessageIdStripper::new();
        // Gate matches but the line pattern requires at least one character
        // between the colon and the closing bracket.
        let input = "hi\n[message_id:]";
        let result = stripper.strip(input);
        assert_eq!(result, input);
    }

    #[test]
    fn test_multiple_hint_lines_removed() {
        let stripper = MessageIdStripper::new();
        let input = "[message_id: a]\nhello\n[message_id: b]";
        assert_eq!(stripper.strip(input), "hello");
    }
}
