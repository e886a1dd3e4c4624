//! Leading channel/timestamp envelope removal.

use std::borrow::Cow;

use aho_corasick::{AhoCorasick, Anchored, Input, StartKind};
use regex::Regex;

use crate::error::ConfigError;

/// Channel labels the gateway is known to emit in envelope headers.
const ENVELOPE_CHANNELS: [&str; 13] = [
    "WebChat",
    "WhatsApp",
    "Telegram",
    "Signal",
    "Slack",
    "Discord",
    "Google Chat",
    "iMessage",
    "Teams",
    "Matrix",
    "Zalo",
    "Zalo Personal",
    "BlueBubbles",
];

/// Removes a single leading `[Header]` envelope prefix.
///
/// The bracket is only removed when the header passes a guard: it contains an
/// ISO-style or space-separated timestamp, or it starts with a known channel
/// label followed by a space. A header failing both checks is left in place,
/// so user-typed bracketed text at the start of a message survives. Interior
/// brackets are never touched.
#[derive(Debug)]
pub struct EnvelopeStripper {
    /// `[<header>]` at the start of the text, plus trailing whitespace.
    prefix: Regex,
    /// `YYYY-MM-DDThh:mmZ` anywhere in the header.
    iso_timestamp: Regex,
    /// `YYYY-MM-DD hh:mm` anywhere in the header.
    spaced_timestamp: Regex,
    /// Channel labels (each with its trailing space), anchored at the start
    /// of the header.
    channels: AhoCorasick,
}

impl EnvelopeStripper {
    /// Create a stripper recognizing the built-in channel labels.
    pub fn new() -> Self {
        Self::build(&[]).expect("built-in channel labels are valid")
    }

    /// Create a stripper that also accepts deployment-specific channel labels.
    pub fn with_extra_channels(extra: &[String]) -> Result<Self, ConfigError> {
        for label in extra {
            validate_channel_label(label)?;
        }
        Self::build(extra)
    }

    fn build(extra: &[String]) -> Result<Self, ConfigError> {
        // Matching "<label> " anchored at the header start replicates a
        // starts-with check over every label in one automaton pass.
        let patterns: Vec<String> = ENVELOPE_CHANNELS
            .iter()
            .map(|label| format!("{label} "))
            .chain(extra.iter().map(|label| format!("{label} ")))
            .collect();
        let channels = AhoCorasick::builder()
            .start_kind(StartKind::Anchored)
            .build(&patterns)
            .map_err(|err| ConfigError::ChannelMatcher(err.to_string()))?;

        Ok(Self {
            prefix: Regex::new(r"^\[([^\]]+)\]\s*").expect("valid envelope prefix regex"),
            iso_timestamp: Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}Z\b")
                .expect("valid ISO timestamp regex"),
            spaced_timestamp: Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}\b")
                .expect("valid spaced timestamp regex"),
            channels,
        })
    }

    /// Remove the leading envelope prefix, if present and recognized.
    ///
    /// Returns `Cow::Borrowed` of the input when nothing was removed.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let Some(caps) = self.prefix.captures(text) else {
            return Cow::Borrowed(text);
        };
        if !self.header_is_envelope(&caps[1]) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text[caps[0].len()..].to_string())
    }

    fn header_is_envelope(&self, header: &str) -> bool {
        if self.iso_timestamp.is_match(header) || self.spaced_timestamp.is_match(header) {
            return true;
        }
        self.channels
            .is_match(Input::new(header).anchored(Anchored::Yes))
    }
}

impl Default for EnvelopeStripper {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_channel_label(label: &str) -> Result<(), ConfigError> {
    let reason = if label.is_empty() {
        "label must not be empty"
    } else if label.contains(']') {
        "label must not contain ']'"
    } else if label.trim() != label {
        "label must not have surrounding whitespace"
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidChannelLabel {
        label: label.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Guard acceptance ──────────────────────────────────────────

    #[test]
    fn test_strips_channel_header_with_spaced_timestamp() {
        let stripper = EnvelopeStripper::new();
        assert_eq!(stripper.strip("[WhatsApp 2026-01-24 13:36] yolo"), "yolo");
    }

    #[test]
    fn test_strips_iso_timestamp_only_header() {
        let stripper = EnvelopeStripper::new();
        assert_eq!(stripper.strip("[2026-01-24T13:36Z] hi"), "hi");
    }

    #[test]
    fn test_strips_multiword_channel_label() {
        let stripper = EnvelopeStripper::new();
        assert_eq!(stripper.strip("[Google Chat thread-9] ok"), "ok");
        assert_eq!(stripper.strip("[Zalo Personal +84] ok"), "ok");
    }

    // ── Guard rejection ───────────────────────────────────────────

    #[test]
    fn test_unknown_header_is_left_in_place() {
        let stripper = EnvelopeStripper::new();
        let input = "[random note] hi";
        let result = stripper.strip(input);
        assert_eq!(result, input);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_user_typed_message_id_bracket_survives() {
        let stripper = EnvelopeStripper::new();
        let input = "[message_id: 123] was what I saw";
        assert_eq!(stripper.strip(input), input);
    }

    #[test]
    fn test_label_without_trailing_space_is_rejected() {
        let stripper = EnvelopeStripper::new();
        // Header is exactly "WhatsApp"; the guard requires "WhatsApp ".
        let input = "[WhatsApp] hi";
        assert_eq!(stripper.strip(input), input);
    }

    #[test]
    fn test_label_mid_header_is_rejected() {
        let stripper = EnvelopeStripper::new();
        let input = "[via WhatsApp today] hi";
        assert_eq!(stripper.strip(input), input);
    }

    // ── Only the leading prefix ───────────────────────────────────

    #[test]
    fn test_interior_envelope_is_untouched() {
        let stripper = EnvelopeStripper::new();
        let input = "hello [WhatsApp 2026-01-01 10:00] there";
        assert_eq!(stripper.strip(input), input);
    }

    #[test]
    fn test_only_one_prefix_removed_per_call() {
        let stripper = EnvelopeStripper::new();
        let input = "[Signal 2026-01-01 10:00] [Signal 2026-01-01 10:01] hi";
        assert_eq!(stripper.strip(input), "[Signal 2026-01-01 10:01] hi");
    }

    #[test]
    fn test_no_leading_bracket_is_identity() {
        let stripper = EnvelopeStripper::new();
        let result = stripper.strip("plain text");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    // ── Extra channel labels ──────────────────────────────────────

    #[test]
    fn test_extra_channel_extends_the_guard() {
        let stripper =
            EnvelopeStripper::with_extra_channels(&["MyChat".to_string()]).expect("valid label");
        assert_eq!(stripper.strip("[MyChat room-1] hi"), "hi");
        // Built-ins still work.
        assert_eq!(stripper.strip("[Telegram 2026-01-01 10:00] hi"), "hi");
    }

    #[test]
    fn test_empty_extra_label_is_rejected() {
        let err = EnvelopeStripper::with_extra_channels(&[String::new()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChannelLabel { .. }));
    }

    #[test]
    fn test_bracket_in_extra_label_is_rejected() {
        let err =
            EnvelopeStripper::with_extra_channels(&["Web]Chat".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChannelLabel { .. }));
    }

    #[test]
    fn test_padded_extra_label_is_rejected() {
        let err =
            EnvelopeStripper::with_extra_channels(&[" LINE".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChannelLabel { .. }));
    }
}
