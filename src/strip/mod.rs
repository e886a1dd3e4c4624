//! The ordered text-stripping pipeline.
//!
//! Four strippers remove the annotations the gateway injects into a
//! message's textual payload before it reaches the model:
//!
//! - [`SystemEventStripper`]: leading `System: [...]` connection-event lines
//! - [`EnvelopeStripper`]: a leading `[Channel Timestamp]` bracket prefix
//! - [`MetadataBlockStripper`]: labelled fenced-JSON "untrusted metadata" blocks
//! - [`MessageIdStripper`]: standalone `[message_id: ...]` hint lines
//!
//! [`StripPipeline`] composes them in that fixed order. Each stripper is a
//! pure function of its input text and returns `Cow::Borrowed` when it
//! removed nothing.

mod envelope;
mod message_id;
mod metadata;
mod system_event;

pub use envelope::EnvelopeStripper;
pub use message_id::MessageIdStripper;
pub use metadata::MetadataBlockStripper;
pub use system_event::SystemEventStripper;

use std::borrow::Cow;

use crate::error::ConfigError;

/// Split into lines on `\n`, tolerating `\r\n` endings.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Category of gateway annotation removed from a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Annotation {
    SystemEvent,
    Envelope,
    UntrustedMetadata,
    MessageIdHint,
}

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Annotation::SystemEvent => "system_event",
            Annotation::Envelope => "envelope",
            Annotation::UntrustedMetadata => "untrusted_metadata",
            Annotation::MessageIdHint => "message_id_hint",
        };
        f.write_str(name)
    }
}

/// Result of running the pipeline over one text.
#[derive(Debug)]
pub struct StripOutcome<'a> {
    /// The sanitized text; `Cow::Borrowed` when nothing was removed.
    pub text: Cow<'a, str>,
    /// Annotation categories that were actually removed, in stage order.
    pub removed: Vec<Annotation>,
}

/// The composed four-stage stripping pipeline.
///
/// The stage order is fixed and unconditional: system events, then the
/// envelope prefix, then untrusted-metadata blocks, then message-id hints.
/// Later stages assume earlier ones have already unwrapped outer envelopes
/// and preambles (an untrusted block sitting right after a channel envelope
/// is only reachable once the envelope prefix is gone).
///
/// All patterns are compiled once at construction; the pipeline is immutable
/// afterwards and safe to share across threads.
#[derive(Debug)]
pub struct StripPipeline {
    system_events: SystemEventStripper,
    envelope: EnvelopeStripper,
    metadata: MetadataBlockStripper,
    message_id: MessageIdStripper,
}

impl StripPipeline {
    /// Create a pipeline with the built-in pattern set.
    pub fn new() -> Self {
        Self {
            system_events: SystemEventStripper::new(),
            envelope: EnvelopeStripper::new(),
            metadata: MetadataBlockStripper::new(),
            message_id: MessageIdStripper::new(),
        }
    }

    /// Create a pipeline whose envelope guard also accepts the given
    /// deployment-specific channel labels.
    pub fn with_extra_channels(extra: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            envelope: EnvelopeStripper::with_extra_channels(extra)?,
            ..Self::new()
        })
    }

    /// Run all four stages over the text.
    ///
    /// Returns `Cow::Borrowed` of the input when no stage removed anything.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.strip_outcome(text).text
    }

    /// Run all four stages and report which annotation categories were
    /// removed.
    pub fn strip_outcome<'a>(&self, text: &'a str) -> StripOutcome<'a> {
        let mut removed = Vec::new();

        let after_system = self.system_events.strip(text);
        if matches!(&after_system, Cow::Owned(_)) {
            removed.push(Annotation::SystemEvent);
        }
        let after_envelope = self.envelope.strip(&after_system);
        if matches!(&after_envelope, Cow::Owned(_)) {
            removed.push(Annotation::Envelope);
        }
        let after_metadata = self.metadata.strip(&after_envelope);
        if matches!(&after_metadata, Cow::Owned(_)) {
            removed.push(Annotation::UntrustedMetadata);
        }
        let after_ids = self.message_id.strip(&after_metadata);
        if matches!(&after_ids, Cow::Owned(_)) {
            removed.push(Annotation::MessageIdHint);
        }

        let text = if removed.is_empty() {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(after_ids.into_owned())
        };
        StripOutcome { text, removed }
    }

    /// Owned variant for callers that hold a `String` they will replace.
    pub fn strip_owned(&self, text: String) -> (String, Vec<Annotation>) {
        let StripOutcome { text: stripped, removed } = self.strip_outcome(&text);
        match stripped {
            Cow::Borrowed(_) => (text, removed),
            Cow::Owned(out) => (out, removed),
        }
    }
}

impl Default for StripPipeline {
    fn default() -> Self {
        Self::new()
    }
}
