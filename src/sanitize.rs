//! Message-level sanitization entry point.

use crate::config::SanitizeConfig;
use crate::error::ConfigError;
use crate::message::{ChatMessage, ContentPart, MessageContent, Role};
use crate::strip::{Annotation, StripPipeline};

/// Strips gateway annotations from user-authored messages before they reach
/// the model.
///
/// Only messages with `role == user` are touched; everything else passes
/// through without content inspection. For user messages the payload shape
/// is preserved exactly: a string stays a string, a parts array keeps its
/// length, order, and non-text parts, and unrecognized content shapes pass
/// through whole.
///
/// # Usage
///
/// ```rust
/// use gatewash::{ChatMessage, MessageSanitizer};
///
/// let sanitizer = MessageSanitizer::new();
/// let message = ChatMessage::user("[WhatsApp 2026-01-24 13:36] yolo\n[message_id: 7b8b]");
/// let clean = sanitizer.sanitize(message);
/// assert_eq!(clean.text(), Some("yolo"));
/// ```
#[derive(Debug)]
pub struct MessageSanitizer {
    pipeline: StripPipeline,
    enabled: bool,
}

impl MessageSanitizer {
    /// Create a sanitizer with the built-in pattern set.
    pub fn new() -> Self {
        Self {
            pipeline: StripPipeline::new(),
            enabled: true,
        }
    }

    /// Create a sanitizer from deployment configuration.
    pub fn from_config(config: &SanitizeConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            pipeline: StripPipeline::with_extra_channels(&config.extra_channels)?,
            enabled: config.enabled,
        })
    }

    /// Sanitize a single message.
    ///
    /// Pure transform: same shape out as in, with only the text of eligible
    /// payloads rewritten.
    pub fn sanitize(&self, message: ChatMessage) -> ChatMessage {
        if !self.enabled {
            return message;
        }
        if message.role != Role::User {
            tracing::trace!(role = %message.role, "Skipping sanitization for non-user message");
            return message;
        }

        let mut message = message;
        let mut removed: Vec<Annotation> = Vec::new();
        match &mut message.content {
            Some(MessageContent::Text(text)) => {
                let (out, tags) = self.pipeline.strip_owned(std::mem::take(text));
                *text = out;
                removed.extend(tags);
            }
            Some(MessageContent::Parts(parts)) => {
                for part in parts {
                    if let ContentPart::Text(part) = part {
                        let (out, tags) =
                            self.pipeline.strip_owned(std::mem::take(&mut part.text));
                        part.text = out;
                        removed.extend(tags);
                    }
                }
            }
            Some(MessageContent::Other(_)) | None => {
                tracing::trace!("Skipping sanitization for unrecognized content shape");
            }
        }

        if !removed.is_empty() {
            removed.sort_unstable();
            removed.dedup();
            let categories = removed
                .iter()
                .map(Annotation::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            tracing::debug!(
                removed = %categories,
                "Stripped gateway annotations from user message"
            );
        }
        message
    }

    /// Sanitize a whole history slice before model invocation.
    pub fn sanitize_all(&self, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
        messages
            .into_iter()
            .map(|message| self.sanitize(message))
            .collect()
    }

    /// Sanitize a raw JSON value at the gateway boundary.
    ///
    /// A value that deserializes as a [`ChatMessage`] is sanitized and
    /// re-serialized; anything else (malformed shape, missing role) is
    /// returned unchanged, never rejected.
    pub fn sanitize_value(&self, value: serde_json::Value) -> serde_json::Value {
        let Ok(message) = serde_json::from_value::<ChatMessage>(value.clone()) else {
            return value;
        };
        match serde_json::to_value(self.sanitize(message)) {
            Ok(sanitized) => sanitized,
            Err(_) => value,
        }
    }
}

impl Default for MessageSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
