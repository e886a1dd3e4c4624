//! Chat message model shared with the gateway.
//!
//! The sanitizer treats messages as mostly opaque: only `role` and the text
//! inside `content` are inspected. Every other field, every unrecognized
//! content shape, and every unrecognized content-part kind round-trips
//! through serialization unchanged, so the sanitizer can never be the reason
//! a message is dropped or rewritten beyond its text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author of a chat message, serialized as a lowercase string.
///
/// Unknown role strings (e.g. `"tool"`) deserialize into [`Role::Other`] and
/// serialize back to the original string, so round-tripping a message never
/// rewrites its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
            Role::System => f.write_str("system"),
            Role::Other(role) => f.write_str(role),
        }
    }
}

/// A single message as the gateway hands it over.
///
/// `content` is optional: a message without content (or with JSON `null`
/// content) passes through sanitization untouched. Fields other than `role`
/// and `content` are captured by the flattened `extra` map and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    /// Build a message with a plain-string payload.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(MessageContent::Text(text.into())),
            extra: Map::new(),
        }
    }

    /// Build a user message with a plain-string payload.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Build an assistant message with a plain-string payload.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Build a user message from an ordered sequence of content parts.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Parts(parts)),
            extra: Map::new(),
        }
    }

    /// The plain-string payload, if that is the content shape.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(MessageContent::Text(text)) => Some(text),
            _ => None,
        }
    }
}

/// The textual payload of a message.
///
/// Untagged: a JSON string becomes [`Text`](Self::Text), a JSON array becomes
/// [`Parts`](Self::Parts), and anything else is held as raw JSON and passed
/// through untouched. Part order in `Parts` is semantically significant and
/// is always preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Other(Value),
}

/// One element of a parts payload, polymorphic over its `type` discriminator.
///
/// Only `text` parts are ever rewritten; every other kind (image, attachment,
/// kinds this crate does not know about) is held as raw JSON, un-inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text(TextPart),
    Other(Value),
}

impl ContentPart {
    /// Build a `text` part.
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text(TextPart::new(text))
    }
}

/// A content part of kind `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    /// Discriminator pinned to `"text"` so the untagged [`ContentPart`] match
    /// only captures text parts.
    #[serde(rename = "type")]
    pub kind: TextPartKind,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextPart {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: TextPartKind::Text,
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// The `type` tag of a [`TextPart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPartKind {
    Text,
}
