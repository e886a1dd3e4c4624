//! Inbound message sanitization for a multi-channel chat gateway.
//!
//! The gateway annotates relayed messages with bookkeeping metadata before
//! storage or routing: channel/timestamp envelopes, `System: [...]`
//! connection-event lines, labelled "untrusted metadata" JSON blocks, and
//! standalone `[message_id: ...]` hint lines. None of that is part of what
//! the user actually said, and the untrusted blocks must never reach the
//! model as apparent user speech. This crate strips all four categories from
//! user-authored messages, and only those, before model invocation:
//!
//! - [`MessageSanitizer`] is the entry point and decides eligibility
//!   (role, payload shape)
//! - [`StripPipeline`] runs the four strippers in their fixed order over
//!   each text payload
//!
//! Everything is a pure, synchronous transform; sanitizers are immutable
//! after construction and safe to share across threads.
//!
//! ```rust
//! use gatewash::{ChatMessage, MessageSanitizer};
//!
//! let sanitizer = MessageSanitizer::new();
//! let message = ChatMessage::user(
//!     "System: [2026-02-20 11:15:40 PST] WhatsApp gateway connected.\n\nHello",
//! );
//! assert_eq!(sanitizer.sanitize(message).text(), Some("Hello"));
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod sanitize;
pub mod strip;

pub use config::SanitizeConfig;
pub use error::{ConfigError, Error, Result};
pub use message::{ChatMessage, ContentPart, MessageContent, Role, TextPart, TextPartKind};
pub use sanitize::MessageSanitizer;
pub use strip::{
    Annotation, EnvelopeStripper, MessageIdStripper, MetadataBlockStripper, StripOutcome,
    StripPipeline, SystemEventStripper,
};
