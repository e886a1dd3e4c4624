//! Configuration for the inbound sanitization stage.

use serde::{Deserialize, Serialize};

/// Configuration for [`MessageSanitizer`](crate::sanitize::MessageSanitizer).
///
/// Deserializes with `#[serde(default)]` so a partial config (or an empty
/// `{}`) yields the defaults. The embedding gateway owns config acquisition;
/// this crate reads no environment variables and has no CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Whether inbound sanitization runs at all. When false, the entry point
    /// is the identity (gateway kill-switch).
    pub enabled: bool,
    /// Deployment-specific channel labels accepted by the envelope guard in
    /// addition to the built-in set.
    pub extra_channels: Vec<String>,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_channels: Vec::new(),
        }
    }
}
