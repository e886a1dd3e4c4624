//! Error types for gatewash.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-related errors.
///
/// Stripping itself is total over any input string; errors only arise when
/// building a sanitizer from deployment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid channel label {label:?}: {reason}")]
    InvalidChannelLabel { label: String, reason: String },

    #[error("Failed to build channel matcher: {0}")]
    ChannelMatcher(String),
}

/// Convenience result type using the crate error.
pub type Result<T> = std::result::Result<T, Error>;
