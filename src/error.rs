//! Error taxonomy for key resolution and token operations.
//!
//! Everything under [`ConfigError`] and [`KeyResolutionError`] happens at
//! resolution time, is fatal, and is never retried: a misconfiguration must
//! stop process startup instead of degrading silently.

use thiserror::Error;

/// Configuration validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Both an inline key value and a keystore location were provided.
    #[error("ambiguous key source: both key-value and key-store are set")]
    AmbiguousKeySource,

    /// A keystore location was provided without one of its mandatory fields.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// Neither an inline key value nor a keystore location was provided.
    #[error("no key source configured: set key-value or key-store")]
    NoKeySourceConfigured,

    /// A numeric or enumerated setting failed to parse.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Name of the offending configuration key.
        name: &'static str,
        /// Parse failure detail.
        reason: String,
    },
}

/// Key material resolution failures.
#[derive(Error, Debug)]
pub enum KeyResolutionError {
    /// The inline key value carried PEM armor but did not parse as an RSA
    /// private key.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// The keystore file is missing, unreadable, or the password is wrong.
    #[error("keystore unreadable: {0}")]
    KeyStoreUnreadable(String),

    /// No entry in the keystore carries the configured alias.
    #[error("alias not found in keystore: {0}")]
    AliasNotFound(String),

    /// The alias resolved to an entry without an extractable private key,
    /// e.g. a certificate-only entry or a non-RSA key type.
    #[error("key not extractable for alias {alias}: {reason}")]
    KeyNotExtractable {
        /// The configured keystore alias.
        alias: String,
        /// Extraction failure detail.
        reason: String,
    },
}

/// Token issuing and verification failures.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Claims could not be encoded and signed.
    #[error("JWT encoding error: {0}")]
    Encoding(String),

    /// The token failed signature or claim validation.
    #[error("JWT verification error: {0}")]
    Verification(String),
}

/// Fatal startup error covering the whole validate/resolve/build pipeline.
///
/// Propagated to the process bootstrap, which aborts with the failing field
/// named in the message.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration validation failed.
    #[error("configuration invalid: {0}")]
    Config(#[from] ConfigError),

    /// Key material resolution failed.
    #[error("key resolution failed: {0}")]
    Resolution(#[from] KeyResolutionError),
}
