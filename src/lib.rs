//! Token Signing library.
//!
//! Resolves exactly one JWT signing key source from mutually exclusive
//! configuration inputs (inline secret, inline PEM private key, or a
//! PKCS#12 keystore entry) and builds an immutable token service around it.
//!
//! Resolution runs once at startup:
//!
//! ```text
//! KeySettings -> validate -> resolve -> TokenService (Ready)
//!                   |            |
//!                   +-- ConfigError / KeyResolutionError (Failed, fatal)
//! ```
//!
//! The resulting [`TokenService`] is read-only and safe to share across
//! threads for `issue`/`verify`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod jwt;
pub mod key;
pub mod service;

// Re-exports for convenience
pub use config::{KeyConfig, KeySettings, ValidatedConfig};
pub use error::{BootstrapError, ConfigError, KeyResolutionError, TokenError};
pub use jwt::Claims;
pub use key::ResolvedKey;
pub use service::{KeyMode, TokenService};
