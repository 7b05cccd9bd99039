//! Key material resolution.
//!
//! Turns a [`ValidatedConfig`](crate::config::ValidatedConfig) into a
//! [`ResolvedKey`], reading the keystore file if one is configured. This is
//! the only place in the crate that touches the filesystem.

pub mod keystore;
pub mod resolver;

pub use resolver::{resolve, ResolvedKey};
