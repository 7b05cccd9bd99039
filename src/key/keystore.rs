//! PKCS#12 keystore access.
//!
//! The keystore is read exactly once during resolution. Entries are
//! addressed by alias (the PKCS#12 friendly name, which `keytool` and
//! `openssl pkcs12 -name` both set). Only RSA private-key entries are
//! extractable; certificate-only entries are rejected.

use crate::error::KeyResolutionError;
use p12_keystore::{KeyStore, KeyStoreEntry};
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use std::fs;
use tracing::debug;

/// Load the RSA private key stored under `alias`.
///
/// The container is opened with `store_password`; when that fails and a
/// per-key password is configured, it is tried as a fallback (PKCS#12
/// carries a single container password, unlike the per-entry passwords of
/// legacy Java keystores).
///
/// # Errors
///
/// - [`KeyResolutionError::KeyStoreUnreadable`]: missing/unreadable file or
///   wrong password.
/// - [`KeyResolutionError::AliasNotFound`]: no entry carries `alias`.
/// - [`KeyResolutionError::KeyNotExtractable`]: the entry has no private
///   key (certificate-only) or the key is not RSA.
pub fn load_private_key(
    path: &str,
    store_password: &str,
    alias: &str,
    key_password: Option<&str>,
) -> Result<RsaPrivateKey, KeyResolutionError> {
    let data = fs::read(path)
        .map_err(|e| KeyResolutionError::KeyStoreUnreadable(format!("{}: {}", path, e)))?;

    let store = open_store(&data, store_password, key_password)?;
    debug!(path, alias, "keystore opened");

    let entry = store
        .entry(alias)
        .ok_or_else(|| KeyResolutionError::AliasNotFound(alias.to_string()))?;

    let key_der = match entry {
        KeyStoreEntry::PrivateKeyChain(chain) => chain.key(),
        KeyStoreEntry::Certificate(_) => {
            return Err(KeyResolutionError::KeyNotExtractable {
                alias: alias.to_string(),
                reason: "certificate-only entry, no private key".to_string(),
            })
        }
        _ => {
            return Err(KeyResolutionError::KeyNotExtractable {
                alias: alias.to_string(),
                reason: "entry holds no private key".to_string(),
            })
        }
    };

    RsaPrivateKey::from_pkcs8_der(key_der).map_err(|e| KeyResolutionError::KeyNotExtractable {
        alias: alias.to_string(),
        reason: format!("not an RSA private key: {}", e),
    })
}

/// Open the PKCS#12 container, trying the store password first and the
/// per-key password second.
fn open_store(
    data: &[u8],
    store_password: &str,
    key_password: Option<&str>,
) -> Result<KeyStore, KeyResolutionError> {
    match KeyStore::from_pkcs12(data, store_password) {
        Ok(store) => Ok(store),
        Err(primary) => match key_password.filter(|kp| *kp != store_password) {
            Some(kp) => KeyStore::from_pkcs12(data, kp)
                .map_err(|e| KeyResolutionError::KeyStoreUnreadable(e.to_string())),
            None => Err(KeyResolutionError::KeyStoreUnreadable(primary.to_string())),
        },
    }
}
