//! Token service construction and operation.
//!
//! [`TokenService::build`] selects the signing mode from the resolved key:
//! a symmetric secret yields an HS256 service that signs and verifies with
//! the same bytes; an RSA pair yields an RS256 service that signs with the
//! private half and verifies with the public half, so third parties can
//! verify with the public key alone.
//!
//! Once built, the service is immutable. There is no rotation; a
//! configuration change requires a process restart.

use crate::config::KeySettings;
use crate::error::{BootstrapError, TokenError};
use crate::jwt::{Claims, JwtCodec};
use crate::key::{resolve, ResolvedKey};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use std::time::Duration;
use tracing::{debug, error, info};

/// Verification mode, derived from the resolved key and never
/// independently settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// HMAC: one shared secret signs and verifies.
    Symmetric,
    /// RSA: private key signs, public key verifies.
    Asymmetric,
}

/// Issues and verifies JWTs with a fixed key.
///
/// Read-only after construction; safe for concurrent use from arbitrarily
/// many threads.
pub struct TokenService {
    mode: KeyMode,
    codec: JwtCodec,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Public half of an asymmetric pair, PKCS#1 DER.
    public_der: Option<Vec<u8>>,
    issuer: String,
    access_token_ttl: Duration,
}

// Key material stays out of logs; only the non-secret shape is shown.
impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("mode", &self.mode)
            .field("issuer", &self.issuer)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a token service around resolved key material.
    ///
    /// Consumes the key: once bound, the material is owned exclusively by
    /// this service.
    #[must_use]
    pub fn build(key: ResolvedKey, issuer: impl Into<String>, access_token_ttl: Duration) -> Self {
        let (mode, algorithm, encoding_key, decoding_key, public_der) = match &key {
            ResolvedKey::Symmetric { secret } => (
                KeyMode::Symmetric,
                Algorithm::HS256,
                EncodingKey::from_secret(secret),
                DecodingKey::from_secret(secret),
                None,
            ),
            ResolvedKey::Asymmetric {
                private_der,
                public_der,
            } => (
                KeyMode::Asymmetric,
                Algorithm::RS256,
                EncodingKey::from_rsa_der(private_der),
                DecodingKey::from_rsa_der(public_der),
                Some(public_der.clone()),
            ),
        };

        TokenService {
            mode,
            codec: JwtCodec::new(algorithm),
            encoding_key,
            decoding_key,
            public_der,
            issuer: issuer.into(),
            access_token_ttl,
        }
    }

    /// Run the full startup pipeline: validate, resolve, build.
    ///
    /// Logs each stage; any failure is fatal and must abort startup.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] naming the failing field or file.
    pub fn bootstrap(settings: &KeySettings) -> Result<Self, BootstrapError> {
        debug!("validating key source configuration");
        let validated = settings.validate().map_err(|e| {
            error!(error = %e, "key source configuration invalid");
            e
        })?;

        debug!("resolving signing key");
        let key = resolve(&validated).map_err(|e| {
            error!(error = %e, "signing key resolution failed");
            e
        })?;

        let service = Self::build(key, settings.issuer.clone(), settings.access_token_ttl);
        info!(mode = ?service.mode, issuer = %service.issuer, "token service ready");
        Ok(service)
    }

    /// The verification mode in effect.
    #[must_use]
    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// Public key (PKCS#1 DER) for asymmetric services, for distribution
    /// to verifying parties. `None` in symmetric mode.
    #[must_use]
    pub fn public_key_der(&self) -> Option<&[u8]> {
        self.public_der.as_deref()
    }

    /// Sign `claims` into a compact token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] if the bound key rejects the
    /// payload (e.g. malformed DER surfacing at first use).
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        self.codec.encode(claims, &self.encoding_key)
    }

    /// Issue a token for `subject` with this service's issuer and TTL.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`issue`](Self::issue).
    pub fn issue_for(&self, subject: &str) -> Result<String, TokenError> {
        let ttl = i64::try_from(self.access_token_ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims::new(self.issuer.clone(), subject.to_string(), ttl);
        self.issue(&claims)
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Verification`] on signature mismatch, expiry,
    /// or malformed input.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.codec.decode(token, &self.decoding_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeySettings;

    const TEST_PEM: &str = include_str!("../tests/fixtures/rsa-2048-pkcs8.pem");

    fn symmetric_service() -> TokenService {
        let settings = KeySettings::new().with_key_value("shared-secret-123");
        TokenService::bootstrap(&settings).unwrap()
    }

    #[test]
    fn test_symmetric_round_trip() {
        let service = symmetric_service();
        assert_eq!(service.mode(), KeyMode::Symmetric);

        let claims = Claims::new("token-signing".to_string(), "alice".to_string(), 900);
        let token = service.issue(&claims).unwrap();
        let verified = service.verify(&token).unwrap();

        assert_eq!(verified.sub, "alice");
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_asymmetric_round_trip() {
        let settings = KeySettings::new().with_key_value(TEST_PEM);
        let service = TokenService::bootstrap(&settings).unwrap();
        assert_eq!(service.mode(), KeyMode::Asymmetric);
        assert!(service.public_key_der().is_some());

        let token = service.issue_for("alice").unwrap();
        let verified = service.verify(&token).unwrap();
        assert_eq!(verified.sub, "alice");
        assert_eq!(verified.iss, "token-signing");
    }

    #[test]
    fn test_symmetric_has_no_public_key() {
        let service = symmetric_service();
        assert!(service.public_key_der().is_none());
    }

    #[test]
    fn test_cross_service_verification_fails() {
        let issuer = symmetric_service();
        let other =
            TokenService::bootstrap(&KeySettings::new().with_key_value("a-different-secret"))
                .unwrap();

        let token = issuer.issue_for("alice").unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_bootstrap_failure_propagates() {
        let settings = KeySettings::new();
        let err = TokenService::bootstrap(&settings).unwrap_err();
        assert!(matches!(err, BootstrapError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let service = symmetric_service();
        let rendered = format!("{:?}", service);
        assert!(rendered.contains("Symmetric"));
        assert!(!rendered.contains("shared-secret-123"));
    }

    #[test]
    fn test_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokenService>();
    }
}
