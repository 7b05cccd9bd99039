use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Claims carried inside an issued token.
///
/// Standard registered claims plus a flattened map for anything the caller
/// wants to assert. The exact claim schema beyond the registered set
/// belongs to the grant-flow layer, not this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Issuer.
    pub iss: String,
    /// Subject.
    pub sub: String,
    /// Audience.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Vec<String>>,
    /// Expiration time (seconds since epoch).
    pub exp: i64,
    /// Issued at (seconds since epoch).
    pub iat: i64,
    /// Not before (seconds since epoch).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Token id.
    pub jti: String,
    /// Granted scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Caller-defined claims.
    #[serde(flatten)]
    pub custom: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for `subject` expiring `ttl_seconds` from now.
    #[must_use]
    pub fn new(issuer: String, subject: String, ttl_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Claims {
            iss: issuer,
            sub: subject,
            aud: None,
            exp: now.saturating_add(ttl_seconds),
            iat: now,
            nbf: Some(now),
            jti: uuid::Uuid::new_v4().to_string(),
            scopes: None,
            custom: HashMap::new(),
        }
    }

    /// Set the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: Vec<String>) -> Self {
        self.aud = Some(audience);
        self
    }

    /// Set the granted scopes.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Attach a caller-defined claim.
    #[must_use]
    pub fn with_custom_claim(mut self, key: String, value: serde_json::Value) -> Self {
        self.custom.insert(key, value);
        self
    }

    /// Whether the token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp < chrono::Utc::now().timestamp()
    }

    /// Whether the token is valid at `timestamp` (within nbf/exp).
    #[must_use]
    pub fn is_valid_at(&self, timestamp: i64) -> bool {
        if let Some(nbf) = self.nbf {
            if timestamp < nbf {
                return false;
            }
        }
        timestamp < self.exp
    }
}
