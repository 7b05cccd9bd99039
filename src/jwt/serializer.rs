use crate::error::TokenError;
use crate::jwt::claims::Claims;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Encodes and decodes [`Claims`] with a fixed algorithm.
///
/// The algorithm is derived from the resolved key mode and never changes
/// for the codec's lifetime; tokens signed under any other algorithm are
/// rejected at decode time.
pub struct JwtCodec {
    algorithm: Algorithm,
}

impl JwtCodec {
    /// Create a codec for `algorithm`.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        JwtCodec { algorithm }
    }

    /// Sign `claims` into a compact token string.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] when the key rejects the payload.
    pub fn encode(&self, claims: &Claims, key: &EncodingKey) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, key).map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify `token` and return its claims.
    ///
    /// Validates the signature, `exp` and `nbf`. Audience validation is a
    /// grant-flow concern and is disabled here.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Verification`] on signature mismatch, expiry,
    /// or malformed input.
    pub fn decode(&self, token: &str, key: &DecodingKey) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, key, &validation)
            .map_err(|e| TokenError::Verification(e.to_string()))?;

        Ok(token_data.claims)
    }

    /// Decode claims without verifying the signature.
    ///
    /// For diagnostics and routing only; never trust the result for
    /// authorization decisions.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Verification`] on structurally invalid input.
    pub fn decode_unverified(&self, token: &str) -> Result<Claims, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(TokenError::Verification("invalid token format".to_string()));
        }

        let payload =
            base64::Engine::decode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, parts[1])
                .map_err(|e| TokenError::Verification(e.to_string()))?;

        serde_json::from_slice(&payload).map_err(|e| TokenError::Verification(e.to_string()))
    }
}
