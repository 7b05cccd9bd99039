//! Property-based tests for configuration validation and symmetric
//! resolution.
//!
//! Property 1: Inline-secret round trip
//! Property 2: Mutual exclusivity always wins
//! Property 3: Keystore completeness errors name the field

use proptest::prelude::*;
use token_signing::{Claims, ConfigError, KeyConfig, KeyMode, KeySettings, TokenService};

/// Generate inline secrets that carry no PEM armor and no surrounding
/// whitespace.
fn arb_secret() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_!#%+/=][a-zA-Z0-9_!#%+/=-]{0,63}"
}

/// Generate arbitrary subject strings.
fn arb_subject() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,128}"
}

/// Generate optional field values, present or absent.
fn arb_optional_field() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z0-9-]{1,16}")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property 1: any valid inline-secret config resolves symmetric, and
    /// issue followed by verify round-trips the claims unchanged.
    #[test]
    fn prop_inline_secret_round_trip(secret in arb_secret(), subject in arb_subject()) {
        let settings = KeySettings::new().with_key_value(secret);
        let service = TokenService::bootstrap(&settings).unwrap();
        prop_assert_eq!(service.mode(), KeyMode::Symmetric);

        let claims = Claims::new("token-signing".to_string(), subject.clone(), 900);
        let token = service.issue(&claims).unwrap();
        let verified = service.verify(&token).unwrap();
        prop_assert_eq!(&verified.sub, &subject);
        prop_assert_eq!(&verified, &claims);
    }

    /// Property 2: providing both key-value and key-store always fails
    /// with AmbiguousKeySource, regardless of the remaining fields.
    #[test]
    fn prop_both_sources_always_ambiguous(
        secret in arb_secret(),
        password in arb_optional_field(),
        alias in arb_optional_field(),
        key_password in arb_optional_field(),
    ) {
        let mut settings = KeySettings::new()
            .with_key_value(secret)
            .with_key_store("store.p12");
        settings.key_store_password = password;
        settings.key_alias = alias;
        settings.key_password = key_password;

        prop_assert_eq!(settings.validate().unwrap_err(), ConfigError::AmbiguousKeySource);
    }

    /// Property 3a: key-store without key-alias names the alias field.
    #[test]
    fn prop_missing_alias_named(password in "[a-zA-Z0-9]{1,16}") {
        let settings = KeySettings::new()
            .with_key_store("store.p12")
            .with_key_store_password(password);
        prop_assert_eq!(
            settings.validate().unwrap_err(),
            ConfigError::MissingRequiredField("key-alias")
        );
    }

    /// Property 3b: key-store without key-store-password names the
    /// password field.
    #[test]
    fn prop_missing_password_named(alias in arb_optional_field()) {
        let mut settings = KeySettings::new().with_key_store("store.p12");
        settings.key_alias = alias;
        prop_assert_eq!(
            settings.validate().unwrap_err(),
            ConfigError::MissingRequiredField("key-store-password")
        );
    }

    /// Whitespace-only values count as unset.
    #[test]
    fn prop_blank_values_unset(blank in "[ \t]{0,8}") {
        let mut settings = KeySettings::new();
        settings.key_value = Some(blank);
        prop_assert_eq!(
            settings.validate().unwrap_err(),
            ConfigError::NoKeySourceConfigured
        );
    }

    /// Non-PEM values classify as symmetric secrets; symmetric resolution
    /// is deterministic down to the bytes.
    #[test]
    fn prop_secret_classification_and_determinism(secret in arb_secret()) {
        let settings = KeySettings::new().with_key_value(secret.clone());
        let validated = settings.validate().unwrap();
        prop_assert_eq!(validated.key(), &KeyConfig::InlineSecret(secret));

        let first = token_signing::key::resolve(&validated).unwrap();
        let second = token_signing::key::resolve(&validated).unwrap();
        prop_assert_eq!(first, second);
    }
}
