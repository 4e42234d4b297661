//! Provider request signing and verification.
//!
//! The aggregator provider signs requests by hashing a canonical form of
//! the parameters with the shared merchant secret appended. The same codec
//! covers both directions: signing outbound redirect parameters and
//! verifying inbound notification parameters.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use subtle::ConstantTimeEq;

/// Reserved parameter carrying the signature itself.
pub const SIGN_FIELD: &str = "sign";

/// Reserved parameter naming the digest algorithm.
pub const SIGN_TYPE_FIELD: &str = "sign_type";

/// Value sent in the `sign_type` parameter.
pub const SIGN_TYPE: &str = "SHA256";

/// Builds the canonical parameter string.
///
/// Entries with empty values and the two reserved signature fields are
/// dropped; remaining keys are sorted ascending by byte order and joined
/// as `key=value` pairs with `&`. Values are opaque strings with no
/// escaping or type coercion, per the provider contract.
pub fn canonicalize(params: &HashMap<String, String>) -> String {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .filter(|(key, value)| {
            !value.is_empty() && key.as_str() != SIGN_FIELD && key.as_str() != SIGN_TYPE_FIELD
        })
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let mut out = String::new();
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Computes the signature over the canonical form with the secret appended.
///
/// Output is lowercase hex.
pub fn sign(params: &HashMap<String, String>, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonicalize(params).as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verifies the `sign` field against the remaining parameters.
///
/// Fails closed: a missing or empty signature field is a verification
/// failure, never an exemption. Comparison is case-sensitive exact
/// equality, performed in constant time.
pub fn verify(params: &HashMap<String, String>, secret: &str) -> bool {
    let provided = match params.get(SIGN_FIELD) {
        Some(value) if !value.is_empty() => value,
        _ => return false,
    };
    let expected = sign(params, secret);
    constant_time_compare(expected.as_bytes(), provided.as_bytes())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "merchant-signing-secret";

    fn params(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn canonicalize_sorts_keys_ascending_by_byte_order() {
        let p = params(&[("money", "0.50"), ("out_trade_no", "1"), ("name", "x")]);
        assert_eq!(canonicalize(&p), "money=0.50&name=x&out_trade_no=1");
    }

    #[test]
    fn canonicalize_drops_empty_values() {
        let p = params(&[("a", "1"), ("b", ""), ("c", "3")]);
        assert_eq!(canonicalize(&p), "a=1&c=3");
    }

    #[test]
    fn canonicalize_drops_reserved_signature_fields() {
        let p = params(&[("a", "1"), ("sign", "deadbeef"), ("sign_type", "SHA256")]);
        assert_eq!(canonicalize(&p), "a=1");
    }

    #[test]
    fn canonicalize_of_empty_map_is_empty() {
        assert_eq!(canonicalize(&HashMap::new()), "");
    }

    #[test]
    fn sign_is_deterministic_and_lowercase_hex() {
        let p = params(&[("out_trade_no", "20260219120000123"), ("money", "0.50")]);
        let first = sign(&p, TEST_SECRET);
        let second = sign(&p, TEST_SECRET);

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn sign_depends_on_the_secret() {
        let p = params(&[("a", "1")]);
        assert_ne!(sign(&p, "secret-one"), sign(&p, "secret-two"));
    }

    #[test]
    fn sign_ignores_the_signature_fields_themselves() {
        let unsigned = params(&[("a", "1"), ("b", "2")]);
        let mut signed = unsigned.clone();
        let sig = sign(&unsigned, TEST_SECRET);
        signed.insert("sign".to_string(), sig);
        signed.insert("sign_type".to_string(), SIGN_TYPE.to_string());

        assert_eq!(sign(&signed, TEST_SECRET), sign(&unsigned, TEST_SECRET));
    }

    #[test]
    fn verify_accepts_a_correctly_signed_map() {
        let mut p = params(&[("out_trade_no", "1"), ("money", "0.50")]);
        let sig = sign(&p, TEST_SECRET);
        p.insert("sign".to_string(), sig);

        assert!(verify(&p, TEST_SECRET));
    }

    #[test]
    fn verify_fails_closed_without_a_signature() {
        let p = params(&[("a", "1")]);
        assert!(!verify(&p, TEST_SECRET));

        let p = params(&[("a", "1"), ("sign", "")]);
        assert!(!verify(&p, TEST_SECRET));
    }

    #[test]
    fn verify_rejects_a_tampered_value() {
        let mut p = params(&[("money", "0.50")]);
        let sig = sign(&p, TEST_SECRET);
        p.insert("sign".to_string(), sig);
        p.insert("money".to_string(), "5.00".to_string());

        assert!(!verify(&p, TEST_SECRET));
    }

    #[test]
    fn verify_rejects_the_wrong_secret() {
        let mut p = params(&[("a", "1")]);
        let sig = sign(&p, TEST_SECRET);
        p.insert("sign".to_string(), sig);

        assert!(!verify(&p, "other-secret"));
    }

    #[test]
    fn verify_is_case_sensitive_about_the_signature() {
        let mut p = params(&[("a", "1")]);
        let sig = sign(&p, TEST_SECRET).to_uppercase();
        p.insert("sign".to_string(), sig);

        assert!(!verify(&p, TEST_SECRET));
    }

    proptest! {
        #[test]
        fn canonical_output_is_sorted_and_free_of_excluded_entries(
            entries in proptest::collection::hash_map("[a-z_]{1,10}", "[a-zA-Z0-9.]{0,12}", 0..12)
        ) {
            let canonical = canonicalize(&entries);

            if !canonical.is_empty() {
                let keys: Vec<&str> = canonical
                    .split('&')
                    .map(|pair| pair.split_once('=').expect("pair has separator").0)
                    .collect();

                let mut sorted = keys.clone();
                sorted.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
                prop_assert_eq!(&keys, &sorted);

                for key in keys {
                    prop_assert_ne!(key, SIGN_FIELD);
                    prop_assert_ne!(key, SIGN_TYPE_FIELD);
                    prop_assert!(!entries[key].is_empty());
                }
            }
        }

        #[test]
        fn signed_maps_always_verify(
            entries in proptest::collection::hash_map("[a-z_]{1,10}", "[a-zA-Z0-9.]{1,12}", 1..8),
            secret in "[a-zA-Z0-9]{8,32}"
        ) {
            let mut signed = entries.clone();
            let sig = sign(&entries, &secret);
            signed.insert(SIGN_FIELD.to_string(), sig);

            prop_assert!(verify(&signed, &secret));
        }
    }
}
