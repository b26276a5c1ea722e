//! Canonical request strings and their RSA signatures.
//!
//! The gateway signs the `key=value&...` form of the parameters with raw
//! values, while the wire carries the same pairs with percent-encoded values.
//! Both forms come out of a single pass over the same [`ParamMap`], so they
//! always agree on key order and on which keys are present.

use base64::Engine;
use rsa::rand_core::OsRng;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::AlipayError;
use crate::params::ParamMap;

/// Signature algorithm, as named in the `sign_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignType {
    /// RSASSA-PKCS1-v1_5 with SHA-1.
    #[serde(rename = "RSA")]
    Rsa,
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    #[default]
    #[serde(rename = "RSA2")]
    Rsa2,
}

impl SignType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Rsa2 => "RSA2",
        }
    }

    fn scheme(&self) -> Pkcs1v15Sign {
        match self {
            Self::Rsa => Pkcs1v15Sign::new::<Sha1>(),
            Self::Rsa2 => Pkcs1v15Sign::new::<Sha256>(),
        }
    }

    fn digest(&self, content: &[u8]) -> Vec<u8> {
        match self {
            Self::Rsa => Sha1::digest(content).to_vec(),
            Self::Rsa2 => Sha256::digest(content).to_vec(),
        }
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignType {
    type Err = AlipayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RSA" => Ok(Self::Rsa),
            "RSA2" => Ok(Self::Rsa2),
            other => Err(AlipayError::ConfigError(format!(
                "unsupported sign type {other:?}, expected \"RSA\" or \"RSA2\""
            ))),
        }
    }
}

/// The two renderings of a parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Canonical {
    /// Raw values. This is the exact signature input.
    pub unencoded: String,
    /// Percent-encoded values. This is the wire payload.
    pub encoded: String,
}

/// Render `params` into its signing and wire forms.
///
/// Absent values and empty strings are left out of both forms.
pub fn canonicalize(params: &ParamMap) -> Canonical {
    let mut out = Canonical::default();
    for (i, (key, value)) in params.signable().enumerate() {
        if i != 0 {
            out.unencoded.push('&');
            out.encoded.push('&');
        }
        out.unencoded.push_str(key);
        out.unencoded.push('=');
        out.unencoded.push_str(&value);

        out.encoded.push_str(key);
        out.encoded.push('=');
        out.encoded.push_str(&encode_component(&value));
    }
    out
}

/// Percent-encode a query value.
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` untouched and encodes every other
/// UTF-8 byte as `%XX`.
pub fn encode_component(value: &str) -> String {
    let encoded = urlencoding::encode(value);
    if !encoded.contains('%') {
        return encoded.into_owned();
    }
    // urlencoding also escapes the sub-delims that URI components keep literal.
    // Every `%` in its output starts an escape, so these cannot overlap.
    encoded
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Sign `content` with the merchant key. Returns the base64 signature.
pub fn sign(
    content: &str,
    private_key: &RsaPrivateKey,
    sign_type: SignType,
) -> Result<String, AlipayError> {
    let hashed = sign_type.digest(content.as_bytes());
    // Blinded: the private-key operation itself is not constant-time.
    let signature = private_key
        .sign_with_rng(&mut OsRng, sign_type.scheme(), &hashed)
        .map_err(|e| AlipayError::SignatureError(format!("{sign_type} signing failed: {e}")))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(signature))
}

/// Check a base64 signature over `content` against the gateway key.
///
/// Returns `false` for a mismatch and for a signature that is not valid base64.
pub fn verify(
    content: &str,
    signature: &str,
    public_key: &RsaPublicKey,
    sign_type: SignType,
) -> bool {
    let raw = match base64::engine::general_purpose::STANDARD.decode(signature.trim()) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!(error = %e, "signature is not valid base64");
            return false;
        }
    };
    let hashed = sign_type.digest(content.as_bytes());
    public_key.verify(sign_type.scheme(), &hashed, &raw).is_ok()
}

/// Canonicalize, sign, and return the query string ready to append to the
/// gateway URL: `<encoded>&sign=<encoded signature>`.
pub fn build_signed_query(
    params: &ParamMap,
    private_key: &RsaPrivateKey,
    sign_type: SignType,
) -> Result<String, AlipayError> {
    let canonical = canonicalize(params);
    let signature = sign(&canonical.unencoded, private_key, sign_type)?;
    Ok(format!(
        "{}&sign={}",
        canonical.encoded,
        encode_component(&signature)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonicalize_sorts_and_drops_empty() {
        let params = ParamMap::from_value(json!({"b": "2", "a": "1", "c": ""})).unwrap();
        let canonical = canonicalize(&params);
        assert_eq!(canonical.unencoded, "a=1&b=2");
        assert_eq!(canonical.encoded, "a=1&b=2");
    }

    #[test]
    fn test_canonicalize_keeps_zero_and_false() {
        let params =
            ParamMap::from_value(json!({"amount": 0, "flag": false, "gone": null})).unwrap();
        assert_eq!(canonicalize(&params).unencoded, "amount=0&flag=false");
    }

    #[test]
    fn test_canonicalize_encodes_only_wire_form() {
        let params = ParamMap::from_value(json!({"subject": "tea & cake", "x": "y"})).unwrap();
        let canonical = canonicalize(&params);
        assert_eq!(canonical.unencoded, "subject=tea & cake&x=y");
        assert_eq!(canonical.encoded, "subject=tea%20%26%20cake&x=y");
    }

    #[test]
    fn test_canonicalize_serializes_composites_once() {
        let params = ParamMap::from_value(json!({
            "biz_content": {"out_trade_no": "T1", "total_amount": "9.00"},
            "query_options": ["TRADE_SETTLE_INFO"]
        }))
        .unwrap();
        let canonical = canonicalize(&params);
        assert_eq!(
            canonical.unencoded,
            r#"biz_content={"out_trade_no":"T1","total_amount":"9.00"}&query_options=["TRADE_SETTLE_INFO"]"#
        );
        assert!(canonical
            .encoded
            .starts_with("biz_content=%7B%22out_trade_no%22%3A%22T1%22"));
    }

    #[test]
    fn test_canonicalize_empty_map() {
        let canonical = canonicalize(&ParamMap::new());
        assert_eq!(canonical, Canonical::default());
    }

    #[test]
    fn test_encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("AZaz09-_.!~*'()"), "AZaz09-_.!~*'()");
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("2024-01-02 03:04:05"), "2024-01-02%2003%3A04%3A05");
        assert_eq!(encode_component("+/="), "%2B%2F%3D");
        assert_eq!(encode_component("%21"), "%2521");
        assert_eq!(encode_component("支付"), "%E6%94%AF%E4%BB%98");
    }

    #[test]
    fn test_sign_type_parse_and_display() {
        assert_eq!("RSA".parse::<SignType>().unwrap(), SignType::Rsa);
        assert_eq!("RSA2".parse::<SignType>().unwrap(), SignType::Rsa2);
        assert!("rsa2".parse::<SignType>().is_err());
        assert_eq!(SignType::Rsa2.to_string(), "RSA2");
        assert_eq!(serde_json::to_string(&SignType::Rsa).unwrap(), r#""RSA""#);
    }

    #[test]
    fn test_verify_rejects_garbage_base64() {
        let key = crate::keys::parse_public_key(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../testdata/merchant_public.pem"
        )))
        .unwrap();
        assert!(!verify("a=1", "not base64!!", &key, SignType::Rsa2));
        assert!(!verify("a=1", "", &key, SignType::Rsa2));
    }

    #[test]
    fn test_blinded_signatures_stay_deterministic() {
        let key = crate::keys::parse_private_key(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../testdata/merchant_private.pem"
        )))
        .unwrap();
        let expected = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../testdata/rsa2_a1b2.sig"
        ))
        .trim();
        for _ in 0..3 {
            assert_eq!(sign("a=1&b=2", &key, SignType::Rsa2).unwrap(), expected);
        }
    }
}
