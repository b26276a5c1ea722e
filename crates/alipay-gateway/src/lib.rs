//! Request signing for the Alipay open-platform gateway.
//!
//! Every call to `gateway.do` carries a flat set of parameters that is
//! canonicalized (sorted, `key=value`, `&`-joined), signed with the merchant's
//! RSA key and sent as a percent-encoded query string with a trailing `sign`
//! field. Responses and asynchronous notifications are verified the same way in
//! reverse, against the gateway's public key.
//!
//! # Building blocks
//!
//! - [`ParamMap`]: the ordered parameter set of a single request
//! - [`codec`]: canonicalization, [`sign`], [`verify`], [`build_signed_query`]
//! - [`keys`]: PEM parsing for merchant and gateway keys
//! - [`timestamp`]: the gateway's `timestamp` field format
//!
//! # Quick example
//!
//! ```no_run
//! use alipay::{build_signed_query, keys, ParamMap, SignType};
//!
//! # fn main() -> Result<(), alipay::AlipayError> {
//! let key = keys::parse_private_key(&std::fs::read_to_string("app_private.pem").unwrap())?;
//!
//! let mut params = ParamMap::new();
//! params.insert("app_id", "2021000000000000");
//! params.insert("method", "alipay.trade.query");
//! params.insert("biz_content", r#"{"out_trade_no":"20150320010101001"}"#);
//!
//! let query = build_signed_query(&params, &key, SignType::Rsa2)?;
//! println!("https://openapi.alipay.com/gateway.do?{query}");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod keys;
pub mod params;
pub mod response;
pub mod timestamp;

// Re-exports
pub use codec::{
    build_signed_query, canonicalize, encode_component, sign, verify, Canonical, SignType,
};
pub use constants::*;
pub use error::AlipayError;
pub use params::ParamMap;
pub use response::CommonResponse;

pub use rsa::{RsaPrivateKey, RsaPublicKey};
