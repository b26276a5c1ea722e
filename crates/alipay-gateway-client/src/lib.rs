//! Async client SDK for the Alipay open-platform gateway.
//!
//! [`AlipayClient`] holds the merchant [`Credentials`], turns typed options
//! into the gateway's flat parameter set, signs it and issues the GET request.
//! Client-side payment flows ([`AlipayClient::pay`], [`AlipayClient::web_pay`])
//! return the signed query string instead of calling the gateway.
//!
//! # Quick Example
//!
//! ```no_run
//! use alipay_client::{AlipayClient, Credentials, SignType, TradeQueryOptions};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let credentials = Credentials::from_files(
//!     "2021000000000000",
//!     "keys/app_private.pem",
//!     "keys/alipay_public.pem",
//!     SignType::Rsa2,
//! )
//! .unwrap()
//! .with_sandbox(true);
//! let client = AlipayClient::new(credentials).unwrap();
//!
//! let resp = client
//!     .query(&TradeQueryOptions {
//!         out_trade_id: Some("20150320010101001".into()),
//!         ..Default::default()
//!     })
//!     .await
//!     .unwrap();
//!
//! if let Some(result) = resp.result_node("alipay.trade.query").unwrap() {
//!     println!("trade status: {:?}", result.field_str("trade_status"));
//! }
//! # }
//! ```

mod api;
mod client;
mod config;
mod credentials;
mod envelope;
mod model;

pub use client::{parse_form, AlipayClient};
pub use config::{AlipayConfig, ConfigError};
pub use credentials::Credentials;
pub use envelope::ResponseEnvelope;
pub use model::*;

// Re-export commonly needed types from core
pub use alipay::{
    AlipayError, Canonical, CommonResponse, ParamMap, SignType, GATEWAY_URL, SANDBOX_GATEWAY_URL,
};
