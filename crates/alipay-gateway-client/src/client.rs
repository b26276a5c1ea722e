use std::sync::Arc;

use alipay::timestamp::{self, format_timestamp};
use alipay::{
    build_signed_query, canonicalize, gateway_url, verify, AlipayError, ParamMap, API_VERSION,
    CHARSET_UTF8, FORMAT_JSON, SIGN_FIELD, SIGN_TYPE_FIELD,
};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::AlipayConfig;
use crate::credentials::Credentials;
use crate::envelope::ResponseEnvelope;

/// Client for the gateway's `gateway.do` endpoint.
///
/// Cloning is cheap and clones share the credentials and the connection pool
/// of the wrapped `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct AlipayClient {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    gateway_url: Arc<str>,
}

impl AlipayClient {
    /// Create a client with a default transport (30s timeout, no redirects).
    pub fn new(credentials: Credentials) -> Result<Self, AlipayError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AlipayError::HttpError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(credentials, http))
    }

    /// Create a client with a custom reqwest::Client.
    pub fn with_http_client(credentials: Credentials, http: reqwest::Client) -> Self {
        let gateway_url = gateway_url(credentials.is_sandbox()).into();
        Self {
            http,
            credentials: Arc::new(credentials),
            gateway_url,
        }
    }

    /// Create a client from environment-derived settings.
    pub fn from_config(config: &AlipayConfig) -> Result<Self, AlipayError> {
        let client = Self::new(config.credentials()?)?;
        Ok(match &config.gateway_url {
            Some(url) => client.with_gateway_url(url.as_str()),
            None => client,
        })
    }

    /// Send requests to `url` instead of the production or sandbox endpoint.
    pub fn with_gateway_url(mut self, url: impl Into<Arc<str>>) -> Self {
        self.gateway_url = url.into();
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Envelope fields every call carries.
    pub fn common_params(&self, method: &str, at: &NaiveDateTime) -> ParamMap {
        let mut params = ParamMap::new();
        params.insert("app_id", self.credentials.app_id());
        params.insert("method", method);
        params.insert("format", FORMAT_JSON);
        params.insert("charset", CHARSET_UTF8);
        params.insert("sign_type", self.credentials.sign_type().as_str());
        params.insert("timestamp", format_timestamp(at));
        params.insert("version", API_VERSION);
        params
    }

    /// Envelope fields plus `biz_content`, the JSON of `biz`.
    pub fn biz_params<T: Serialize + ?Sized>(
        &self,
        method: &str,
        biz: &T,
        at: &NaiveDateTime,
    ) -> Result<ParamMap, AlipayError> {
        let mut params = self.common_params(method, at);
        params.insert("biz_content", serde_json::to_string(biz)?);
        Ok(params)
    }

    /// Add `app_auth_token` when the client acts for another merchant.
    pub(crate) fn authorize(&self, params: &mut ParamMap) {
        params.insert_opt("app_auth_token", self.credentials.app_auth_token());
    }

    /// Add the configured `notify_url` and the caller's `return_url`.
    pub(crate) fn insert_callbacks(&self, params: &mut ParamMap, return_url: Option<&str>) {
        params.insert_opt("notify_url", self.credentials.notify_url());
        params.insert_opt("return_url", return_url);
    }

    /// Sign `params` and return the query string, `sign` last.
    pub fn sign_params(&self, params: &ParamMap) -> Result<String, AlipayError> {
        build_signed_query(
            params,
            self.credentials.private_key(),
            self.credentials.sign_type(),
        )
    }

    /// Full GET URL for `params`.
    pub fn request_url(&self, params: &ParamMap) -> Result<String, AlipayError> {
        Ok(format!("{}?{}", self.gateway_url, self.sign_params(params)?))
    }

    /// Sign `params` and GET them from the gateway.
    ///
    /// Any HTTP status is returned as an envelope; only transport failures are
    /// errors.
    pub async fn send(&self, params: &ParamMap) -> Result<ResponseEnvelope, AlipayError> {
        let url = self.request_url(params)?;
        let method = params.get_str("method").unwrap_or_default();
        tracing::debug!(method, sandbox = self.credentials.is_sandbox(), "gateway request");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AlipayError::HttpError(format!("request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| AlipayError::HttpError(format!("failed to read response body: {e}")))?;
        tracing::debug!(method, status = status.as_u16(), bytes = body.len(), "gateway response");

        Ok(ResponseEnvelope::new(status, body))
    }

    /// Call any gateway method with `biz` as its `biz_content`.
    pub async fn execute<T: Serialize + ?Sized>(
        &self,
        method: &str,
        biz: &T,
    ) -> Result<ResponseEnvelope, AlipayError> {
        let mut params = self.biz_params(method, biz, &timestamp::now())?;
        self.authorize(&mut params);
        self.send(&params).await
    }

    /// Check the gateway's signature on a flat response or notification.
    ///
    /// `sign` and `sign_type` are left out of the signed content. A missing or
    /// mismatched signature yields `false`.
    pub fn verify_response(&self, response: &ParamMap) -> bool {
        let Some(signature) = response.get_str(SIGN_FIELD) else {
            tracing::warn!("gateway message has no signature");
            return false;
        };

        let mut content = response.clone();
        content.remove(SIGN_FIELD);
        content.remove(SIGN_TYPE_FIELD);
        let canonical = canonicalize(&content);

        let valid = verify(
            &canonical.unencoded,
            signature,
            self.credentials.public_key(),
            self.credentials.sign_type(),
        );
        if !valid {
            tracing::warn!(
                sign_type = %self.credentials.sign_type(),
                "gateway signature mismatch"
            );
        }
        valid
    }

    /// Verify an asynchronous notification posted as
    /// `application/x-www-form-urlencoded`.
    pub fn verify_notification(&self, body: &[u8]) -> bool {
        self.verify_response(&parse_form(body))
    }
}

/// Decode a form-encoded body into parameters. Repeated keys keep the last value.
pub fn parse_form(body: &[u8]) -> ParamMap {
    url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alipay::{keys, sign, SignType};
    use chrono::NaiveDate;

    const MERCHANT_PRIVATE: &str = include_str!("../../../testdata/merchant_private.pem");
    const GATEWAY_PRIVATE: &str = include_str!("../../../testdata/gateway_private.pem");
    const GATEWAY_PUBLIC: &str = include_str!("../../../testdata/gateway_public.pem");

    fn client(sandbox: bool) -> AlipayClient {
        let creds =
            Credentials::from_pem("2021000000000000", MERCHANT_PRIVATE, GATEWAY_PUBLIC, SignType::Rsa2)
                .unwrap()
                .with_sandbox(sandbox);
        AlipayClient::new(creds).unwrap()
    }

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap()
    }

    fn gateway_sign(content: &ParamMap) -> String {
        let key = keys::parse_private_key(GATEWAY_PRIVATE).unwrap();
        sign(&canonicalize(content).unencoded, &key, SignType::Rsa2).unwrap()
    }

    #[test]
    fn test_common_params() {
        let params = client(false).common_params("alipay.trade.query", &fixed_time());
        assert_eq!(params.get_str("app_id"), Some("2021000000000000"));
        assert_eq!(params.get_str("method"), Some("alipay.trade.query"));
        assert_eq!(params.get_str("format"), Some("JSON"));
        assert_eq!(params.get_str("charset"), Some("utf-8"));
        assert_eq!(params.get_str("sign_type"), Some("RSA2"));
        assert_eq!(params.get_str("timestamp"), Some("2024-05-06 07:08:09"));
        assert_eq!(params.get_str("version"), Some("1.0"));
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn test_sandbox_only_changes_host() {
        let biz = serde_json::json!({"out_trade_no": "T1"});
        let prod = client(false);
        let sandbox = client(true);
        let p = prod.biz_params("alipay.trade.query", &biz, &fixed_time()).unwrap();
        let s = sandbox.biz_params("alipay.trade.query", &biz, &fixed_time()).unwrap();

        let prod_url = prod.request_url(&p).unwrap();
        let sandbox_url = sandbox.request_url(&s).unwrap();
        let (prod_host, prod_query) = prod_url.split_once('?').unwrap();
        let (sandbox_host, sandbox_query) = sandbox_url.split_once('?').unwrap();

        assert_eq!(prod_host, "https://openapi.alipay.com/gateway.do");
        assert_eq!(sandbox_host, "https://openapi.alipaydev.com/gateway.do");
        assert_eq!(prod_query, sandbox_query);
    }

    #[test]
    fn test_gateway_url_override() {
        let client = client(true).with_gateway_url("http://127.0.0.1:9999/gateway.do");
        assert_eq!(client.gateway_url(), "http://127.0.0.1:9999/gateway.do");
    }

    #[test]
    fn test_verify_response_ignores_sign_fields() {
        let mut response = ParamMap::new();
        response.insert("trade_status", "TRADE_SUCCESS");
        response.insert("out_trade_no", "T1");
        response.insert("total_amount", "9.90");
        let signature = gateway_sign(&response);
        response.insert("sign", signature);
        response.insert("sign_type", "RSA2");

        let client = client(false);
        assert!(client.verify_response(&response));

        response.insert("total_amount", "99.00");
        assert!(!client.verify_response(&response));
    }

    #[test]
    fn test_verify_response_without_signature() {
        let mut response = ParamMap::new();
        response.insert("trade_status", "TRADE_SUCCESS");
        assert!(!client(false).verify_response(&response));
    }

    #[test]
    fn test_verify_response_rejects_merchant_signature() {
        let mut response = ParamMap::new();
        response.insert("trade_status", "TRADE_SUCCESS");
        let merchant = keys::parse_private_key(MERCHANT_PRIVATE).unwrap();
        let signature = sign("trade_status=TRADE_SUCCESS", &merchant, SignType::Rsa2).unwrap();
        response.insert("sign", signature);
        assert!(!client(false).verify_response(&response));
    }

    #[test]
    fn test_verify_notification_form_body() {
        let mut content = ParamMap::new();
        content.insert("notify_type", "trade_status_sync");
        content.insert("subject", "tea & cake");
        content.insert("trade_status", "TRADE_SUCCESS");
        let signature = gateway_sign(&content);

        let body = format!(
            "notify_type=trade_status_sync&subject=tea+%26+cake&trade_status=TRADE_SUCCESS&sign_type=RSA2&sign={}",
            urlencoding::encode(&signature)
        );
        assert!(client(false).verify_notification(body.as_bytes()));
    }

    #[test]
    fn test_parse_form() {
        let params = parse_form(b"a=1&b=x+y&c=%E6%94%AF&a=2");
        assert_eq!(params.get_str("a"), Some("2"));
        assert_eq!(params.get_str("b"), Some("x y"));
        assert_eq!(params.get_str("c"), Some("支"));
    }
}
