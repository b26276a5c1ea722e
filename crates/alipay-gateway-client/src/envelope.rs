use std::borrow::Cow;

use alipay::{response_node, AlipayError, CommonResponse, ParamMap};
use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// What came back from one gateway call.
///
/// The body is stored once; [`text`](Self::text) and [`json`](Self::json) are
/// views over the same bytes, so a body that fails to parse is still readable.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    status: StatusCode,
    body: Bytes,
}

impl ResponseEnvelope {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the HTTP status is `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text. Invalid UTF-8 is replaced, not rejected.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as JSON. An empty body yields `Ok(None)`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>, AlipayError> {
        if self.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&self.body)?))
    }

    /// The result node for `method`, e.g. `alipay_trade_query_response` for
    /// `alipay.trade.query`. `Ok(None)` when the body is empty or has no such node.
    pub fn result_node(&self, method: &str) -> Result<Option<CommonResponse>, AlipayError> {
        let Some(Value::Object(mut root)) = self.json::<Value>()? else {
            return Ok(None);
        };
        match root.remove(&response_node(method)) {
            Some(node) => Ok(Some(serde_json::from_value(node)?)),
            None => Ok(None),
        }
    }

    /// The body as a parameter set.
    ///
    /// Only a flat body can be passed on to
    /// [`AlipayClient::verify_response`](crate::AlipayClient::verify_response):
    /// nested objects come back with their keys re-sorted, so they no longer
    /// render to the bytes the gateway signed.
    pub fn params(&self) -> Result<Option<ParamMap>, AlipayError> {
        self.json::<Value>()?.map(ParamMap::from_value).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_not_parsed() {
        let env = ResponseEnvelope::new(StatusCode::OK, Bytes::new());
        assert!(env.is_ok());
        assert!(env.json::<Value>().unwrap().is_none());
        assert!(env.result_node("alipay.trade.query").unwrap().is_none());
    }

    #[test]
    fn test_malformed_body_keeps_raw_text() {
        let env = ResponseEnvelope::new(StatusCode::BAD_GATEWAY, "<html>upstream error</html>");
        assert!(!env.is_ok());
        assert!(matches!(
            env.json::<Value>(),
            Err(AlipayError::SerdeError(_))
        ));
        assert_eq!(env.text(), "<html>upstream error</html>");
        assert_eq!(env.body(), b"<html>upstream error</html>");
    }

    #[test]
    fn test_result_node_extraction() {
        let env = ResponseEnvelope::new(
            StatusCode::OK,
            r#"{"alipay_trade_close_response":{"code":"10000","msg":"Success","trade_no":"2013112111001004500000675971"},"sign":"abc"}"#,
        );
        let node = env.result_node("alipay.trade.close").unwrap().unwrap();
        assert!(node.is_success());
        assert_eq!(node.field_str("trade_no"), Some("2013112111001004500000675971"));
        assert!(env.result_node("alipay.trade.query").unwrap().is_none());
    }

    #[test]
    fn test_params_view() {
        let env = ResponseEnvelope::new(StatusCode::OK, r#"{"sign":"abc","trade_status":"TRADE_SUCCESS"}"#);
        let params = env.params().unwrap().unwrap();
        assert_eq!(params.get_str("trade_status"), Some("TRADE_SUCCESS"));
    }
}
