use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::SUCCESS_CODE;

/// Result node shared by every gateway method, e.g. the value of
/// `alipay_trade_query_response`.
///
/// Method-specific fields (`trade_no`, `qr_code`, `bill_download_url`, ...)
/// are kept in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonResponse {
    pub code: String,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_msg: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CommonResponse {
    /// Whether the gateway accepted the call (`code == "10000"`).
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// A method-specific field as a string.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}
