//! Option types for each gateway operation.
//!
//! Field names on the Rust side follow the merchant's vocabulary
//! (`out_trade_id`, `amount`); the serde renames give the gateway's
//! (`out_trade_no`, `total_amount`). `None` fields are left out of
//! `biz_content` entirely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order fields shared by the wap, page and app payment flows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayOptions {
    /// Order title.
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Merchant order number, unique per merchant.
    #[serde(rename = "out_trade_no")]
    pub out_trade_id: String,
    /// How long an unpaid trade stays open, `1m` to `15d`, or `1c` for
    /// "until midnight". No decimals: `90m`, not `1.5h`.
    #[serde(rename = "timeout_express", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    /// Order total in yuan, two decimals.
    #[serde(rename = "total_amount")]
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    /// `0` virtual goods, `1` physical goods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods_type: Option<String>,
    /// Echoed back verbatim in the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passback_params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_pay_channels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_pay_channels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Page the buyer is sent back to after paying. Sent as a top-level field.
    #[serde(skip)]
    pub return_url: Option<String>,
}

/// One line item of an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoodsDetail {
    pub goods_id: String,
    pub goods_name: String,
    pub quantity: u32,
    /// Unit price in yuan.
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_url: Option<String>,
}

/// Options for a merchant-presented QR code (`alipay.trade.precreate`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreCreateOptions {
    #[serde(rename = "out_trade_no")]
    pub out_trade_id: String,
    pub subject: String,
    #[serde(rename = "total_amount")]
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "timeout_express", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods_detail: Option<Vec<GoodsDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_pay_channels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_pay_channels: Option<String>,
    #[serde(skip)]
    pub return_url: Option<String>,
}

/// Options for charging a buyer-presented code (`alipay.trade.pay`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QrPayOptions {
    #[serde(rename = "out_trade_no")]
    pub out_trade_id: String,
    pub subject: String,
    #[serde(rename = "total_amount")]
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// `bar_code` or `wave_code`.
    pub scene: String,
    /// The code scanned from the buyer's app.
    pub auth_code: String,
    #[serde(rename = "timeout_express", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods_detail: Option<Vec<GoodsDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_pay_channels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_pay_channels: Option<String>,
    #[serde(skip)]
    pub return_url: Option<String>,
}

/// Identifies a trade by merchant order number, gateway trade number, or
/// both. The gateway prefers `trade_id` when both are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeQueryOptions {
    #[serde(rename = "out_trade_no", skip_serializing_if = "Option::is_none")]
    pub out_trade_id: Option<String>,
    #[serde(rename = "trade_no", skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloseOptions {
    #[serde(rename = "out_trade_no", skip_serializing_if = "Option::is_none")]
    pub out_trade_id: Option<String>,
    #[serde(rename = "trade_no", skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefundOptions {
    #[serde(rename = "out_trade_no", skip_serializing_if = "Option::is_none")]
    pub out_trade_id: Option<String>,
    #[serde(rename = "trade_no", skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    /// Amount to refund in yuan; may not exceed the paid amount.
    pub refund_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,
    /// Distinguishes partial refunds of the same trade.
    #[serde(rename = "out_request_no", skip_serializing_if = "Option::is_none")]
    pub out_request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
}

/// Looks up one refund request. `out_request_id` falls back to
/// `out_trade_id`, which is what the gateway uses when a refund was issued
/// without an explicit request number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefundQueryOptions {
    #[serde(rename = "out_trade_no", skip_serializing_if = "Option::is_none")]
    pub out_trade_id: Option<String>,
    #[serde(rename = "trade_no", skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    #[serde(rename = "out_request_no", skip_serializing_if = "Option::is_none")]
    pub out_request_id: Option<String>,
}

/// Split part of a paid trade to another account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettleOptions {
    pub operator_id: Option<String>,
    pub trade_no: String,
    pub out_request_no: String,
    /// Paying account (user id).
    pub trans_out: Option<String>,
    /// Receiving account (user id).
    pub trans_in: String,
    pub amount: Option<String>,
    /// Share of the trade amount, 1 to 100.
    pub amount_percentage: Option<u32>,
    pub desc: Option<String>,
}

/// One entry of `royalty_parameters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoyaltyParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_out: Option<String>,
    pub trans_in: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_percentage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct SettleContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    pub trade_no: String,
    pub out_request_no: String,
    pub royalty_parameters: Vec<RoyaltyParameter>,
}

impl From<&SettleOptions> for SettleContent {
    fn from(opts: &SettleOptions) -> Self {
        Self {
            operator_id: opts.operator_id.clone(),
            trade_no: opts.trade_no.clone(),
            out_request_no: opts.out_request_no.clone(),
            royalty_parameters: vec![RoyaltyParameter {
                trans_out: opts.trans_out.clone(),
                trans_in: opts.trans_in.clone(),
                amount: opts.amount.clone(),
                amount_percentage: opts.amount_percentage,
                desc: opts.desc.clone(),
            }],
        }
    }
}

/// Register an account as a split-payment receiver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindOptions {
    /// Receiver's login name.
    pub account: String,
    /// Receiver's display name; defaults to `account`.
    pub name: Option<String>,
    pub memo: Option<String>,
    /// Defaults to the current Unix time in milliseconds.
    pub out_request_no: Option<String>,
}

/// Receiver account type for login-name based binding.
pub const RECEIVER_TYPE_LOGIN_NAME: &str = "loginName";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoyaltyReceiver {
    #[serde(rename = "type")]
    pub receiver_type: String,
    pub account: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct BindContent {
    pub receiver_list: Vec<RoyaltyReceiver>,
    pub out_request_no: String,
}

impl BindContent {
    pub(crate) fn new(opts: &BindOptions, default_request_no: impl FnOnce() -> String) -> Self {
        Self {
            receiver_list: vec![RoyaltyReceiver {
                receiver_type: RECEIVER_TYPE_LOGIN_NAME.to_string(),
                account: opts.account.clone(),
                name: opts.name.clone().unwrap_or_else(|| opts.account.clone()),
                memo: opts.memo.clone(),
            }],
            out_request_no: opts
                .out_request_no
                .clone()
                .unwrap_or_else(default_request_no),
        }
    }
}

/// Which bill to download.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillDownloadOptions {
    /// `trade` (acquiring bill) or `signcustomer` (account balance movements).
    pub bill_type: String,
    /// `yyyy-MM-dd` for a daily bill, `yyyy-MM` for a monthly one.
    pub bill_date: String,
}

/// Device metadata for face-payment initialization, sent as `zimmetainfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmileInitOptions {
    /// Device fingerprint.
    pub apdid_token: String,
    pub app_name: String,
    pub app_version: String,
    /// Biometric capability string, e.g. `2.3.0:3,-4`.
    pub bio_meta_info: String,
}

/// Look up the result of a face authentication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FtokenQueryOptions {
    pub ftoken: String,
    /// `1` one-to-one verification, `2` search by user id, `3` search by
    /// phone number, `4` phone number plus face.
    pub biz_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_info: Option<Value>,
}
