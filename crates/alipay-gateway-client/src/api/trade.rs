use alipay::timestamp;
use alipay::{method, product_code, AlipayError, ParamMap};
use serde_json::json;

use crate::client::AlipayClient;
use crate::envelope::ResponseEnvelope;
use crate::model::*;

/// Settlement details requested alongside every trade query.
const QUERY_OPTIONS: [&str; 1] = ["TRADE_SETTLE_INFO"];

impl AlipayClient {
    /// Mobile web payment.
    ///
    /// `alipay.trade.wap.pay`. Returns the signed query string for the caller
    /// to append to the gateway URL; nothing is sent.
    pub fn pay(&self, opts: &PayOptions) -> Result<String, AlipayError> {
        let mut biz = ParamMap::from_serializable(opts)?;
        biz.insert("product_code", product_code::QUICK_MSECURITY_PAY);

        let mut params = self.biz_params(method::TRADE_WAP_PAY, &biz, &timestamp::now())?;
        self.insert_callbacks(&mut params, opts.return_url.as_deref());
        self.sign_params(&params)
    }

    /// Desktop web payment.
    ///
    /// `alipay.trade.page.pay`. Returns the signed query string; nothing is sent.
    pub fn web_pay(&self, opts: &PayOptions) -> Result<String, AlipayError> {
        let mut biz = ParamMap::from_serializable(opts)?;
        biz.insert("product_code", product_code::FAST_INSTANT_TRADE_PAY);
        biz.insert_opt("return_url", opts.return_url.as_deref());

        let mut params = self.biz_params(method::TRADE_PAGE_PAY, &biz, &timestamp::now())?;
        self.insert_callbacks(&mut params, opts.return_url.as_deref());
        self.sign_params(&params)
    }

    /// Create a QR code for the buyer to scan.
    ///
    /// `alipay.trade.precreate`
    pub async fn pre_create(
        &self,
        opts: &PreCreateOptions,
    ) -> Result<ResponseEnvelope, AlipayError> {
        let mut params = self.biz_params(method::TRADE_PRECREATE, opts, &timestamp::now())?;
        self.insert_callbacks(&mut params, opts.return_url.as_deref());
        self.send(&params).await
    }

    /// Charge a code scanned from the buyer's app.
    ///
    /// `alipay.trade.pay`
    pub async fn qr_pay(&self, opts: &QrPayOptions) -> Result<ResponseEnvelope, AlipayError> {
        let mut params = self.biz_params(method::TRADE_PAY, opts, &timestamp::now())?;
        self.insert_callbacks(&mut params, opts.return_url.as_deref());
        self.send(&params).await
    }

    /// In-app payment.
    ///
    /// `alipay.trade.app.pay`
    pub async fn app_pay(&self, opts: &PayOptions) -> Result<ResponseEnvelope, AlipayError> {
        let mut biz = ParamMap::from_serializable(opts)?;
        biz.insert("product_code", product_code::QUICK_MSECURITY_PAY);

        let mut params = self.biz_params(method::TRADE_APP_PAY, &biz, &timestamp::now())?;
        self.insert_callbacks(&mut params, None);
        self.send(&params).await
    }

    /// Trade status, including settlement details.
    ///
    /// `alipay.trade.query`
    pub async fn query(&self, opts: &TradeQueryOptions) -> Result<ResponseEnvelope, AlipayError> {
        let mut biz = ParamMap::from_serializable(opts)?;
        biz.insert("query_options", json!(QUERY_OPTIONS));
        self.execute(method::TRADE_QUERY, &biz).await
    }

    /// Close an unpaid trade.
    ///
    /// `alipay.trade.close`
    pub async fn close(&self, opts: &CloseOptions) -> Result<ResponseEnvelope, AlipayError> {
        self.execute(method::TRADE_CLOSE, opts).await
    }

    /// Refund all or part of a paid trade.
    ///
    /// `alipay.trade.refund`
    pub async fn refund(&self, opts: &RefundOptions) -> Result<ResponseEnvelope, AlipayError> {
        self.execute(method::TRADE_REFUND, opts).await
    }

    /// Status of one refund request.
    ///
    /// `alipay.trade.fastpay.refund.query`
    pub async fn refund_query(
        &self,
        opts: &RefundQueryOptions,
    ) -> Result<ResponseEnvelope, AlipayError> {
        let mut opts = opts.clone();
        if opts.out_request_id.as_deref().map_or(true, str::is_empty) {
            opts.out_request_id = opts.out_trade_id.clone();
        }
        self.execute(method::TRADE_REFUND_QUERY, &opts).await
    }
}
