use alipay::{method, AlipayError};
use chrono::Utc;

use crate::client::AlipayClient;
use crate::envelope::ResponseEnvelope;
use crate::model::{BindContent, BindOptions, SettleContent, SettleOptions};

impl AlipayClient {
    /// Split part of a paid trade to a bound receiver.
    ///
    /// `alipay.trade.order.settle`
    pub async fn settle(&self, opts: &SettleOptions) -> Result<ResponseEnvelope, AlipayError> {
        self.execute(method::TRADE_ORDER_SETTLE, &SettleContent::from(opts))
            .await
    }

    /// Bind a receiver account for later [`settle`](Self::settle) calls.
    ///
    /// `alipay.trade.royalty.relation.bind`. Without an explicit
    /// `out_request_no` the current Unix time in milliseconds is used.
    pub async fn bind(&self, opts: &BindOptions) -> Result<ResponseEnvelope, AlipayError> {
        let content = BindContent::new(opts, || Utc::now().timestamp_millis().to_string());
        self.execute(method::TRADE_ROYALTY_BIND, &content).await
    }
}
