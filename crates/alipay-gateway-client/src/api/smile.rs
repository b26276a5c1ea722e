//! Face-payment ("smile to pay") kiosk operations.

use alipay::timestamp;
use alipay::{method, AlipayError, ParamMap};

use crate::client::AlipayClient;
use crate::envelope::ResponseEnvelope;
use crate::model::{FtokenQueryOptions, SmileInitOptions};

impl AlipayClient {
    /// Initialize a face-payment session on a device.
    ///
    /// `zoloz.authentication.smilepay.initialize`. The device metadata travels
    /// as a top-level `zimmetainfo` JSON field; there is no `biz_content`.
    pub async fn smile_init(
        &self,
        opts: &SmileInitOptions,
    ) -> Result<ResponseEnvelope, AlipayError> {
        let mut params = self.common_params(method::SMILEPAY_INITIALIZE, &timestamp::now());
        params.insert("zimmetainfo", serde_json::to_string(opts)?);
        self.send(&params).await
    }

    /// Register a vending machine for face payment.
    ///
    /// `ant.merchant.expand.automat.apply.upload`. The fields vary by
    /// machine type, so they are passed through as-is.
    pub async fn smile_register(&self, info: &ParamMap) -> Result<ResponseEnvelope, AlipayError> {
        let params = self.biz_params(method::AUTOMAT_APPLY_UPLOAD, info, &timestamp::now())?;
        self.send(&params).await
    }

    /// Update a registered vending machine.
    ///
    /// `ant.merchant.expand.automat.apply.modify`
    pub async fn smile_update(&self, info: &ParamMap) -> Result<ResponseEnvelope, AlipayError> {
        let params = self.biz_params(method::AUTOMAT_APPLY_MODIFY, info, &timestamp::now())?;
        self.send(&params).await
    }

    /// Result of a face authentication.
    ///
    /// `zoloz.authentication.customer.ftoken.query`
    pub async fn query_ftoken(
        &self,
        opts: &FtokenQueryOptions,
    ) -> Result<ResponseEnvelope, AlipayError> {
        let params = self.biz_params(method::FTOKEN_QUERY, opts, &timestamp::now())?;
        self.send(&params).await
    }
}
