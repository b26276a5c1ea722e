use alipay::{method, AlipayError};

use crate::client::AlipayClient;
use crate::envelope::ResponseEnvelope;
use crate::model::BillDownloadOptions;

impl AlipayClient {
    /// Short-lived download URL for a reconciliation bill.
    ///
    /// `alipay.data.dataservice.bill.downloadurl.query`
    pub async fn bill_download_url_query(
        &self,
        opts: &BillDownloadOptions,
    ) -> Result<ResponseEnvelope, AlipayError> {
        self.execute(method::BILL_DOWNLOAD_URL_QUERY, opts).await
    }
}
