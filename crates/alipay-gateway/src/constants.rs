/// Production gateway endpoint.
pub const GATEWAY_URL: &str = "https://openapi.alipay.com/gateway.do";

/// Sandbox gateway endpoint. Same protocol, test merchants only.
pub const SANDBOX_GATEWAY_URL: &str = "https://openapi.alipaydev.com/gateway.do";

/// Value of the `format` envelope field.
pub const FORMAT_JSON: &str = "JSON";

/// Value of the `charset` envelope field.
pub const CHARSET_UTF8: &str = "utf-8";

/// Value of the `version` envelope field.
pub const API_VERSION: &str = "1.0";

/// `code` returned by the gateway when a call succeeded.
pub const SUCCESS_CODE: &str = "10000";

/// Name of the signature field, excluded from the signed content.
pub const SIGN_FIELD: &str = "sign";

/// Name of the signature-type field, excluded from verified content.
pub const SIGN_TYPE_FIELD: &str = "sign_type";

/// Gateway method names.
pub mod method {
    pub const TRADE_WAP_PAY: &str = "alipay.trade.wap.pay";
    pub const TRADE_PAGE_PAY: &str = "alipay.trade.page.pay";
    pub const TRADE_PRECREATE: &str = "alipay.trade.precreate";
    pub const TRADE_PAY: &str = "alipay.trade.pay";
    pub const TRADE_APP_PAY: &str = "alipay.trade.app.pay";
    pub const TRADE_QUERY: &str = "alipay.trade.query";
    pub const TRADE_CLOSE: &str = "alipay.trade.close";
    pub const TRADE_REFUND: &str = "alipay.trade.refund";
    pub const TRADE_REFUND_QUERY: &str = "alipay.trade.fastpay.refund.query";
    pub const TRADE_ORDER_SETTLE: &str = "alipay.trade.order.settle";
    pub const TRADE_ROYALTY_BIND: &str = "alipay.trade.royalty.relation.bind";
    pub const BILL_DOWNLOAD_URL_QUERY: &str = "alipay.data.dataservice.bill.downloadurl.query";
    pub const SMILEPAY_INITIALIZE: &str = "zoloz.authentication.smilepay.initialize";
    pub const FTOKEN_QUERY: &str = "zoloz.authentication.customer.ftoken.query";
    pub const AUTOMAT_APPLY_UPLOAD: &str = "ant.merchant.expand.automat.apply.upload";
    pub const AUTOMAT_APPLY_MODIFY: &str = "ant.merchant.expand.automat.apply.modify";
}

/// `product_code` values sent with payment methods.
pub mod product_code {
    pub const QUICK_MSECURITY_PAY: &str = "QUICK_MSECURITY_PAY";
    pub const FAST_INSTANT_TRADE_PAY: &str = "FAST_INSTANT_TRADE_PAY";
}

/// Select the gateway endpoint for the given environment.
pub fn gateway_url(sandbox: bool) -> &'static str {
    if sandbox {
        SANDBOX_GATEWAY_URL
    } else {
        GATEWAY_URL
    }
}

/// Name of the JSON node that carries the result of `method`.
///
/// `alipay.trade.query` answers under `alipay_trade_query_response`.
pub fn response_node(method: &str) -> String {
    format!("{}_response", method.replace('.', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_url_selection() {
        assert_eq!(gateway_url(false), GATEWAY_URL);
        assert_eq!(gateway_url(true), SANDBOX_GATEWAY_URL);
    }

    #[test]
    fn test_response_node_name() {
        assert_eq!(
            response_node(method::TRADE_QUERY),
            "alipay_trade_query_response"
        );
        assert_eq!(
            response_node(method::BILL_DOWNLOAD_URL_QUERY),
            "alipay_data_dataservice_bill_downloadurl_query_response"
        );
    }
}
