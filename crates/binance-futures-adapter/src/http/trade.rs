/*
[INPUT]:  Order requests, API secret for query signing
[OUTPUT]: Signed order requests and order responses
[POS]:    HTTP layer - trading endpoints (require API key + HMAC signature)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use chrono::Utc;
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::http::signature::canonical_query;
use crate::http::{FuturesClient, OrderError, Result};
use crate::types::{ApiErrorResponse, NewOrderRequest, OrderResponse, ValidatedOrder};

pub const ORDER_PATH: &str = "/fapi/v1/order";

/// A validated, timestamped and signed order that has not been sent yet
#[derive(Debug, Clone)]
pub struct SignedOrder {
    pub order: ValidatedOrder,
    /// Canonical query string covered by the signature
    pub query: String,
    pub signature: String,
    pub timestamp: i64,
    /// Endpoint URL including query and signature
    pub url: Url,
}

impl SignedOrder {
    /// Parameters as sent, minus the signature
    pub fn params(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .into_owned()
            .collect()
    }
}

impl FuturesClient {
    /// Validate, timestamp and sign an order without sending it
    pub async fn prepare(&self, request: &NewOrderRequest) -> Result<SignedOrder> {
        let order = request.validate()?;
        let timestamp = self.resolve_timestamp().await;
        self.sign_order(order, timestamp)
    }

    /// Place a new order
    ///
    /// POST /fapi/v1/order
    /// Requires: X-MBX-APIKEY header + HMAC signature
    pub async fn submit(&self, request: &NewOrderRequest) -> Result<OrderResponse> {
        let signed = match self.prepare(request).await {
            Ok(signed) => signed,
            Err(err) => {
                error!(
                    symbol = %request.symbol,
                    side = %request.side,
                    order_type = %request.order_type,
                    error_kind = err.kind(),
                    error = %err,
                    "order rejected before sending"
                );
                return Err(err);
            }
        };
        self.send_signed(&signed).await
    }

    /// Send an already signed order. No retry is attempted.
    pub async fn send_signed(&self, signed: &SignedOrder) -> Result<OrderResponse> {
        debug!(method = "POST", url = %signed.url, "sending order request");

        match self.execute(signed).await {
            Ok(response) => {
                info!(
                    symbol = %signed.order.symbol,
                    side = %signed.order.side,
                    order_type = %signed.order.order_type(),
                    params = %signed.query,
                    "order request sent"
                );
                info!(
                    order_id = %response.order_id,
                    status = %response.status,
                    response = %response.raw,
                    "order accepted"
                );
                Ok(response)
            }
            Err(err) => {
                error!(
                    symbol = %signed.order.symbol,
                    side = %signed.order.side,
                    order_type = %signed.order.order_type(),
                    params = %signed.query,
                    error_kind = err.kind(),
                    error = %err,
                    "order submission failed"
                );
                Err(err)
            }
        }
    }

    async fn execute(&self, signed: &SignedOrder) -> Result<OrderResponse> {
        let response = self
            .request(Method::POST, signed.url.clone())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body = %body, "order response received");

        if !status.is_success() {
            return Err(OrderError::from_rejection(status, &body));
        }

        let raw: Value = serde_json::from_str(&body)
            .map_err(|err| OrderError::InvalidResponse(format!("order response: {err}")))?;

        // Some gateways answer 200 with an error envelope
        if raw.get("orderId").is_none() {
            if let Ok(api) = serde_json::from_value::<ApiErrorResponse>(raw.clone()) {
                return Err(OrderError::ExchangeRejected {
                    code: api.code,
                    message: api.msg,
                });
            }
        }

        OrderResponse::from_value(raw)
            .map_err(|err| OrderError::InvalidResponse(format!("order response: {err}")))
    }

    pub(crate) fn sign_order(&self, order: ValidatedOrder, timestamp: i64) -> Result<SignedOrder> {
        let mut params = order.to_params();
        if let Some(recv_window) = self.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }
        params.push(("timestamp", timestamp.to_string()));

        let query = canonical_query(&params);
        let signature = self.signer.sign(&query);

        let mut url = self.endpoint_url(ORDER_PATH)?;
        url.set_query(Some(&format!("{query}&signature={signature}")));

        Ok(SignedOrder {
            order,
            query,
            signature,
            timestamp,
            url,
        })
    }

    async fn resolve_timestamp(&self) -> i64 {
        if !self.sync_server_time {
            return Utc::now().timestamp_millis();
        }
        match self.server_time().await {
            Ok(server_time) => server_time,
            Err(err) => {
                warn!(error = %err, "could not fetch server time, falling back to local clock");
                Utc::now().timestamp_millis()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, Credentials, FuturesClient};
    use crate::types::{NewOrderRequest, Side};
    use rust_decimal_macros::dec;

    fn offline_client(recv_window: Option<u64>) -> FuturesClient {
        let config = ClientConfig {
            recv_window,
            sync_server_time: false,
            ..ClientConfig::default()
        };
        FuturesClient::with_config(config, Credentials::new("key", "secret")).expect("client init")
    }

    #[test]
    fn test_sign_order_appends_timestamp_and_signature() {
        let client = offline_client(Some(5000));
        let order = NewOrderRequest::limit("BTCUSDT", Side::Buy, dec!(0.5), dec!(100))
            .validate()
            .unwrap();

        let signed = client.sign_order(order, 1_700_000_000_000).unwrap();

        assert_eq!(
            signed.query,
            "symbol=BTCUSDT&side=BUY&type=LIMIT&timeInForce=GTC&quantity=0.5&price=100\
             &reduceOnly=false&recvWindow=5000&timestamp=1700000000000"
        );
        assert_eq!(signed.signature, client.signer.sign(&signed.query));
        assert_eq!(
            signed.url.query(),
            Some(format!("{}&signature={}", signed.query, signed.signature).as_str())
        );
        assert_eq!(signed.url.path(), "/fapi/v1/order");
    }

    #[test]
    fn test_identical_orders_sign_identically() {
        let client = offline_client(None);
        let order = NewOrderRequest::market("BTCUSDT", Side::Sell, dec!(1))
            .validate()
            .unwrap();

        let a = client.sign_order(order.clone(), 42).unwrap();
        let b = client.sign_order(order, 42).unwrap();
        assert_eq!(a.signature, b.signature);
        assert!(!a.query.contains("recvWindow"));
    }

    #[test]
    fn test_params_roundtrip_from_query() {
        let client = offline_client(None);
        let order = NewOrderRequest::market("BTCUSDT", Side::Buy, dec!(2))
            .validate()
            .unwrap();
        let signed = client.sign_order(order, 7).unwrap();

        let params = signed.params();
        assert_eq!(params.first(), Some(&("symbol".to_string(), "BTCUSDT".to_string())));
        assert_eq!(params.last(), Some(&("timestamp".to_string(), "7".to_string())));
        assert!(params.iter().all(|(key, _)| key != "signature"));
    }

    #[tokio::test]
    async fn test_prepare_validates_first() {
        let client = offline_client(None);
        let request = NewOrderRequest::market("BTCUSDT", Side::Buy, dec!(0));
        let err = client.prepare(&request).await.unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }
}
