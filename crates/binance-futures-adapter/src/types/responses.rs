/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order identifier as returned by the exchange.
///
/// Futures endpoints return an integer; the string form is accepted so a
/// proxy or a different API version does not break decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Numeric(id) => write!(f, "{id}"),
            OrderId::Text(id) => f.write_str(id),
        }
    }
}

/// Result of a successful order submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_decimal_lenient")]
    #[serde(serialize_with = "rust_decimal::serde::str_option::serialize")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_decimal_lenient")]
    #[serde(serialize_with = "rust_decimal::serde::str_option::serialize")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_decimal_lenient")]
    #[serde(serialize_with = "rust_decimal::serde::str_option::serialize")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_decimal_lenient")]
    #[serde(serialize_with = "rust_decimal::serde::str_option::serialize")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_decimal_lenient")]
    #[serde(serialize_with = "rust_decimal::serde::str_option::serialize")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_qty: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
    /// Full decoded payload, kept for logging and display
    #[serde(skip)]
    pub raw: Value,
}

impl OrderResponse {
    /// Decode an order payload, keeping the raw JSON alongside.
    pub fn from_value(raw: Value) -> serde_json::Result<Self> {
        let mut response: OrderResponse = serde_json::from_value(raw.clone())?;
        response.raw = raw;
        Ok(response)
    }
}

/// Error body returned by the exchange on rejected requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}

/// GET /fapi/v1/time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTimeResponse {
    pub server_time: i64,
}

mod serde_helpers {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    /// Echo fields never fail the decode; `raw` keeps whatever was sent.
    pub fn deserialize_decimal_lenient<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let decimal = match &value {
            Value::String(raw) => Decimal::from_str(raw.trim()).ok(),
            Value::Number(number) => {
                let raw = number.to_string();
                Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .ok()
            }
            _ => None,
        };
        Ok(decimal)
    }
}
