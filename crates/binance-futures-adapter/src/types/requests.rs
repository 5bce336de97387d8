/*
[INPUT]:  Caller-supplied order intent (flat, optional fields)
[OUTPUT]: Validated orders ready for parameter encoding
[POS]:    Data layer - request types and validation
[UPDATE]: When order fields or validation rules change
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderType, Side, TimeInForce};
use super::models::{OrderKind, ValidatedOrder};
use crate::http::{OrderError, Result};

/// One order intent as supplied by a caller.
///
/// Fields that only apply to some order types are optional here; `validate`
/// checks that exactly the fields required by `order_type` are present and
/// turns the request into a [`ValidatedOrder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default)]
    pub reduce_only: bool,
}

impl NewOrderRequest {
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: None,
            reduce_only: false,
        }
    }

    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            ..Self::market(symbol, side, quantity)
        }
    }

    pub fn stop_limit(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            order_type: OrderType::StopLimit,
            price: Some(price),
            stop_price: Some(stop_price),
            ..Self::market(symbol, side, quantity)
        }
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn with_reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    /// Check field presence and positivity for the requested order type.
    pub fn validate(&self) -> Result<ValidatedOrder> {
        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(OrderError::validation("symbol", "must not be empty"));
        }
        // Delivery contracts carry an expiry suffix, e.g. BTCUSDT_250926
        if !symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(OrderError::validation(
                "symbol",
                format!("must contain only letters, digits or '_', got {symbol:?}"),
            ));
        }
        require_positive("quantity", self.quantity)?;

        let kind = match self.order_type {
            OrderType::Market => {
                reject_present("price", self.price.is_some(), self.order_type)?;
                reject_present("stop_price", self.stop_price.is_some(), self.order_type)?;
                reject_present("time_in_force", self.time_in_force.is_some(), self.order_type)?;
                OrderKind::Market
            }
            OrderType::Limit => {
                let price = require_field("price", self.price, self.order_type)?;
                reject_present("stop_price", self.stop_price.is_some(), self.order_type)?;
                OrderKind::Limit {
                    price,
                    time_in_force: self.time_in_force.unwrap_or_default(),
                }
            }
            OrderType::StopLimit => {
                let price = require_field("price", self.price, self.order_type)?;
                let stop_price = require_field("stop_price", self.stop_price, self.order_type)?;
                OrderKind::StopLimit {
                    price,
                    stop_price,
                    time_in_force: self.time_in_force.unwrap_or_default(),
                }
            }
        };

        Ok(ValidatedOrder {
            symbol: symbol.to_ascii_uppercase(),
            side: self.side,
            quantity: self.quantity,
            kind,
            reduce_only: self.reduce_only,
        })
    }
}

fn require_positive(field: &'static str, value: Decimal) -> Result<Decimal> {
    if value <= Decimal::ZERO {
        return Err(OrderError::validation(
            field,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(value)
}

fn require_field(
    field: &'static str,
    value: Option<Decimal>,
    order_type: OrderType,
) -> Result<Decimal> {
    match value {
        Some(value) => require_positive(field, value),
        None => Err(OrderError::validation(
            field,
            format!("required for {order_type} orders"),
        )),
    }
}

fn reject_present(field: &'static str, present: bool, order_type: OrderType) -> Result<()> {
    if present {
        return Err(OrderError::validation(
            field,
            format!("not allowed for {order_type} orders"),
        ));
    }
    Ok(())
}
