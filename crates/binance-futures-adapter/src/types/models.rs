/*
[INPUT]:  Validated order fields
[OUTPUT]: Order variants and the ordered request parameters for the wire
[POS]:    Data layer - validated order model
[UPDATE]: When order variants or parameter encoding change
*/

use rust_decimal::Decimal;

use super::enums::{OrderType, Side, TimeInForce};

/// Fields that only exist for some order types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Market,
    Limit {
        price: Decimal,
        time_in_force: TimeInForce,
    },
    StopLimit {
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
    },
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::StopLimit { .. } => OrderType::StopLimit,
        }
    }
}

/// An order that passed validation. Only this form is ever encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub symbol: String,
    pub side: Side,
    pub quantity: Decimal,
    pub kind: OrderKind,
    pub reduce_only: bool,
}

impl ValidatedOrder {
    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    /// Order parameters in wire order, without `recvWindow`, `timestamp` or
    /// `signature`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.as_str().to_string()),
            ("type", self.order_type().wire_type().to_string()),
        ];

        match self.kind {
            OrderKind::Market => {
                params.push(("quantity", format_decimal(self.quantity)));
            }
            OrderKind::Limit {
                price,
                time_in_force,
            } => {
                params.push(("timeInForce", time_in_force.as_str().to_string()));
                params.push(("quantity", format_decimal(self.quantity)));
                params.push(("price", format_decimal(price)));
            }
            OrderKind::StopLimit {
                price,
                stop_price,
                time_in_force,
            } => {
                params.push(("timeInForce", time_in_force.as_str().to_string()));
                params.push(("quantity", format_decimal(self.quantity)));
                params.push(("price", format_decimal(price)));
                params.push(("stopPrice", format_decimal(stop_price)));
            }
        }

        params.push(("reduceOnly", self.reduce_only.to_string()));
        params
    }
}

/// Plain notation, trailing zeros stripped (`0.0010` -> `0.001`).
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
