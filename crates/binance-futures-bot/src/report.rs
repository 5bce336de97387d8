/*
[INPUT]:  Order responses and signed orders from the adapter
[OUTPUT]: Human-readable summaries for stdout
[POS]:    Presentation layer - final CLI output
[UPDATE]: When the printed result format changes
*/

use std::fmt::Write as _;

use binance_futures_adapter::{OrderResponse, SignedOrder};
use serde_json::Value;

const RULE: &str = "--------------------";

/// One `key: value` line per field of the exchange response.
pub fn render_order_result(response: &OrderResponse) -> String {
    let mut out = String::from("\n--- ORDER RESULT ---\n");
    match &response.raw {
        Value::Object(fields) => {
            for (key, value) in fields {
                let _ = writeln!(out, "{key}: {}", display_value(value));
            }
        }
        _ => {
            let _ = writeln!(out, "orderId: {}", response.order_id);
            let _ = writeln!(out, "status: {}", response.status);
        }
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// The request that would have been sent, for `--dry-run`.
pub fn render_dry_run(signed: &SignedOrder) -> String {
    let mut out = String::from("\n--- DRY RUN (not sent) ---\n");
    for (key, value) in signed.params() {
        let _ = writeln!(out, "{key}: {value}");
    }
    let _ = writeln!(out, "signature: {}", signed.signature);
    let _ = writeln!(out, "url: POST {}", signed.url);
    out.push_str(RULE);
    out.push('\n');
    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
