/*
[INPUT]:  BINANCE_API_KEY / BINANCE_API_SECRET environment variables
[OUTPUT]: A signed testnet limit order, sent only when SEND_ORDER=1
[POS]:    Examples - order placement
[UPDATE]: When the client or order API changes
*/

use binance_futures_adapter::*;
use rust_decimal::Decimal;

/// Example: sign (and optionally send) a far-from-market limit order
///
/// Order endpoints require:
/// 1. API key in the X-MBX-APIKEY header
/// 2. HMAC-SHA256 signature over the query string
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("binance_futures_adapter=debug")
        .init();

    println!("=== Binance Futures Testnet Order Example ===\n");

    let (Ok(api_key), Ok(api_secret)) = (
        std::env::var("BINANCE_API_KEY"),
        std::env::var("BINANCE_API_SECRET"),
    ) else {
        eprintln!("Set BINANCE_API_KEY and BINANCE_API_SECRET (testnet keys)");
        return;
    };

    let client = match FuturesClient::new(Credentials::new(api_key, api_secret)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}", client.base_url());

    let request = NewOrderRequest::limit("BTCUSDT", Side::Buy, Decimal::new(1, 3), Decimal::from(20_000))
        .with_time_in_force(TimeInForce::Gtc);

    let signed = match client.prepare(&request).await {
        Ok(signed) => signed,
        Err(e) => {
            eprintln!("✗ Order invalid: {}", e);
            return;
        }
    };
    println!("✓ Signed query: {}", signed.query);
    println!("  signature: {}", signed.signature);

    if std::env::var("SEND_ORDER").as_deref() != Ok("1") {
        println!("\nSet SEND_ORDER=1 to submit it to the testnet.");
        return;
    }

    match client.send_signed(&signed).await {
        Ok(response) => println!("✓ Order {} status {}", response.order_id, response.status),
        Err(e) => eprintln!("✗ Order failed ({}): {}", e.kind(), e),
    }
}
