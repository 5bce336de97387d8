/*
[INPUT]:  Command-line arguments and credential environment variables
[OUTPUT]: Parsed CLI options and order requests for the adapter
[POS]:    CLI layer - argument surface for the binary
[UPDATE]: When changing CLI flags or subcommands
*/

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use binance_futures_adapter::{NewOrderRequest, Side, TimeInForce};

#[derive(Parser, Debug)]
#[command(
    name = "binance-futures-bot",
    version,
    about = "Place orders on the Binance USDT-M futures testnet"
)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    #[arg(long = "api-key", env = "BINANCE_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
    #[arg(long = "api-secret", env = "BINANCE_API_SECRET", hide_env_values = true, global = true)]
    pub api_secret: Option<String>,
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,
    /// Console log filter, e.g. "info" or "debug"
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
    /// Validate and sign the order, print it, and exit without sending
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum OrderCommand {
    /// Place a market order
    Market(CommonOrderArgs),
    /// Place a limit order
    Limit(LimitArgs),
    /// Place a stop-limit order (stop price + limit price)
    #[command(name = "stop-limit", alias = "stop_limit")]
    StopLimit(StopLimitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CommonOrderArgs {
    /// Trading pair, e.g. BTCUSDT
    #[arg(long)]
    pub symbol: String,
    /// BUY or SELL (case-insensitive)
    #[arg(long)]
    pub side: Side,
    /// Quantity in contract units
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Decimal,
    #[arg(long = "reduce-only")]
    pub reduce_only: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    #[command(flatten)]
    pub common: CommonOrderArgs,
    #[arg(long, allow_hyphen_values = true)]
    pub price: Decimal,
    #[arg(long = "time-in-force", default_value = "GTC")]
    pub time_in_force: TimeInForce,
}

#[derive(Args, Debug, Clone)]
pub struct StopLimitArgs {
    #[command(flatten)]
    pub common: CommonOrderArgs,
    #[arg(long = "stop-price", allow_hyphen_values = true)]
    pub stop_price: Decimal,
    #[arg(long, allow_hyphen_values = true)]
    pub price: Decimal,
    #[arg(long = "time-in-force", default_value = "GTC")]
    pub time_in_force: TimeInForce,
}

impl OrderCommand {
    /// Build the adapter request; validation is left to the client.
    pub fn to_request(&self) -> NewOrderRequest {
        match self {
            OrderCommand::Market(args) => {
                NewOrderRequest::market(args.symbol.to_uppercase(), args.side, args.quantity)
                    .with_reduce_only(args.reduce_only)
            }
            OrderCommand::Limit(args) => NewOrderRequest::limit(
                args.common.symbol.to_uppercase(),
                args.common.side,
                args.common.quantity,
                args.price,
            )
            .with_time_in_force(args.time_in_force)
            .with_reduce_only(args.common.reduce_only),
            OrderCommand::StopLimit(args) => NewOrderRequest::stop_limit(
                args.common.symbol.to_uppercase(),
                args.common.side,
                args.common.quantity,
                args.stop_price,
                args.price,
            )
            .with_time_in_force(args.time_in_force)
            .with_reduce_only(args.common.reduce_only),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binance_futures_adapter::OrderType;
    use std::str::FromStr;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("binance-futures-bot").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_market_command() {
        let cli = parse(&["market", "--symbol", "btcusdt", "--side", "buy", "--quantity", "0.001"]);
        let request = cli.command.to_request();

        assert_eq!(request.symbol, "BTCUSDT");
        assert_eq!(request.side, Side::Buy);
        assert_eq!(request.order_type, OrderType::Market);
        assert_eq!(request.quantity, Decimal::from_str("0.001").unwrap());
        assert_eq!(request.price, None);
        assert_eq!(request.time_in_force, None);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_limit_defaults_to_gtc() {
        let cli = parse(&[
            "limit", "--symbol", "BTCUSDT", "--side", "SELL", "--quantity", "1", "--price", "69000",
        ]);
        let request = cli.command.to_request();

        assert_eq!(request.order_type, OrderType::Limit);
        assert_eq!(request.price, Some(Decimal::from(69000)));
        assert_eq!(request.time_in_force, Some(TimeInForce::Gtc));
    }

    #[test]
    fn test_stop_limit_with_globals_after_subcommand() {
        let cli = parse(&[
            "stop-limit",
            "--symbol",
            "ETHUSDT",
            "--side",
            "buy",
            "--quantity",
            "2",
            "--stop-price",
            "3010",
            "--price",
            "3000",
            "--time-in-force",
            "ioc",
            "--reduce-only",
            "--dry-run",
            "--api-key",
            "k",
        ]);
        let request = cli.command.to_request();

        assert_eq!(request.order_type, OrderType::StopLimit);
        assert_eq!(request.stop_price, Some(Decimal::from(3010)));
        assert_eq!(request.time_in_force, Some(TimeInForce::Ioc));
        assert!(request.reduce_only);
        assert!(cli.dry_run);
        assert_eq!(cli.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_non_positive_quantity_reaches_validation() {
        let cli = parse(&["market", "--symbol", "BTCUSDT", "--side", "BUY", "--quantity", "-1"]);
        let err = cli.command.to_request().validate().unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn test_rejects_unknown_side() {
        let result = Cli::try_parse_from([
            "binance-futures-bot",
            "market",
            "--symbol",
            "BTCUSDT",
            "--side",
            "HOLD",
            "--quantity",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
