/*
[INPUT]:  CLI arguments, optional YAML configuration file, environment
[OUTPUT]: One order placed on the futures testnet, result printed to stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the startup flow
*/

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use binance_futures_adapter::FuturesClient;
use binance_futures_bot::report::{render_dry_run, render_order_result};
use binance_futures_bot::{BotConfig, Cli, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = BotConfig::load(args.config_path.as_deref())?;
    config.apply_cli(&args);
    let _log_guard = init_tracing(&config.log_level, &config.log_file)?;

    let request = args.command.to_request();
    info!(
        symbol = %request.symbol,
        side = %request.side,
        order_type = %request.order_type,
        quantity = %request.quantity,
        base_url = %config.base_url,
        dry_run = args.dry_run,
        "placing order"
    );

    let credentials = config.take_credentials()?;
    let client = FuturesClient::with_config(config.client_config(), credentials)
        .context("build futures client")?;

    if args.dry_run {
        let signed = match client.prepare(&request).await {
            Ok(signed) => signed,
            Err(err) => {
                error!(error_kind = err.kind(), error = %err, "dry-run order is invalid");
                return Err(err).context("prepare order");
            }
        };
        info!(params = %signed.query, "dry-run requested; order not sent");
        print!("{}", render_dry_run(&signed));
        return Ok(());
    }

    let response = client.submit(&request).await.context("place order")?;
    print!("{}", render_order_result(&response));
    Ok(())
}
