//! futures-trader binary
//!
//! Places and manages orders on the Binance USD-M futures testnet.
//!
//! # Usage
//!
//! ```bash
//! # one-shot order
//! futures-trader order --symbol BTCUSDT --side buy --type limit \
//!     --quantity 0.01 --price 40000
//!
//! # interactive menu
//! futures-trader
//! ```
//!
//! # Environment Variables
//!
//! ## Required (unless passed as flags)
//! - `BINANCE_API_KEY`: API key
//! - `BINANCE_API_SECRET`: API secret
//!
//! ## Optional
//! - `BINANCE_ENV`: TESTNET | MAINNET (default: TESTNET)
//! - `RUST_LOG`: Log level (default: info)

use anyhow::Context;
use clap::Parser;

use futures_trader::binance::{BinanceConfig, BinanceFuturesClient, Environment};
use futures_trader::cli::{Cli, Command};
use futures_trader::console;
use futures_trader::domain::Symbol;
use futures_trader::journal::OrderJournal;
use futures_trader::trader::Trader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = parse_config(&cli)?;

    tracing::info!(
        environment = %config.environment,
        journal = %cli.journal.display(),
        "futures-trader starting"
    );

    let client = BinanceFuturesClient::new(&config).context("failed to create exchange client")?;
    let journal = OrderJournal::new(cli.journal.clone());
    let trader = Trader::new(client, journal);

    match cli.command {
        Some(command) => run_command(&trader, command).await,
        None => console::run(&trader).await,
    }
}

/// Load .env from the current directory, if present.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Initialize the tracing subscriber with environment filter.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "futures_trader=info"
                    .parse()
                    .expect("static directive 'futures_trader=info' is valid"),
            ),
        )
        .init();
}

/// Resolve client configuration from flags and environment variables.
fn parse_config(cli: &Cli) -> anyhow::Result<BinanceConfig> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("BINANCE_API_KEY").ok())
        .unwrap_or_default();
    let api_secret = cli
        .api_secret
        .clone()
        .or_else(|| std::env::var("BINANCE_API_SECRET").ok())
        .unwrap_or_default();

    if api_key.is_empty() || api_secret.is_empty() {
        anyhow::bail!(
            "API credentials are required: pass --api-key/--api-secret or set \
             BINANCE_API_KEY and BINANCE_API_SECRET"
        );
    }

    let env_from_var = std::env::var("BINANCE_ENV")
        .map(|v| v.to_uppercase())
        .unwrap_or_default();
    let environment = if cli.mainnet || env_from_var == "MAINNET" {
        Environment::Mainnet
    } else {
        Environment::Testnet
    };

    Ok(BinanceConfig::new(api_key, api_secret, environment))
}

/// Run one subcommand to completion.
async fn run_command(trader: &Trader, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Order(args) => {
            let request = args.to_request()?;
            let response = trader.submit(request).await?;
            println!("Order placed.");
            console::print_order(&response);
        }
        Command::Balance => {
            let balances = trader.account_balances().await?;
            console::print_balances(&balances);
        }
        Command::OpenOrders { symbol } => {
            let symbol = symbol.map(|s| Symbol::new(&s));
            let orders = trader.open_orders(symbol.as_ref()).await?;
            console::print_open_orders(&orders);
        }
        Command::Cancel { symbol, order_id } => {
            trader.cancel_order(&Symbol::new(&symbol), order_id).await?;
            println!("Order {order_id} canceled");
        }
        Command::Status { symbol, order_id } => {
            let response = trader.order_status(&Symbol::new(&symbol), order_id).await?;
            console::print_order(&response);
        }
        Command::Position { symbol } => {
            let symbol = Symbol::new(&symbol);
            match trader.position(&symbol).await? {
                Some(position) => console::print_position(&position),
                None => println!("No open position for {symbol}"),
            }
        }
        Command::Close { symbol, yes } => {
            if !yes {
                anyhow::bail!("refusing to close positions without --yes");
            }
            let symbol = symbol.map(|s| Symbol::new(&s));
            let closed = trader.close_all_positions(symbol.as_ref()).await?;
            println!("Closed {} position(s)", closed.len());
        }
    }
    Ok(())
}
