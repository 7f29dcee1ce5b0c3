//! Command-line interface.
//!
//! Flags mirror the exchange's order fields. Order argument combinations
//! are checked here, before anything touches the network.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::domain::{
    OrderRequest, OrderSide, OrderType, OrderValidationError, Symbol, TimeInForce,
};

/// Binance USD-M futures testnet order placement.
#[derive(Debug, Parser)]
#[command(name = "futures-trader", version, about, long_about = None)]
pub struct Cli {
    /// API key (falls back to BINANCE_API_KEY).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API secret (falls back to BINANCE_API_SECRET).
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Trade against the production exchange instead of the testnet.
    #[arg(long, global = true)]
    pub mainnet: bool,

    /// Order journal file.
    #[arg(long, global = true, default_value = "futures-trader.log")]
    pub journal: PathBuf,

    /// Subcommand; omit for the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One exchange action per invocation.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Place an order.
    Order(OrderArgs),
    /// Show account balances.
    Balance,
    /// List open orders.
    OpenOrders {
        /// Restrict to one symbol.
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Cancel an order.
    Cancel {
        /// Symbol of the order.
        #[arg(long)]
        symbol: String,
        /// Exchange-assigned order ID.
        #[arg(long)]
        order_id: i64,
    },
    /// Show one order's status.
    Status {
        /// Symbol of the order.
        #[arg(long)]
        symbol: String,
        /// Exchange-assigned order ID.
        #[arg(long)]
        order_id: i64,
    },
    /// Show the open position for a symbol.
    Position {
        /// Symbol to inspect.
        #[arg(long)]
        symbol: String,
    },
    /// Close open positions with reduce-only market orders.
    Close {
        /// Restrict to one symbol; omit to close everything.
        #[arg(long)]
        symbol: Option<String>,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Arguments for the `order` subcommand.
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Trading pair (e.g. BTCUSDT).
    #[arg(long)]
    pub symbol: String,

    /// Order side.
    #[arg(long, value_enum, ignore_case = true)]
    pub side: SideArg,

    /// Order type.
    #[arg(long = "type", value_enum, ignore_case = true)]
    pub order_type: TypeArg,

    /// Quantity in base asset units.
    #[arg(long)]
    pub quantity: Decimal,

    /// Limit price (limit and stop-limit orders).
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Stop trigger price (stop-limit orders).
    #[arg(long)]
    pub stop_price: Option<Decimal>,

    /// Time in force.
    #[arg(long, value_enum, ignore_case = true, default_value_t = TifArg::Gtc)]
    pub time_in_force: TifArg,

    /// Only reduce an existing position.
    #[arg(long)]
    pub reduce_only: bool,
}

impl OrderArgs {
    /// Build a validated order request from the flags.
    ///
    /// Rejects malformed combinations (limit without price, stop-limit
    /// without stop price, non-positive values) without any network call.
    pub fn to_request(&self) -> Result<OrderRequest, OrderValidationError> {
        let symbol = Symbol::new(&self.symbol);
        let side = OrderSide::from(self.side);

        let mut request = match self.order_type {
            TypeArg::Market => OrderRequest::market(symbol, side, self.quantity),
            TypeArg::Limit => {
                let price = self
                    .price
                    .ok_or(OrderValidationError::MissingPrice(OrderType::Limit))?;
                OrderRequest::limit(symbol, side, self.quantity, price)
            }
            TypeArg::StopLimit => {
                let price = self
                    .price
                    .ok_or(OrderValidationError::MissingPrice(OrderType::StopLimit))?;
                let stop_price = self
                    .stop_price
                    .ok_or(OrderValidationError::MissingStopPrice(OrderType::StopLimit))?;
                OrderRequest::stop_limit(symbol, side, self.quantity, price, stop_price)
            }
        };

        request = request.with_time_in_force(self.time_in_force.into());
        if self.reduce_only {
            request = request.reduce_only();
        }

        request.validate()?;
        Ok(request)
    }
}

/// Order side flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    /// Buy.
    Buy,
    /// Sell.
    Sell,
}

impl From<SideArg> for OrderSide {
    fn from(value: SideArg) -> Self {
        match value {
            SideArg::Buy => Self::Buy,
            SideArg::Sell => Self::Sell,
        }
    }
}

/// Order type flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    /// Market order.
    Market,
    /// Limit order.
    Limit,
    /// Stop-limit order.
    StopLimit,
}

/// Time in force flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TifArg {
    /// Good till canceled.
    Gtc,
    /// Immediate or cancel.
    Ioc,
    /// Fill or kill.
    Fok,
}

impl From<TifArg> for TimeInForce {
    fn from(value: TifArg) -> Self {
        match value {
            TifArg::Gtc => Self::Gtc,
            TifArg::Ioc => Self::Ioc,
            TifArg::Fok => Self::Fok,
        }
    }
}
