// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! futures-trader - Binance USD-M futures testnet order CLI
//!
//! Places and manages single orders on the futures testnet: parameters are
//! collected from flags or interactive prompts, normalized against the
//! symbol's exchange filters (lot step, price tick, notional floor), then
//! submitted with one synchronous REST call. Every submitted or failed
//! order is recorded as one line in an append-only journal.
//!
//! # Layout
//!
//! - [`domain`]: order request model and value objects
//! - [`filters`]: quantization against exchange filters
//! - [`binance`]: REST client (signing, endpoints, payloads)
//! - [`trader`]: validate -> normalize -> submit -> journal dispatch
//! - [`journal`]: append-only order journal
//! - [`cli`] / [`console`]: flag and interactive surfaces

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Exchange REST client.
pub mod binance;

/// Command-line argument definitions.
pub mod cli;

/// Interactive menu and console reporting.
pub mod console;

/// Order request model.
pub mod domain;

/// Quantity/price normalization against exchange filters.
pub mod filters;

/// Append-only order journal.
pub mod journal;

/// Order dispatch.
pub mod trader;

pub use binance::{BinanceConfig, BinanceError, BinanceFuturesClient, Environment};
pub use domain::{OrderRequest, OrderSide, OrderStatus, OrderType, Symbol, TimeInForce};
pub use filters::{FilterError, SymbolFilters};
pub use journal::{JournalEvent, OrderJournal};
pub use trader::{Trader, TraderError};
