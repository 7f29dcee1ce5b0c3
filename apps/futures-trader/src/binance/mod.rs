//! Binance USD-M futures REST client.
//!
//! The network protocol lives entirely in this module: request signing,
//! endpoint paths, payload types and error decoding. Everything above it
//! deals in domain types only.

mod api_types;
mod client;
mod config;
mod error;
mod http;

pub use api_types::{AssetBalance, ExchangeFilter, ExchangeInfo, OrderResponse, Position, SymbolInfo};
pub use client::BinanceFuturesClient;
pub use config::{BinanceConfig, Environment};
pub use error::BinanceError;
