//! Order request model and its value objects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Symbol;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order, executes at the current price.
    Market,
    /// Limit order at a fixed price.
    Limit,
    /// Limit order armed once the stop price is crossed.
    StopLimit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
            Self::StopLimit => write!(f, "STOP_LIMIT"),
        }
    }
}

/// Time in force for resting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Good till canceled.
    Gtc,
    /// Immediate or cancel.
    Ioc,
    /// Fill or kill.
    Fok,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gtc => write!(f, "GTC"),
            Self::Ioc => write!(f, "IOC"),
            Self::Fok => write!(f, "FOK"),
        }
    }
}

/// Order status as reported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted, not yet filled.
    New,
    /// Partially filled.
    PartiallyFilled,
    /// Completely filled.
    Filled,
    /// Canceled.
    Canceled,
    /// Rejected by the exchange.
    Rejected,
    /// Expired without filling.
    Expired,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// Validation failure for an order request, detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    /// Quantity must be strictly positive.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    /// Price must be strictly positive.
    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    /// Stop price must be strictly positive.
    #[error("stop price must be positive, got {0}")]
    NonPositiveStopPrice(Decimal),

    /// A limit or stop-limit order needs a price.
    #[error("{0} order requires a price")]
    MissingPrice(OrderType),

    /// A stop-limit order needs a stop price.
    #[error("{0} order requires a stop price")]
    MissingStopPrice(OrderType),
}

/// A single order request.
///
/// Built through [`OrderRequest::market`], [`OrderRequest::limit`] or
/// [`OrderRequest::stop_limit`] so type/price combinations stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Quantity in base asset units.
    pub quantity: Decimal,
    /// Limit price (limit and stop-limit orders).
    pub price: Option<Decimal>,
    /// Stop trigger price (stop-limit orders).
    pub stop_price: Option<Decimal>,
    /// Time in force (ignored for market orders).
    pub time_in_force: TimeInForce,
    /// Only reduce an existing position, never open or extend one.
    pub reduce_only: bool,
    /// Client-assigned order ID, echoed back by the exchange.
    pub client_order_id: String,
}

impl OrderRequest {
    /// Create a market order request.
    #[must_use]
    pub fn market(symbol: Symbol, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: TimeInForce::Gtc,
            reduce_only: false,
            client_order_id: new_client_order_id(),
        }
    }

    /// Create a limit order request.
    #[must_use]
    pub fn limit(symbol: Symbol, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            stop_price: None,
            time_in_force: TimeInForce::Gtc,
            reduce_only: false,
            client_order_id: new_client_order_id(),
        }
    }

    /// Create a stop-limit order request.
    #[must_use]
    pub fn stop_limit(
        symbol: Symbol,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::StopLimit,
            quantity,
            price: Some(price),
            stop_price: Some(stop_price),
            time_in_force: TimeInForce::Gtc,
            reduce_only: false,
            client_order_id: new_client_order_id(),
        }
    }

    /// Set time in force.
    #[must_use]
    pub const fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    /// Mark the order reduce-only.
    #[must_use]
    pub const fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    /// Check field-level invariants.
    ///
    /// Rejects non-positive values and type/price mismatches before anything
    /// touches the network.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.quantity <= Decimal::ZERO {
            return Err(OrderValidationError::NonPositiveQuantity(self.quantity));
        }

        match self.order_type {
            OrderType::Market => {}
            OrderType::Limit | OrderType::StopLimit => {
                let price = self
                    .price
                    .ok_or(OrderValidationError::MissingPrice(self.order_type))?;
                if price <= Decimal::ZERO {
                    return Err(OrderValidationError::NonPositivePrice(price));
                }
            }
        }

        if self.order_type == OrderType::StopLimit {
            let stop = self
                .stop_price
                .ok_or(OrderValidationError::MissingStopPrice(self.order_type))?;
            if stop <= Decimal::ZERO {
                return Err(OrderValidationError::NonPositiveStopPrice(stop));
            }
        }

        Ok(())
    }
}

/// Generate a fresh client order ID.
fn new_client_order_id() -> String {
    format!("ft-{}", Uuid::new_v4().simple())
}
