//! Futures API request and response types.
//!
//! These map directly to the exchange's REST payloads. Numeric fields
//! arrive as strings and are decoded into `Decimal`.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{OrderSide, OrderStatus};
use crate::filters::SymbolFilters;

// ============================================================================
// Exchange info
// ============================================================================

/// Exchange info response (`GET /fapi/v1/exchangeInfo`).
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    /// All listed symbols.
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    /// Look up a symbol by name.
    #[must_use]
    pub fn symbol(&self, name: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|s| s.symbol == name)
    }
}

/// Per-symbol section of the exchange info payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolInfo {
    /// Symbol name (e.g. `BTCUSDT`).
    pub symbol: String,
    /// Trading status (`TRADING` when live).
    #[serde(default)]
    pub status: String,
    /// Order constraints for this symbol.
    #[serde(default)]
    pub filters: Vec<ExchangeFilter>,
}

impl SymbolInfo {
    /// Collapse the filter list into the constraints used for quantization.
    ///
    /// Missing filters fall back to zero (no grid, no minimum), matching an
    /// exchange that imposes no constraint of that kind.
    #[must_use]
    pub fn to_symbol_filters(&self) -> SymbolFilters {
        let mut result = SymbolFilters {
            step_size: Decimal::ZERO,
            min_qty: Decimal::ZERO,
            tick_size: Decimal::ZERO,
            min_price: Decimal::ZERO,
            min_notional: None,
        };

        for filter in &self.filters {
            match filter {
                ExchangeFilter::LotSize {
                    step_size, min_qty, ..
                } => {
                    result.step_size = *step_size;
                    result.min_qty = *min_qty;
                }
                ExchangeFilter::PriceFilter {
                    tick_size,
                    min_price,
                    ..
                } => {
                    result.tick_size = *tick_size;
                    result.min_price = *min_price;
                }
                ExchangeFilter::MinNotional { notional } => {
                    result.min_notional = Some(*notional);
                }
                ExchangeFilter::Other => {}
            }
        }

        result
    }
}

/// One entry of a symbol's `filters` array, tagged by `filterType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "filterType")]
pub enum ExchangeFilter {
    /// Quantity step constraint.
    #[serde(rename = "LOT_SIZE")]
    LotSize {
        /// Quantity grid step.
        #[serde(rename = "stepSize", with = "rust_decimal::serde::str")]
        step_size: Decimal,
        /// Minimum order quantity.
        #[serde(rename = "minQty", with = "rust_decimal::serde::str")]
        min_qty: Decimal,
        /// Maximum order quantity.
        #[serde(rename = "maxQty", with = "rust_decimal::serde::str")]
        max_qty: Decimal,
    },

    /// Price tick constraint.
    #[serde(rename = "PRICE_FILTER")]
    PriceFilter {
        /// Price grid step.
        #[serde(rename = "tickSize", with = "rust_decimal::serde::str")]
        tick_size: Decimal,
        /// Minimum order price.
        #[serde(rename = "minPrice", with = "rust_decimal::serde::str")]
        min_price: Decimal,
        /// Maximum order price.
        #[serde(rename = "maxPrice", with = "rust_decimal::serde::str")]
        max_price: Decimal,
    },

    /// Minimum order value constraint.
    #[serde(rename = "MIN_NOTIONAL")]
    MinNotional {
        /// Floor on `price * quantity`.
        #[serde(with = "rust_decimal::serde::str")]
        notional: Decimal,
    },

    /// Filter types this client does not act on.
    #[serde(other)]
    Other,
}

// ============================================================================
// Orders
// ============================================================================

/// Order response (`POST`/`GET`/`DELETE /fapi/v1/order`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Exchange-assigned order ID.
    pub order_id: i64,
    /// Client order ID echoed back.
    pub client_order_id: String,
    /// Symbol.
    pub symbol: String,
    /// Order status.
    pub status: OrderStatus,
    /// Order side.
    pub side: OrderSide,
    /// Order type as reported on the wire (`STOP` for stop-limit).
    #[serde(rename = "type")]
    pub order_type: String,
    /// Order price (zero for market orders).
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Original quantity.
    #[serde(rename = "origQty", with = "rust_decimal::serde::str")]
    pub orig_qty: Decimal,
    /// Filled quantity.
    #[serde(rename = "executedQty", with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
    /// Average fill price.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub avg_price: Option<Decimal>,
    /// Stop trigger price.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub stop_price: Option<Decimal>,
    /// Time in force.
    #[serde(default)]
    pub time_in_force: Option<String>,
    /// Reduce-only flag.
    #[serde(default)]
    pub reduce_only: bool,
    /// Last update time (epoch millis).
    #[serde(default)]
    pub update_time: Option<i64>,
}

// ============================================================================
// Account
// ============================================================================

/// One asset balance (`GET /fapi/v2/balance`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    /// Asset name (e.g. `USDT`).
    pub asset: String,
    /// Wallet balance.
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    /// Balance available for new orders.
    #[serde(with = "rust_decimal::serde::str")]
    pub available_balance: Decimal,
}

/// One position (`GET /fapi/v2/positionRisk`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Symbol.
    pub symbol: String,
    /// Signed position size (negative = short).
    #[serde(rename = "positionAmt", with = "rust_decimal::serde::str")]
    pub position_amt: Decimal,
    /// Average entry price.
    #[serde(with = "rust_decimal::serde::str")]
    pub entry_price: Decimal,
    /// Unrealized profit.
    #[serde(rename = "unRealizedProfit", with = "rust_decimal::serde::str")]
    pub unrealized_profit: Decimal,
}

impl Position {
    /// Whether any exposure is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.position_amt.is_zero()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error payload returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Exchange error code (negative).
    pub code: i64,
    /// Human-readable message.
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EXCHANGE_INFO: &str = r#"{
        "symbols": [
            {
                "symbol": "BTCUSDT",
                "status": "TRADING",
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "556.80", "maxPrice": "4529764", "tickSize": "0.10"},
                    {"filterType": "LOT_SIZE", "minQty": "0.001", "maxQty": "1000", "stepSize": "0.001"},
                    {"filterType": "MIN_NOTIONAL", "notional": "100"},
                    {"filterType": "PERCENT_PRICE", "multiplierUp": "1.0500", "multiplierDown": "0.9500", "multiplierDecimal": "4"}
                ]
            }
        ]
    }"#;

    #[test]
    fn exchange_info_filters_decode() {
        let info: ExchangeInfo = serde_json::from_str(EXCHANGE_INFO).unwrap();
        let symbol = info.symbol("BTCUSDT").unwrap();
        assert_eq!(symbol.status, "TRADING");

        let filters = symbol.to_symbol_filters();
        assert_eq!(filters.step_size, dec!(0.001));
        assert_eq!(filters.min_qty, dec!(0.001));
        assert_eq!(filters.tick_size, dec!(0.10));
        assert_eq!(filters.min_price, dec!(556.80));
        assert_eq!(filters.min_notional, Some(dec!(100)));
    }

    #[test]
    fn unknown_filter_types_are_ignored() {
        let info: ExchangeInfo = serde_json::from_str(EXCHANGE_INFO).unwrap();
        let symbol = info.symbol("BTCUSDT").unwrap();
        assert_eq!(symbol.filters.len(), 4);
        assert!(symbol
            .filters
            .iter()
            .any(|f| matches!(f, ExchangeFilter::Other)));
    }

    #[test]
    fn unknown_symbol_lookup() {
        let info: ExchangeInfo = serde_json::from_str(EXCHANGE_INFO).unwrap();
        assert!(info.symbol("DOGEUSDT").is_none());
    }

    #[test]
    fn order_response_decodes() {
        let body = r#"{
            "orderId": 4055021,
            "clientOrderId": "ft-abc",
            "symbol": "BTCUSDT",
            "status": "NEW",
            "side": "BUY",
            "type": "LIMIT",
            "price": "40000.0",
            "origQty": "0.001",
            "executedQty": "0",
            "avgPrice": "0.00000",
            "stopPrice": "0",
            "timeInForce": "GTC",
            "reduceOnly": false,
            "updateTime": 1625097600000
        }"#;
        let order: OrderResponse = serde_json::from_str(body).unwrap();
        assert_eq!(order.order_id, 4_055_021);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.price, dec!(40000.0));
        assert_eq!(order.orig_qty, dec!(0.001));
    }

    #[test]
    fn order_response_tolerates_missing_optionals() {
        let body = r#"{
            "orderId": 1,
            "clientOrderId": "ft-x",
            "symbol": "BTCUSDT",
            "status": "FILLED",
            "side": "SELL",
            "type": "MARKET",
            "price": "0",
            "origQty": "0.5",
            "executedQty": "0.5"
        }"#;
        let order: OrderResponse = serde_json::from_str(body).unwrap();
        assert!(order.avg_price.is_none());
        assert!(order.time_in_force.is_none());
        assert!(!order.reduce_only);
    }

    #[test]
    fn balance_decodes() {
        let body = r#"[{"asset": "USDT", "balance": "15000.00", "availableBalance": "12000.50"}]"#;
        let balances: Vec<AssetBalance> = serde_json::from_str(body).unwrap();
        assert_eq!(balances[0].asset, "USDT");
        assert_eq!(balances[0].available_balance, dec!(12000.50));
    }

    #[test]
    fn position_decodes_and_reports_exposure() {
        let body = r#"[{"symbol": "BTCUSDT", "positionAmt": "-0.100", "entryPrice": "41000.0", "unRealizedProfit": "12.34"}]"#;
        let positions: Vec<Position> = serde_json::from_str(body).unwrap();
        assert!(positions[0].is_open());
        assert_eq!(positions[0].position_amt, dec!(-0.100));

        let flat = r#"[{"symbol": "BTCUSDT", "positionAmt": "0", "entryPrice": "0.0", "unRealizedProfit": "0.0"}]"#;
        let positions: Vec<Position> = serde_json::from_str(flat).unwrap();
        assert!(!positions[0].is_open());
    }

    #[test]
    fn api_error_decodes() {
        let err: ApiErrorResponse =
            serde_json::from_str(r#"{"code": -1121, "msg": "Invalid symbol."}"#).unwrap();
        assert_eq!(err.code, -1121);
    }
}
