//! High-level futures client.

use rust_decimal::Decimal;

use crate::domain::{OrderRequest, OrderType, Symbol};
use crate::filters::SymbolFilters;

use super::api_types::{AssetBalance, ExchangeInfo, OrderResponse, Position};
use super::config::{BinanceConfig, Environment};
use super::error::BinanceError;
use super::http::BinanceHttpClient;

/// Client for the USD-M futures REST API.
#[derive(Debug, Clone)]
pub struct BinanceFuturesClient {
    http: BinanceHttpClient,
    environment: Environment,
}

impl BinanceFuturesClient {
    /// Create a new client.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        let http = BinanceHttpClient::new(config)?;
        Ok(Self {
            http,
            environment: config.environment,
        })
    }

    /// The environment this client talks to.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Fetch exchange info for all listed symbols.
    pub async fn exchange_info(&self) -> Result<ExchangeInfo, BinanceError> {
        self.http.get_public("/fapi/v1/exchangeInfo").await
    }

    /// Fetch the order constraints for one symbol.
    ///
    /// Fails with [`BinanceError::UnknownSymbol`] if the exchange does not
    /// list it.
    pub async fn symbol_filters(&self, symbol: &Symbol) -> Result<SymbolFilters, BinanceError> {
        let info = self.exchange_info().await?;
        info.symbol(symbol.as_str())
            .map(super::api_types::SymbolInfo::to_symbol_filters)
            .ok_or_else(|| BinanceError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }

    /// Place an order (`POST /fapi/v1/order`).
    ///
    /// The caller is expected to pass already-quantized values; the request
    /// is serialized exactly as given.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<OrderResponse, BinanceError> {
        let mut params: Vec<(&str, String)> = vec![
            ("symbol", request.symbol.to_string()),
            ("side", request.side.to_string()),
            ("type", wire_order_type(request.order_type).to_string()),
            ("quantity", decimal_param(request.quantity)),
        ];

        if let Some(price) = request.price {
            params.push(("price", decimal_param(price)));
        }
        if let Some(stop_price) = request.stop_price {
            params.push(("stopPrice", decimal_param(stop_price)));
        }
        if request.order_type != OrderType::Market {
            params.push(("timeInForce", request.time_in_force.to_string()));
        }
        if request.reduce_only {
            params.push(("reduceOnly", "true".to_string()));
        }
        params.push(("newClientOrderId", request.client_order_id.clone()));

        self.http.post_signed("/fapi/v1/order", params).await
    }

    /// Cancel an order (`DELETE /fapi/v1/order`).
    pub async fn cancel_order(
        &self,
        symbol: &Symbol,
        order_id: i64,
    ) -> Result<OrderResponse, BinanceError> {
        let params = vec![
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ];
        self.http.delete_signed("/fapi/v1/order", params).await
    }

    /// Query one order (`GET /fapi/v1/order`).
    pub async fn get_order(
        &self,
        symbol: &Symbol,
        order_id: i64,
    ) -> Result<OrderResponse, BinanceError> {
        let params = vec![
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ];
        self.http.get_signed("/fapi/v1/order", params).await
    }

    /// List open orders, optionally for one symbol (`GET /fapi/v1/openOrders`).
    pub async fn open_orders(
        &self,
        symbol: Option<&Symbol>,
    ) -> Result<Vec<OrderResponse>, BinanceError> {
        let params = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        self.http.get_signed("/fapi/v1/openOrders", params).await
    }

    /// Fetch account balances (`GET /fapi/v2/balance`).
    pub async fn account_balances(&self) -> Result<Vec<AssetBalance>, BinanceError> {
        self.http.get_signed("/fapi/v2/balance", Vec::new()).await
    }

    /// Fetch positions, optionally for one symbol (`GET /fapi/v2/positionRisk`).
    pub async fn position_risk(
        &self,
        symbol: Option<&Symbol>,
    ) -> Result<Vec<Position>, BinanceError> {
        let params = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        self.http.get_signed("/fapi/v2/positionRisk", params).await
    }
}

/// Map the domain order type to the wire value.
///
/// The exchange expresses a stop-limit order as `STOP` with both `price`
/// and `stopPrice` set.
const fn wire_order_type(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::Market => "MARKET",
        OrderType::Limit => "LIMIT",
        OrderType::StopLimit => "STOP",
    }
}

/// Render a decimal without trailing zeros.
fn decimal_param(value: Decimal) -> String {
    value.normalize().to_string()
}
