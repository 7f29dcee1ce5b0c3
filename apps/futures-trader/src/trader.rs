//! Order normalization and dispatch.
//!
//! The one effective component of this program: take a validated request,
//! quantize it against the symbol's exchange filters, submit it with a
//! single call, and journal the outcome. Strictly sequential — one request
//! in flight at a time, no retries.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::binance::{AssetBalance, BinanceError, BinanceFuturesClient, OrderResponse, Position};
use crate::domain::{OrderRequest, OrderSide, OrderValidationError, Symbol, TimeInForce};
use crate::filters::FilterError;
use crate::journal::{JournalEvent, OrderJournal};

/// Errors surfaced to the user for a failed operation.
#[derive(Debug, Error)]
pub enum TraderError {
    /// Request rejected before any network call.
    #[error("invalid order: {0}")]
    Validation(#[from] OrderValidationError),

    /// Request rejected by filter normalization.
    #[error("order does not satisfy exchange filters: {0}")]
    Filter(#[from] FilterError),

    /// Exchange or transport failure.
    #[error(transparent)]
    Exchange(#[from] BinanceError),
}

/// Places and manages orders against the exchange.
pub struct Trader {
    client: BinanceFuturesClient,
    journal: OrderJournal,
}

impl Trader {
    /// Create a trader from a client and a journal.
    #[must_use]
    pub const fn new(client: BinanceFuturesClient, journal: OrderJournal) -> Self {
        Self { client, journal }
    }

    /// Place a market order.
    pub async fn place_market_order(
        &self,
        symbol: Symbol,
        side: OrderSide,
        quantity: Decimal,
        reduce_only: bool,
    ) -> Result<OrderResponse, TraderError> {
        let mut request = OrderRequest::market(symbol, side, quantity);
        if reduce_only {
            request = request.reduce_only();
        }
        self.submit(request).await
    }

    /// Place a limit order.
    pub async fn place_limit_order(
        &self,
        symbol: Symbol,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
        reduce_only: bool,
    ) -> Result<OrderResponse, TraderError> {
        let mut request =
            OrderRequest::limit(symbol, side, quantity, price).with_time_in_force(time_in_force);
        if reduce_only {
            request = request.reduce_only();
        }
        self.submit(request).await
    }

    /// Place a stop-limit order.
    pub async fn place_stop_limit_order(
        &self,
        symbol: Symbol,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
        reduce_only: bool,
    ) -> Result<OrderResponse, TraderError> {
        let mut request = OrderRequest::stop_limit(symbol, side, quantity, price, stop_price)
            .with_time_in_force(time_in_force);
        if reduce_only {
            request = request.reduce_only();
        }
        self.submit(request).await
    }

    /// Validate, normalize and submit one order request.
    ///
    /// Exactly one journal line is written whether the submission succeeds
    /// or fails. Validation and normalization failures happen before any
    /// order reaches the network; the filter fetch itself is a network call
    /// and its failure aborts the operation without a journal entry, since
    /// no order was attempted.
    pub async fn submit(&self, request: OrderRequest) -> Result<OrderResponse, TraderError> {
        request.validate()?;

        let filters = self
            .client
            .symbol_filters(&request.symbol)
            .await
            .map_err(|e| {
                tracing::error!(symbol = %request.symbol, error = %e, "Failed to fetch symbol filters");
                e
            })?;

        let normalized = match Self::normalize(&request, &filters) {
            Ok(normalized) => normalized,
            Err(e) => {
                tracing::warn!(
                    symbol = %request.symbol,
                    quantity = %request.quantity,
                    error = %e,
                    "Order rejected by filter normalization"
                );
                self.journal_event(&JournalEvent::Failed {
                    request,
                    reason: e.to_string(),
                });
                return Err(e.into());
            }
        };

        if self.client.environment().is_mainnet() {
            tracing::warn!(
                client_order_id = %normalized.client_order_id,
                symbol = %normalized.symbol,
                "Submitting MAINNET order - this will trade real funds"
            );
        }

        tracing::info!(
            client_order_id = %normalized.client_order_id,
            symbol = %normalized.symbol,
            side = %normalized.side,
            order_type = %normalized.order_type,
            quantity = %normalized.quantity,
            price = ?normalized.price,
            stop_price = ?normalized.stop_price,
            "Submitting order"
        );

        match self.client.place_order(&normalized).await {
            Ok(response) => {
                tracing::info!(
                    client_order_id = %normalized.client_order_id,
                    order_id = response.order_id,
                    status = %response.status,
                    "Order submitted"
                );
                self.journal_event(&JournalEvent::Submitted {
                    request: normalized,
                    order_id: response.order_id,
                    status: response.status.to_string(),
                });
                Ok(response)
            }
            Err(e) => {
                tracing::error!(
                    client_order_id = %normalized.client_order_id,
                    symbol = %normalized.symbol,
                    error = %e,
                    "Order submission failed"
                );
                self.journal_event(&JournalEvent::Failed {
                    request: normalized,
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Quantize quantity and prices onto the symbol's grids.
    fn normalize(
        request: &OrderRequest,
        filters: &crate::filters::SymbolFilters,
    ) -> Result<OrderRequest, FilterError> {
        let mut normalized = request.clone();
        normalized.quantity = filters.quantize_quantity(request.quantity)?;

        if let Some(price) = request.price {
            let price = filters.quantize_price(price)?;
            filters.check_notional(price, normalized.quantity)?;
            normalized.price = Some(price);
        }
        if let Some(stop_price) = request.stop_price {
            normalized.stop_price = Some(filters.quantize_price(stop_price)?);
        }

        Ok(normalized)
    }

    /// Cancel an order, journaling the outcome.
    pub async fn cancel_order(
        &self,
        symbol: &Symbol,
        order_id: i64,
    ) -> Result<OrderResponse, TraderError> {
        tracing::info!(%symbol, order_id, "Canceling order");
        match self.client.cancel_order(symbol, order_id).await {
            Ok(response) => {
                self.journal_event(&JournalEvent::Canceled {
                    symbol: symbol.to_string(),
                    order_id,
                });
                Ok(response)
            }
            Err(e) => {
                tracing::error!(%symbol, order_id, error = %e, "Cancel failed");
                self.journal_event(&JournalEvent::CancelFailed {
                    symbol: symbol.to_string(),
                    order_id,
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Query one order's status.
    pub async fn order_status(
        &self,
        symbol: &Symbol,
        order_id: i64,
    ) -> Result<OrderResponse, TraderError> {
        Ok(self.client.get_order(symbol, order_id).await?)
    }

    /// List open orders, optionally for one symbol.
    pub async fn open_orders(
        &self,
        symbol: Option<&Symbol>,
    ) -> Result<Vec<OrderResponse>, TraderError> {
        Ok(self.client.open_orders(symbol).await?)
    }

    /// Fetch account balances with non-zero wallet balance.
    pub async fn account_balances(&self) -> Result<Vec<AssetBalance>, TraderError> {
        let balances = self.client.account_balances().await?;
        Ok(balances
            .into_iter()
            .filter(|b| b.balance > Decimal::ZERO)
            .collect())
    }

    /// Fetch the open position for a symbol, if any.
    pub async fn position(&self, symbol: &Symbol) -> Result<Option<Position>, TraderError> {
        let positions = self.client.position_risk(Some(symbol)).await?;
        Ok(positions.into_iter().find(Position::is_open))
    }

    /// Flatten open positions with reduce-only market orders.
    ///
    /// Failures on individual positions are logged and journaled by the
    /// submit path; the loop continues to the remaining positions.
    pub async fn close_all_positions(
        &self,
        symbol: Option<&Symbol>,
    ) -> Result<Vec<OrderResponse>, TraderError> {
        let positions = self.client.position_risk(symbol).await?;
        let mut closed = Vec::new();

        for position in positions.iter().filter(|p| p.is_open()) {
            let side = if position.position_amt > Decimal::ZERO {
                OrderSide::Sell
            } else {
                OrderSide::Buy
            };
            let quantity = position.position_amt.abs();

            match self
                .place_market_order(Symbol::new(&position.symbol), side, quantity, true)
                .await
            {
                Ok(response) => {
                    tracing::info!(
                        symbol = %position.symbol,
                        %side,
                        %quantity,
                        "Closed position"
                    );
                    closed.push(response);
                }
                Err(e) => {
                    tracing::error!(
                        symbol = %position.symbol,
                        error = %e,
                        "Failed to close position"
                    );
                }
            }
        }

        Ok(closed)
    }

    /// Write one journal line; a journal I/O failure is logged, not fatal.
    fn journal_event(&self, event: &JournalEvent) {
        if let Err(e) = self.journal.record(event) {
            tracing::error!(path = %self.journal.path().display(), error = %e, "Failed to write journal entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SymbolFilters;
    use rust_decimal_macros::dec;

    fn filters() -> SymbolFilters {
        SymbolFilters {
            step_size: dec!(0.001),
            min_qty: dec!(0.001),
            tick_size: dec!(0.10),
            min_price: dec!(0.10),
            min_notional: Some(dec!(100)),
        }
    }

    #[test]
    fn normalize_quantizes_quantity_and_prices() {
        let request = OrderRequest::stop_limit(
            Symbol::new("BTCUSDT"),
            OrderSide::Sell,
            dec!(0.12345),
            dec!(39000.07),
            dec!(39500.19),
        );

        let normalized = Trader::normalize(&request, &filters()).unwrap();
        assert_eq!(normalized.quantity, dec!(0.123));
        assert_eq!(normalized.price, Some(dec!(39000)));
        assert_eq!(normalized.stop_price, Some(dec!(39500.1)));
        // Untouched fields carry through.
        assert_eq!(normalized.client_order_id, request.client_order_id);
        assert_eq!(normalized.side, request.side);
    }

    #[test]
    fn normalize_is_idempotent() {
        let request = OrderRequest::limit(
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            dec!(0.7777),
            dec!(41234.56),
        );

        let once = Trader::normalize(&request, &filters()).unwrap();
        let twice = Trader::normalize(&once, &filters()).unwrap();
        assert_eq!(once.quantity, twice.quantity);
        assert_eq!(once.price, twice.price);
    }

    #[test]
    fn normalize_rejects_vanishing_quantity() {
        let request = OrderRequest::market(Symbol::new("BTCUSDT"), OrderSide::Buy, dec!(0.0004));
        assert!(matches!(
            Trader::normalize(&request, &filters()),
            Err(FilterError::QuantityVanished { .. })
        ));
    }

    #[test]
    fn normalize_rejects_small_notional() {
        // 0.001 * 40000 = 40, below the 100 floor.
        let request = OrderRequest::limit(
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            dec!(0.001),
            dec!(40000),
        );
        assert!(matches!(
            Trader::normalize(&request, &filters()),
            Err(FilterError::NotionalBelowMinimum { .. })
        ));
    }

    #[test]
    fn normalize_skips_notional_for_market_orders() {
        let request = OrderRequest::market(Symbol::new("BTCUSDT"), OrderSide::Buy, dec!(0.001));
        assert!(Trader::normalize(&request, &filters()).is_ok());
    }
}
