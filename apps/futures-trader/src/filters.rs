//! Quantity and price normalization against exchange filters.
//!
//! The exchange rejects orders whose quantity is not a multiple of the
//! symbol's `LOT_SIZE` step or whose price is off the `PRICE_FILTER` tick
//! grid. Values are rounded *down* onto the grid so an order never grows
//! past what the caller asked for, then checked against the filter minima.

use rust_decimal::Decimal;
use thiserror::Error;

/// Per-symbol order constraints extracted from the exchange info payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFilters {
    /// `LOT_SIZE` step size; quantities must be a multiple of this.
    pub step_size: Decimal,
    /// `LOT_SIZE` minimum quantity.
    pub min_qty: Decimal,
    /// `PRICE_FILTER` tick size; prices must be a multiple of this.
    pub tick_size: Decimal,
    /// `PRICE_FILTER` minimum price.
    pub min_price: Decimal,
    /// `MIN_NOTIONAL` floor on `price * quantity`, when the exchange
    /// reports one.
    pub min_notional: Option<Decimal>,
}

/// A value that cannot be normalized into an exchange-acceptable order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Quantity rounded down to zero or below.
    #[error("quantity {quantity} rounds down to nothing at step {step_size}")]
    QuantityVanished {
        /// Requested quantity.
        quantity: Decimal,
        /// Lot step size.
        step_size: Decimal,
    },

    /// Quantity below the exchange minimum after rounding.
    #[error("quantity {quantity} is below the minimum {min_qty}")]
    QuantityBelowMinimum {
        /// Quantized quantity.
        quantity: Decimal,
        /// Exchange minimum quantity.
        min_qty: Decimal,
    },

    /// Price rounded down to zero or below.
    #[error("price {price} rounds down to nothing at tick {tick_size}")]
    PriceVanished {
        /// Requested price.
        price: Decimal,
        /// Price tick size.
        tick_size: Decimal,
    },

    /// Price below the exchange minimum after rounding.
    #[error("price {price} is below the minimum {min_price}")]
    PriceBelowMinimum {
        /// Quantized price.
        price: Decimal,
        /// Exchange minimum price.
        min_price: Decimal,
    },

    /// Order value below the exchange notional floor.
    #[error("notional {notional} is below the minimum {min_notional}")]
    NotionalBelowMinimum {
        /// Quantized `price * quantity`.
        notional: Decimal,
        /// Exchange minimum notional.
        min_notional: Decimal,
    },
}

impl SymbolFilters {
    /// Round a quantity down onto the lot grid and check the minimum.
    pub fn quantize_quantity(&self, quantity: Decimal) -> Result<Decimal, FilterError> {
        let quantized = round_down_to_step(quantity, self.step_size);

        if quantized <= Decimal::ZERO {
            return Err(FilterError::QuantityVanished {
                quantity,
                step_size: self.step_size,
            });
        }
        if quantized < self.min_qty {
            return Err(FilterError::QuantityBelowMinimum {
                quantity: quantized,
                min_qty: self.min_qty,
            });
        }

        Ok(quantized)
    }

    /// Round a price down onto the tick grid and check the minimum.
    pub fn quantize_price(&self, price: Decimal) -> Result<Decimal, FilterError> {
        let quantized = round_down_to_step(price, self.tick_size);

        if quantized <= Decimal::ZERO {
            return Err(FilterError::PriceVanished {
                price,
                tick_size: self.tick_size,
            });
        }
        if quantized < self.min_price {
            return Err(FilterError::PriceBelowMinimum {
                price: quantized,
                min_price: self.min_price,
            });
        }

        Ok(quantized)
    }

    /// Check the notional floor for a priced (limit / stop-limit) order.
    ///
    /// Market orders carry no client-side price, so the exchange enforces
    /// the floor server-side in that case.
    pub fn check_notional(&self, price: Decimal, quantity: Decimal) -> Result<(), FilterError> {
        if let Some(min_notional) = self.min_notional {
            let notional = price * quantity;
            if notional < min_notional {
                return Err(FilterError::NotionalBelowMinimum {
                    notional,
                    min_notional,
                });
            }
        }
        Ok(())
    }
}

/// Round `value` down to the nearest multiple of `step`.
///
/// A non-positive step means the exchange imposed no grid; the value passes
/// through untouched.
fn round_down_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    ((value / step).floor() * step).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn btc_filters() -> SymbolFilters {
        SymbolFilters {
            step_size: dec!(0.001),
            min_qty: dec!(0.001),
            tick_size: dec!(0.10),
            min_price: dec!(556.80),
            min_notional: Some(dec!(100)),
        }
    }

    #[test]
    fn quantity_rounds_down_to_step() {
        let filters = btc_filters();
        assert_eq!(filters.quantize_quantity(dec!(0.0015)).unwrap(), dec!(0.001));
        assert_eq!(filters.quantize_quantity(dec!(0.1234)).unwrap(), dec!(0.123));
    }

    #[test]
    fn quantity_on_grid_is_unchanged() {
        let filters = btc_filters();
        assert_eq!(filters.quantize_quantity(dec!(0.005)).unwrap(), dec!(0.005));
    }

    #[test]
    fn quantization_is_idempotent() {
        let filters = btc_filters();
        let once = filters.quantize_quantity(dec!(0.7777)).unwrap();
        let twice = filters.quantize_quantity(once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn quantization_never_rounds_up() {
        let filters = btc_filters();
        for raw in [dec!(0.0019), dec!(0.001), dec!(1.9999), dec!(42.30001)] {
            let quantized = filters.quantize_quantity(raw).unwrap();
            assert!(quantized <= raw, "{quantized} > {raw}");
        }
    }

    #[test]
    fn quantity_below_step_vanishes() {
        let filters = btc_filters();
        assert!(matches!(
            filters.quantize_quantity(dec!(0.0004)),
            Err(FilterError::QuantityVanished { .. })
        ));
    }

    #[test]
    fn quantity_below_minimum_rejected() {
        let filters = SymbolFilters {
            min_qty: dec!(0.01),
            ..btc_filters()
        };
        assert!(matches!(
            filters.quantize_quantity(dec!(0.005)),
            Err(FilterError::QuantityBelowMinimum { .. })
        ));
    }

    #[test]
    fn price_rounds_down_to_tick() {
        let filters = btc_filters();
        assert_eq!(filters.quantize_price(dec!(40123.456)).unwrap(), dec!(40123.4));
        assert_eq!(filters.quantize_price(dec!(40123.40)).unwrap(), dec!(40123.4));
    }

    #[test]
    fn price_below_minimum_rejected() {
        let filters = btc_filters();
        assert!(matches!(
            filters.quantize_price(dec!(100)),
            Err(FilterError::PriceBelowMinimum { .. })
        ));
    }

    #[test]
    fn negative_price_vanishes() {
        let filters = btc_filters();
        assert!(matches!(
            filters.quantize_price(dec!(-5)),
            Err(FilterError::PriceVanished { .. })
        ));
    }

    #[test]
    fn notional_floor_enforced() {
        let filters = btc_filters();
        assert!(filters.check_notional(dec!(40000), dec!(0.003)).is_ok());
        assert!(matches!(
            filters.check_notional(dec!(40000), dec!(0.002)),
            Err(FilterError::NotionalBelowMinimum { .. })
        ));
    }

    #[test]
    fn no_notional_filter_means_no_check() {
        let filters = SymbolFilters {
            min_notional: None,
            ..btc_filters()
        };
        assert!(filters.check_notional(dec!(1), dec!(0.001)).is_ok());
    }

    #[test]
    fn zero_step_passes_value_through() {
        let filters = SymbolFilters {
            step_size: Decimal::ZERO,
            min_qty: Decimal::ZERO,
            ..btc_filters()
        };
        assert_eq!(filters.quantize_quantity(dec!(0.12345)).unwrap(), dec!(0.12345));
    }
}
