//! Client error types.

use thiserror::Error;

/// Errors from the futures client.
#[derive(Debug, Error, Clone)]
pub enum BinanceError {
    /// Network-level failure (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Missing or invalid credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// API returned an error code.
    #[error("API error {code}: {message}")]
    Api {
        /// Exchange error code (negative).
        code: i64,
        /// Error message from the exchange.
        message: String,
    },

    /// Order rejected by exchange-side validation.
    #[error("order rejected ({code}): {message}")]
    OrderRejected {
        /// Exchange error code.
        code: i64,
        /// Rejection reason.
        message: String,
    },

    /// Order does not exist on the exchange.
    #[error("order not found: {order_id}")]
    OrderNotFound {
        /// The order ID that was not found.
        order_id: i64,
    },

    /// Symbol is not listed on the exchange.
    #[error("unknown symbol: {symbol}")]
    UnknownSymbol {
        /// The symbol that was not found in exchange info.
        symbol: String,
    },
}

impl BinanceError {
    /// Map an exchange error payload to a typed error.
    ///
    /// Rejection-family codes: -1013 (filter failure), -1111 (precision),
    /// -2010/-2011 (new order / cancel rejected), -4164 (notional).
    /// -2013 is "order does not exist".
    #[must_use]
    pub fn from_api_code(code: i64, message: String, order_id: Option<i64>) -> Self {
        match code {
            -2013 => Self::OrderNotFound {
                order_id: order_id.unwrap_or(0),
            },
            -1013 | -1111 | -2010 | -2011 | -4164 => Self::OrderRejected { code, message },
            -2014 | -2015 | -1022 => Self::AuthenticationFailed,
            _ => Self::Api { code, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_not_found_code() {
        let err = BinanceError::from_api_code(-2013, "Order does not exist.".to_string(), Some(7));
        assert!(matches!(err, BinanceError::OrderNotFound { order_id: 7 }));
    }

    #[test]
    fn rejection_family_codes() {
        for code in [-1013, -1111, -2010, -2011, -4164] {
            let err = BinanceError::from_api_code(code, "rejected".to_string(), None);
            assert!(matches!(err, BinanceError::OrderRejected { .. }), "{code}");
        }
    }

    #[test]
    fn auth_family_codes() {
        for code in [-2014, -2015, -1022] {
            let err = BinanceError::from_api_code(code, "bad key".to_string(), None);
            assert!(matches!(err, BinanceError::AuthenticationFailed), "{code}");
        }
    }

    #[test]
    fn unknown_code_is_generic_api_error() {
        let err = BinanceError::from_api_code(-1121, "Invalid symbol.".to_string(), None);
        assert!(matches!(err, BinanceError::Api { code: -1121, .. }));
    }
}
