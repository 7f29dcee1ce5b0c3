//! Domain types for order placement.
//!
//! The order model is transient: a request is validated, quantized and
//! submitted, then discarded. Nothing here outlives a single call.

mod order;
mod symbol;

pub use order::{
    OrderRequest, OrderSide, OrderStatus, OrderType, OrderValidationError, TimeInForce,
};
pub use symbol::Symbol;
