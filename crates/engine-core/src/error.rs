//! Error types for the core matching engine.
//!
//! The engine API is infallible for normal operations: callers validate
//! orders before submitting them, and a violated precondition is a
//! programming error that panics. What remains is reporting broken
//! internal invariants from [`OrderBook::check_invariants`], which tests
//! and the load harness use as a consistency audit.
//!
//! [`OrderBook::check_invariants`]: crate::OrderBook::check_invariants

use thiserror::Error;

use crate::ids::OrderId;
use crate::order::OrderStatus;
use crate::price::Price;
use crate::side::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{side} level {price} holds order {order_id} priced at {order_price}")]
    WrongLevel {
        side: Side,
        price: Price,
        order_id: OrderId,
        order_price: Price,
    },

    #[error("{side} level {price} is empty")]
    EmptyLevel { side: Side, price: Price },

    #[error("{side} level {price} is out of arrival order at sequence {sequence}")]
    SequenceOrder { side: Side, price: Price, sequence: u64 },

    #[error("resting order {order_id} has no remaining quantity")]
    EmptyOrder { order_id: OrderId },

    #[error("resting order {order_id} has status {status:?} with {remaining} of {original} remaining")]
    StatusMismatch {
        order_id: OrderId,
        status: OrderStatus,
        remaining: u64,
        original: u64,
    },

    #[error("book is crossed: best bid {bid} >= best ask {ask}")]
    Crossed { bid: Price, ask: Price },
}
