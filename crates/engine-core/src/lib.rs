//! engine-core
//!
//! Pure matching engine logic for one symbol:
//! - order / trade data model with fixed-point prices
//! - single-symbol order book with price-time priority matching
//! - a readers-writer guarded handle for concurrent submit and query

pub mod error;
pub mod ids;
pub mod order;
pub mod order_book;
pub mod order_type;
pub mod price;
pub mod shared_book;
pub mod side;
pub mod top_of_book;
pub mod trade;

pub use error::InvariantViolation;
pub use ids::{OrderId, TradeId};
pub use order::{Order, OrderStatus};
pub use order_book::{Execution, OrderBook};
pub use order_type::OrderType;
pub use price::{Price, Quantity};
pub use shared_book::SharedOrderBook;
pub use side::Side;
pub use top_of_book::{BestPrices, BookSnapshot, BookStats, DepthSnapshot, PriceLevel};
pub use trade::Trade;
