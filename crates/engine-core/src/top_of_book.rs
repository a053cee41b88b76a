//! Read-only views of book state returned by the query operations.
//!
//! These are small owned values so a caller can take one under the read
//! lock and inspect it after the lock is gone.

use serde::{Deserialize, Serialize};

use crate::order::Order;
use crate::price::{Price, Quantity};

/// Best bid and best ask.
///
/// Each side is independently optional: a book with only bids reports a
/// bid and no ask, which is different from an empty book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestPrices {
    pub bid: Option<Price>,
    pub ask: Option<Price>,
}

impl BestPrices {
    pub fn new(bid: Option<Price>, ask: Option<Price>) -> Self {
        BestPrices { bid, ask }
    }

    /// `false` only when both sides are empty.
    pub fn present(&self) -> bool {
        self.bid.is_some() || self.ask.is_some()
    }

    /// Both sides present and best bid at or above best ask.
    pub fn is_crossed(&self) -> bool {
        matches!((self.bid, self.ask), (Some(b), Some(a)) if b >= a)
    }

    /// `ask - bid` when both sides are present, widened so any two
    /// prices fit.
    pub fn spread(&self) -> Option<i128> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => Some(i128::from(a.minor_units()) - i128::from(b.minor_units())),
            _ => None,
        }
    }
}

/// Aggregated quantity at one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Price,
    pub quantity: Quantity,
    pub orders: usize,
}

/// Top `n` price levels per side, best first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepthSnapshot {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

/// Every resting order, both sides, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub symbol: String,
    pub bids: Vec<Order>,
    pub asks: Vec<Order>,
}

/// Counters for monitoring book growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookStats {
    pub bid_orders: usize,
    pub ask_orders: usize,
    pub bid_levels: usize,
    pub ask_levels: usize,
    pub trades: usize,
    pub orders_submitted: u64,
}
