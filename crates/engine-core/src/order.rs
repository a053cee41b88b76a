//! Order representation and lifecycle.
//!
//! An [`Order`] is built by the caller (already validated), handed to the
//! book by value, and from then on owned by the book until it is fully
//! filled. Its `quantity` is the *remaining* quantity and only ever
//! decreases; `original_quantity` keeps what was asked for so fills can be
//! reconciled against trades.
//!
//! Status follows a small state machine:
//!
//! ```text
//! Pending ──fill──▶ PartiallyFilled ──fill──▶ Executed
//!    │                                          ▲
//!    └──────────────── fill (complete) ─────────┘
//! Pending ──▶ Canceled   (representable; nothing in the engine triggers it)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::OrderId;
use crate::order_type::OrderType;
use crate::price::{Price, Quantity};
use crate::side::Side;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    PartiallyFilled,
    Executed,
    Canceled,
}

impl OrderStatus {
    /// Executed and Canceled orders never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Executed | OrderStatus::Canceled)
    }

    /// Status of an order that has just had some quantity filled and has
    /// `remaining` left.
    pub fn after_fill(remaining: Quantity) -> Self {
        if remaining == 0 {
            OrderStatus::Executed
        } else {
            OrderStatus::PartiallyFilled
        }
    }
}

/// A single limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "order_id")]
    pub id: OrderId,
    pub symbol: String,

    pub price: Price,
    /// Remaining unfilled quantity.
    pub quantity: Quantity,
    pub original_quantity: Quantity,
    pub order_type: OrderType,
    pub side: Side,
    pub status: OrderStatus,

    /// Arrival counter assigned by the book; breaks ties at equal price.
    #[serde(skip)]
    pub sequence: u64,

    #[serde(rename = "placedAt")]
    pub placed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// A fresh, pending limit order with a new id, placed now.
    pub fn limit(symbol: impl Into<String>, side: Side, price: Price, quantity: Quantity) -> Self {
        Order {
            id: OrderId::new(),
            symbol: symbol.into(),
            price,
            quantity,
            original_quantity: quantity,
            order_type: OrderType::Limit,
            side,
            status: OrderStatus::Pending,
            sequence: 0,
            placed_at: Utc::now(),
            executed_at: None,
        }
    }

    /// Returns `true` if nothing is left to fill.
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.original_quantity - self.quantity
    }

    /// Fill the order by up to `qty` units, updating its status.
    ///
    /// Returns the quantity actually filled (`<= qty` and `<= quantity`).
    pub fn fill(&mut self, qty: Quantity, at: DateTime<Utc>) -> Quantity {
        let filled = qty.min(self.quantity);
        if filled == 0 {
            return 0;
        }
        self.quantity -= filled;
        self.status = OrderStatus::after_fill(self.quantity);
        if self.status == OrderStatus::Executed {
            self.executed_at = Some(at);
        }
        filled
    }

    /// Whether this order's limit price crosses a resting order at `resting`.
    ///
    /// Equal prices cross.
    pub fn crosses(&self, resting: Price) -> bool {
        match self.side {
            Side::Buy => self.price >= resting,
            Side::Sell => self.price <= resting,
        }
    }
}
