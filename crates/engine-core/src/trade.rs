//! Executed fills.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{OrderId, TradeId};
use crate::order::Order;
use crate::price::{Price, Quantity};
use crate::side::Side;

/// One matched fill between a buy order and a sell order.
///
/// Trades are created once by the matching loop, appended to the book's
/// trade log and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "trade_id")]
    pub id: TradeId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,

    /// Always the resting (maker) order's price.
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: DateTime<Utc>,

    /// Side of the incoming order that caused the fill.
    pub taker_side: Side,
}

impl Trade {
    /// Build the trade for `quantity` units between an incoming `taker`
    /// and a resting `maker`.
    pub(crate) fn between(taker: &Order, maker: &Order, quantity: Quantity, at: DateTime<Utc>) -> Self {
        let (buy_order_id, sell_order_id) = match taker.side {
            Side::Buy => (taker.id, maker.id),
            Side::Sell => (maker.id, taker.id),
        };

        Trade {
            id: TradeId::new(),
            buy_order_id,
            sell_order_id,
            price: maker.price,
            quantity,
            timestamp: at,
            taker_side: taker.side,
        }
    }

    /// Whether `order_id` is one of the two sides of this trade.
    pub fn involves(&self, order_id: OrderId) -> bool {
        self.buy_order_id == order_id || self.sell_order_id == order_id
    }
}
