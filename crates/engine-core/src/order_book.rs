//! Single-symbol order book with price-time priority.
//!
//! - One instance per symbol.
//! - Bids: best = highest price.
//! - Asks: best = lowest price.
//! - FIFO (time priority) within each price level, keyed on the arrival
//!   sequence the book stamps on every submitted order.
//! - Every fill is appended to an append-only trade log.
//!
//! This type is not synchronized; [`SharedOrderBook`] wraps it in a
//! readers-writer lock. Nothing in here logs or performs I/O, so the
//! whole of `submit` can run inside the write guard.
//!
//! [`SharedOrderBook`]: crate::SharedOrderBook

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::error::InvariantViolation;
use crate::order::{Order, OrderStatus};
use crate::order_type::OrderType;
use crate::price::{Price, Quantity};
use crate::side::Side;
use crate::top_of_book::{BestPrices, BookSnapshot, BookStats, DepthSnapshot, PriceLevel};
use crate::trade::Trade;

/// Price -> FIFO queue of resting orders at that price.
type Levels = BTreeMap<Price, VecDeque<Order>>;

/// Outcome of one submitted order: its final state and the trades it made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// The incoming order after matching. If `order.quantity > 0` a copy
    /// of it is now resting in the book.
    pub order: Order,
    pub trades: Vec<Trade>,
}

impl Execution {
    pub fn filled_quantity(&self) -> Quantity {
        self.trades.iter().map(|t| t.quantity).sum()
    }

    pub fn rested(&self) -> bool {
        self.order.quantity > 0
    }
}

/// Single-symbol order book.
#[derive(Debug)]
pub struct OrderBook {
    symbol: String,

    /// Keys ascending; the highest key is the best bid.
    bids: Levels,

    /// Keys ascending; the lowest key is the best ask.
    asks: Levels,

    trade_log: Vec<Trade>,

    /// Last arrival sequence handed out (0 = nothing submitted yet).
    last_sequence: u64,
}

impl OrderBook {
    /// Create a new, empty order book for the given symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        OrderBook {
            symbol: symbol.into(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            trade_log: Vec::new(),
            last_sequence: 0,
        }
    }

    /// Returns the symbol of this book.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Match `order` against the opposite side, rest any remainder, and
    /// return the trades produced, in the order they were made.
    ///
    /// # Panics
    ///
    /// If `order` is not a live limit order for this book with a positive
    /// quantity. Callers validate before submitting.
    pub fn submit(&mut self, order: Order) -> Vec<Trade> {
        self.process(order, |_| ()).0
    }

    /// Like [`submit`](Self::submit), but also hands back the incoming
    /// order's final state (remaining quantity, status).
    pub fn execute(&mut self, order: Order) -> Execution {
        let (trades, order) = self.process(order, Order::clone);
        Execution { order, trades }
    }

    /// Get best bid price, if any bids rest.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Get best ask price, if any asks rest.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    pub fn best_prices(&self) -> BestPrices {
        BestPrices::new(self.best_bid(), self.best_ask())
    }

    /// Mean of best bid and best ask (rounded toward negative infinity);
    /// `None` unless both sides have orders.
    pub fn midpoint(&self) -> Option<Price> {
        Some(Price::midpoint(self.best_bid()?, self.best_ask()?))
    }

    /// Price of the most recent trade.
    pub fn last_trade_price(&self) -> Option<Price> {
        self.trade_log.last().map(|t| t.price)
    }

    /// Resting bids, best first.
    pub fn bids(&self) -> impl Iterator<Item = &Order> + '_ {
        self.bids.values().rev().flatten()
    }

    /// Resting asks, best first.
    pub fn asks(&self) -> impl Iterator<Item = &Order> + '_ {
        self.asks.values().flatten()
    }

    /// Aggregated quantity for the best `levels` prices on each side.
    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: self.bids.iter().rev().take(levels).map(Self::level_summary).collect(),
            asks: self.asks.iter().take(levels).map(Self::level_summary).collect(),
        }
    }

    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            symbol: self.symbol.clone(),
            bids: self.bids().cloned().collect(),
            asks: self.asks().cloned().collect(),
        }
    }

    /// Every trade made by this book, oldest first.
    pub fn trade_log(&self) -> &[Trade] {
        &self.trade_log
    }

    /// The last `n` trades, oldest first.
    pub fn recent_trades(&self, n: usize) -> &[Trade] {
        let start = self.trade_log.len().saturating_sub(n);
        &self.trade_log[start..]
    }

    pub fn stats(&self) -> BookStats {
        BookStats {
            bid_orders: self.bids.values().map(VecDeque::len).sum(),
            ask_orders: self.asks.values().map(VecDeque::len).sum(),
            bid_levels: self.bids.len(),
            ask_levels: self.asks.len(),
            trades: self.trade_log.len(),
            orders_submitted: self.last_sequence,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Walk the whole book and verify its structural invariants:
    /// orders sit on their own price level in arrival order, every
    /// resting order has quantity left and a matching status, and the
    /// book is not crossed.
    ///
    /// O(resting orders); meant for tests and periodic audits.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        Self::check_side(Side::Buy, &self.bids)?;
        Self::check_side(Side::Sell, &self.asks)?;

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                return Err(InvariantViolation::Crossed { bid, ask });
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    /// Shared body of `submit` / `execute`. `report` observes the incoming
    /// order after matching and before it is moved into the book.
    fn process<R>(&mut self, mut order: Order, report: impl FnOnce(&Order) -> R) -> (Vec<Trade>, R) {
        assert_submittable(&self.symbol, &order);

        self.last_sequence += 1;
        order.sequence = self.last_sequence;

        let trades = self.match_order(&mut order, Utc::now());
        let report = report(&order);

        if order.quantity > 0 {
            self.add_to_book(order);
        }

        debug_assert!(
            !self.best_prices().is_crossed(),
            "book crossed after submit: {:?}",
            self.best_prices()
        );

        (trades, report)
    }

    /// Match an incoming order against the opposite side of the book.
    ///
    /// Consumes resting orders best price first, FIFO within a price,
    /// until the incoming order is filled or the prices stop crossing.
    /// Whatever is left stays in `order` for the caller to rest.
    fn match_order(&mut self, order: &mut Order, now: DateTime<Utc>) -> Vec<Trade> {
        let mut trades = Vec::new();

        let resting_side = order.side.opposite();
        let levels = self.side_mut(resting_side);

        while order.quantity > 0 {
            let best = match resting_side {
                Side::Sell => levels.keys().next().copied(),
                Side::Buy => levels.keys().next_back().copied(),
            };
            let Some(best_price) = best else { break };

            if !order.crosses(best_price) {
                break;
            }

            let Some(resting) = levels.get_mut(&best_price) else { break };

            while order.quantity > 0 {
                let Some(maker) = resting.front_mut() else { break };

                let fill_qty = order.quantity.min(maker.quantity);
                trades.push(Trade::between(order, maker, fill_qty, now));

                order.fill(fill_qty, now);
                maker.fill(fill_qty, now);

                if maker.is_filled() {
                    resting.pop_front();
                }
            }

            if resting.is_empty() {
                levels.remove(&best_price);
            }
        }

        self.trade_log.extend_from_slice(&trades);
        trades
    }

    /// Rest an order at the back of its price level.
    ///
    /// Sequences only grow, so the back of the level is always the
    /// position that keeps (price, sequence) order.
    fn add_to_book(&mut self, order: Order) {
        self.side_mut(order.side)
            .entry(order.price)
            .or_default()
            .push_back(order);
    }

    fn side_mut(&mut self, side: Side) -> &mut Levels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    fn level_summary((price, orders): (&Price, &VecDeque<Order>)) -> PriceLevel {
        PriceLevel {
            price: *price,
            quantity: orders.iter().map(|o| o.quantity).sum(),
            orders: orders.len(),
        }
    }

    fn check_side(side: Side, levels: &Levels) -> Result<(), InvariantViolation> {
        for (&price, orders) in levels {
            if orders.is_empty() {
                return Err(InvariantViolation::EmptyLevel { side, price });
            }

            let mut last_sequence = 0;
            for o in orders {
                if o.price != price {
                    return Err(InvariantViolation::WrongLevel {
                        side,
                        price,
                        order_id: o.id,
                        order_price: o.price,
                    });
                }
                if o.sequence <= last_sequence {
                    return Err(InvariantViolation::SequenceOrder { side, price, sequence: o.sequence });
                }
                last_sequence = o.sequence;

                if o.quantity == 0 {
                    return Err(InvariantViolation::EmptyOrder { order_id: o.id });
                }
                let expected = if o.quantity == o.original_quantity {
                    OrderStatus::Pending
                } else {
                    OrderStatus::PartiallyFilled
                };
                if o.status != expected {
                    return Err(InvariantViolation::StatusMismatch {
                        order_id: o.id,
                        status: o.status,
                        remaining: o.quantity,
                        original: o.original_quantity,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Preconditions every submitted order must meet. Violations are caller
/// bugs, so they panic instead of returning an error.
pub(crate) fn assert_submittable(symbol: &str, order: &Order) {
    assert!(order.quantity > 0, "order {} submitted with zero quantity", order.id);
    assert!(
        order.quantity <= order.original_quantity,
        "order {} has {} remaining of an original {}",
        order.id,
        order.quantity,
        order.original_quantity
    );
    assert!(
        order.symbol == symbol,
        "order {} for symbol {:?} submitted to the {:?} book",
        order.id,
        order.symbol,
        symbol
    );
    assert!(
        order.order_type == OrderType::Limit,
        "order {} is a {:?} order; only limit orders can be submitted",
        order.id,
        order.order_type
    );
    assert!(
        !order.status.is_terminal(),
        "order {} is already {:?}",
        order.id,
        order.status
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYM: &str = "BTCUSD";

    fn limit(side: Side, price: i64, qty: Quantity) -> Order {
        Order::limit(SYM, side, Price::new(price), qty)
    }

    #[test]
    fn sequences_are_assigned_on_submit() {
        let mut book = OrderBook::new(SYM);
        book.submit(limit(Side::Buy, 100, 1));
        book.submit(limit(Side::Buy, 100, 1));
        book.submit(limit(Side::Buy, 99, 1));

        let seqs: Vec<u64> = book.bids().map(|o| o.sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(book.stats().orders_submitted, 3);
    }

    #[test]
    fn emptied_levels_are_removed() {
        let mut book = OrderBook::new(SYM);
        book.submit(limit(Side::Sell, 101, 5));
        book.submit(limit(Side::Buy, 101, 5));

        assert!(book.is_empty());
        assert_eq!(book.stats().ask_levels, 0);
        book.check_invariants().unwrap();
    }

    #[test]
    fn execute_reports_final_state() {
        let mut book = OrderBook::new(SYM);
        book.submit(limit(Side::Sell, 101, 4));

        let exec = book.execute(limit(Side::Buy, 101, 10));
        assert_eq!(exec.trades.len(), 1);
        assert_eq!(exec.filled_quantity(), 4);
        assert_eq!(exec.order.quantity, 6);
        assert_eq!(exec.order.status, OrderStatus::PartiallyFilled);
        assert!(exec.rested());

        let resting = book.bids().next().unwrap();
        assert_eq!(resting.id, exec.order.id);
        assert_eq!(resting.status, OrderStatus::PartiallyFilled);
    }

    #[test]
    fn fully_filled_incoming_is_executed_and_not_rested() {
        let mut book = OrderBook::new(SYM);
        book.submit(limit(Side::Buy, 100, 10));

        let exec = book.execute(limit(Side::Sell, 100, 10));
        assert_eq!(exec.order.status, OrderStatus::Executed);
        assert!(exec.order.executed_at.is_some());
        assert!(!exec.rested());
        assert!(book.is_empty());
    }

    #[test]
    fn depth_aggregates_levels_best_first() {
        let mut book = OrderBook::new(SYM);
        book.submit(limit(Side::Buy, 99, 3));
        book.submit(limit(Side::Buy, 100, 1));
        book.submit(limit(Side::Buy, 100, 2));
        book.submit(limit(Side::Sell, 105, 7));

        let depth = book.depth(1);
        assert_eq!(depth.bids, vec![PriceLevel { price: Price::new(100), quantity: 3, orders: 2 }]);
        assert_eq!(depth.asks, vec![PriceLevel { price: Price::new(105), quantity: 7, orders: 1 }]);

        assert_eq!(book.depth(10).bids.len(), 2);
    }

    #[test]
    fn recent_trades_returns_tail() {
        let mut book = OrderBook::new(SYM);
        for _ in 0..5 {
            book.submit(limit(Side::Sell, 100, 1));
        }
        book.submit(limit(Side::Buy, 100, 5));

        assert_eq!(book.trade_log().len(), 5);
        assert_eq!(book.recent_trades(2), &book.trade_log()[3..]);
        assert_eq!(book.recent_trades(50).len(), 5);
    }

    #[test]
    fn check_invariants_detects_status_drift() {
        let mut book = OrderBook::new(SYM);
        book.submit(limit(Side::Buy, 100, 10));
        if let Some(level) = book.bids.get_mut(&Price::new(100)) {
            level[0].status = OrderStatus::Executed;
        }
        assert!(matches!(
            book.check_invariants(),
            Err(InvariantViolation::StatusMismatch { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "zero quantity")]
    fn zero_quantity_is_a_caller_bug() {
        let mut book = OrderBook::new(SYM);
        book.submit(limit(Side::Buy, 100, 0));
    }

    #[test]
    #[should_panic(expected = "submitted to the")]
    fn foreign_symbol_is_a_caller_bug() {
        let mut book = OrderBook::new(SYM);
        book.submit(Order::limit("ETHUSD", Side::Buy, Price::new(100), 1));
    }

    #[test]
    #[should_panic(expected = "remaining of an original")]
    fn remaining_above_original_is_a_caller_bug() {
        let mut book = OrderBook::new(SYM);
        let mut o = limit(Side::Buy, 100, 5);
        o.quantity = 6;
        book.submit(o);
    }

    #[test]
    fn extreme_prices_keep_queries_total() {
        let mut book = OrderBook::new(SYM);
        book.submit(limit(Side::Buy, -2, 1));
        book.submit(limit(Side::Sell, i64::MAX, 1));
        book.check_invariants().unwrap();

        let best = book.best_prices();
        assert_eq!(best.spread(), Some(i128::from(i64::MAX) + 2));
        assert_eq!(book.midpoint(), Some(Price::new(4_611_686_018_427_387_902)));
    }

    #[test]
    #[should_panic(expected = "only limit orders")]
    fn market_order_is_a_caller_bug() {
        let mut book = OrderBook::new(SYM);
        let mut o = limit(Side::Buy, 100, 1);
        o.order_type = OrderType::Market;
        book.submit(o);
    }
}
