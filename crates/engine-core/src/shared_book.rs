//! Thread-safe handle to a single [`OrderBook`].
//!
//! One readers-writer lock guards the whole book. `submit` holds the
//! write guard for matching plus insertion, so no reader ever sees a
//! half-matched book; every query holds a read guard and may run
//! alongside other queries. Trades from concurrent submits land in the
//! trade log in the order their write sections ran.
//!
//! The handle is cheap to clone and is passed explicitly to whatever
//! needs the book; there is no process-wide instance.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::error::InvariantViolation;
use crate::order::Order;
use crate::order_book::{assert_submittable, Execution, OrderBook};
use crate::price::Price;
use crate::top_of_book::{BestPrices, BookSnapshot, BookStats, DepthSnapshot};
use crate::trade::Trade;

#[derive(Debug, Clone)]
pub struct SharedOrderBook {
    symbol: Arc<str>,
    inner: Arc<RwLock<OrderBook>>,
}

impl SharedOrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::from_book(OrderBook::new(symbol))
    }

    pub fn from_book(book: OrderBook) -> Self {
        SharedOrderBook {
            symbol: Arc::from(book.symbol()),
            inner: Arc::new(RwLock::new(book)),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Match and rest `order` under the write lock; returns the trades it
    /// produced. See [`OrderBook::submit`].
    pub fn submit(&self, order: Order) -> Vec<Trade> {
        // Checked before locking: a caller bug must not poison the book.
        assert_submittable(&self.symbol, &order);

        let order_id = order.id;
        let trades = self.write().submit(order);

        trace!(symbol = %self.symbol, %order_id, trades = trades.len(), "order submitted");
        trades
    }

    /// See [`OrderBook::execute`].
    pub fn execute(&self, order: Order) -> Execution {
        assert_submittable(&self.symbol, &order);

        let execution = self.write().execute(order);

        trace!(
            symbol = %self.symbol,
            order_id = %execution.order.id,
            status = ?execution.order.status,
            trades = execution.trades.len(),
            "order executed"
        );
        execution
    }

    pub fn best_prices(&self) -> BestPrices {
        self.read_guard().best_prices()
    }

    pub fn midpoint(&self) -> Option<Price> {
        self.read_guard().midpoint()
    }

    pub fn last_trade_price(&self) -> Option<Price> {
        self.read_guard().last_trade_price()
    }

    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        self.read_guard().depth(levels)
    }

    pub fn snapshot(&self) -> BookSnapshot {
        self.read_guard().snapshot()
    }

    pub fn recent_trades(&self, n: usize) -> Vec<Trade> {
        self.read_guard().recent_trades(n).to_vec()
    }

    pub fn stats(&self) -> BookStats {
        self.read_guard().stats()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.read_guard().check_invariants()
    }

    /// Run `f` against the book under a single read guard, for views that
    /// must be consistent with each other.
    pub fn read<R>(&self, f: impl FnOnce(&OrderBook) -> R) -> R {
        let guard = self.read_guard();
        f(&*guard)
    }

    // Matching never panics midway (preconditions are checked before the
    // guard is taken), so a poisoned lock still holds a consistent book.

    fn read_guard(&self) -> RwLockReadGuard<'_, OrderBook> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, OrderBook> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
