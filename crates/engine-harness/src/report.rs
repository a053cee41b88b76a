//! Periodic progress reports.
//!
//! A report is captured under one read guard, so every number in it
//! describes the same instant of the book, and logged after the guard is
//! gone.

use std::time::Duration;

use engine_core::{BestPrices, BookStats, Price, SharedOrderBook};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub orders: u64,
    pub elapsed: Duration,
    pub best: BestPrices,
    pub midpoint: Option<Price>,
    pub last_trade: Option<Price>,
    pub stats: BookStats,
}

impl Report {
    pub fn capture(book: &SharedOrderBook, orders: u64, elapsed: Duration) -> Self {
        book.read(|b| Report {
            orders,
            elapsed,
            best: b.best_prices(),
            midpoint: b.midpoint(),
            last_trade: b.last_trade_price(),
            stats: b.stats(),
        })
    }

    pub fn orders_per_ms(&self) -> f64 {
        orders_per_ms(self.orders, self.elapsed)
    }

    pub fn log(&self) {
        info!(
            orders = self.orders,
            best_bid = ?self.best.bid,
            best_ask = ?self.best.ask,
            midpoint = ?self.midpoint,
            last_trade = ?self.last_trade,
            bids = self.stats.bid_orders,
            asks = self.stats.ask_orders,
            trades = self.stats.trades,
            elapsed_ms = self.elapsed.as_millis() as u64,
            orders_per_ms = %format!("{:.1}", self.orders_per_ms()),
            "progress"
        );
    }
}

pub fn orders_per_ms(orders: u64, elapsed: Duration) -> f64 {
    let ms = elapsed.as_secs_f64() * 1_000.0;
    if ms > 0.0 {
        orders as f64 / ms
    } else {
        0.0
    }
}
