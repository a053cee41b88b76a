//! Top-level load harness wiring.
//!
//! This module:
//! - Creates the one `SharedOrderBook` for the configured symbol.
//! - Spawns writer threads (blocking tasks) that submit generated orders
//!   as fast as the book accepts them.
//! - Spawns reader tasks that poll the query operations concurrently.
//! - Logs a report every `report_every` orders and fails the run if a
//!   crossed book is ever observed.
//! - Stops at `max_orders` or on Ctrl-C, whichever comes first.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use engine_core::SharedOrderBook;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::HarnessConfig;
use crate::generator::OrderGenerator;
use crate::report::{orders_per_ms, Report};

/// Totals for a finished run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub orders: u64,
    pub trades: u64,
    pub reader_polls: u64,
    pub elapsed: Duration,
    pub final_report: Report,
}

impl RunSummary {
    pub fn orders_per_ms(&self) -> f64 {
        orders_per_ms(self.orders, self.elapsed)
    }
}

/// Counters shared by writers and readers.
#[derive(Debug, Default)]
struct Progress {
    submitted: AtomicU64,
    trades: AtomicU64,
    polls: AtomicU64,
    stop: AtomicBool,
}

impl Progress {
    /// Reserve the next order slot; `None` once `max` (if non-zero) is
    /// reached or the run is stopping. Returns the 1-based ordinal.
    fn claim(&self, max: u64) -> Option<u64> {
        if self.stopped() {
            return None;
        }
        self.submitted
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                (max == 0 || n < max).then_some(n + 1)
            })
            .ok()
            .map(|prev| prev + 1)
    }

    fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// Run the harness with the given configuration.
pub async fn run(config: HarnessConfig) -> anyhow::Result<RunSummary> {
    let book = SharedOrderBook::new(config.symbol.clone());
    let progress = Arc::new(Progress::default());
    let started = Instant::now();

    info!(
        symbol = %config.symbol,
        writers = config.writers,
        readers = config.readers,
        max_orders = config.max_orders,
        "starting load harness"
    );

    let writers: Vec<JoinHandle<anyhow::Result<()>>> = (0..config.writers)
        .map(|w| {
            let book = book.clone();
            let progress = Arc::clone(&progress);
            let config = config.clone();
            tokio::task::spawn_blocking(move || run_writer(w, &config, &book, &progress, started))
        })
        .collect();

    let readers: Vec<JoinHandle<anyhow::Result<()>>> = (0..config.readers)
        .map(|r| {
            let book = book.clone();
            let progress = Arc::clone(&progress);
            tokio::spawn(run_reader(r, book, progress, config.poll_interval))
        })
        .collect();

    let ctrl_c = {
        let progress = Arc::clone(&progress);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, stopping writers");
                progress.stop();
            }
        })
    };

    let mut outcome: anyhow::Result<()> = Ok(());
    for handle in writers {
        let result = handle.await.context("writer task panicked").and_then(|r| r);
        if let Err(e) = result {
            progress.stop();
            if outcome.is_ok() {
                outcome = Err(e);
            }
        }
    }
    progress.stop();
    ctrl_c.abort();

    for handle in readers {
        let result = handle.await.context("reader task panicked").and_then(|r| r);
        if let Err(e) = result {
            if outcome.is_ok() {
                outcome = Err(e);
            }
        }
    }
    outcome?;

    let elapsed = started.elapsed();
    let orders = progress.submitted.load(Ordering::Relaxed);
    let final_report = Report::capture(&book, orders, elapsed);
    final_report.log();

    book.check_invariants().context("book failed its final audit")?;

    let summary = RunSummary {
        orders,
        trades: progress.trades.load(Ordering::Relaxed),
        reader_polls: progress.polls.load(Ordering::Relaxed),
        elapsed,
        final_report,
    };
    info!(
        orders = summary.orders,
        trades = summary.trades,
        reader_polls = summary.reader_polls,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        orders_per_ms = %format!("{:.1}", summary.orders_per_ms()),
        "load harness finished"
    );
    Ok(summary)
}

fn run_writer(
    writer: usize,
    config: &HarnessConfig,
    book: &SharedOrderBook,
    progress: &Progress,
    started: Instant,
) -> anyhow::Result<()> {
    let mut generator = OrderGenerator::new(config.generator(), config.seed.wrapping_add(writer as u64));

    while let Some(n) = progress.claim(config.max_orders) {
        let trades = book.submit(generator.next_order());
        progress.trades.fetch_add(trades.len() as u64, Ordering::Relaxed);

        if config.report_every > 0 && n % config.report_every == 0 {
            let report = Report::capture(book, n, started.elapsed());
            report.log();
            if report.best.is_crossed() {
                bail!("book crossed after {} orders: {:?}", n, report.best);
            }
        }
    }

    debug!(writer, generated = generator.generated(), "writer done");
    Ok(())
}

async fn run_reader(
    reader: usize,
    book: SharedOrderBook,
    progress: Arc<Progress>,
    poll_interval: Duration,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(poll_interval);

    // Poll at least once, even if the writers are already done.
    loop {
        ticker.tick().await;

        let best = book.best_prices();
        if best.is_crossed() {
            warn!(reader, ?best, "reader observed a crossed book");
            progress.stop();
            bail!("reader {} observed a crossed book: {:?}", reader, best);
        }
        let midpoint = book.midpoint();
        let last_trade = book.last_trade_price();
        progress.polls.fetch_add(1, Ordering::Relaxed);

        debug!(reader, bid = ?best.bid, ask = ?best.ask, ?midpoint, ?last_trade, "poll");

        if progress.stopped() {
            return Ok(());
        }
    }
}
