// crates/engine-core/tests/scenarios.rs
use engine_core::{Order, OrderBook, OrderStatus, Price, Quantity, Side};

const SYM: &str = "BTCUSD";

fn buy(price: i64, qty: Quantity) -> Order {
    Order::limit(SYM, Side::Buy, Price::new(price), qty)
}

fn sell(price: i64, qty: Quantity) -> Order {
    Order::limit(SYM, Side::Sell, Price::new(price), qty)
}

/// (price, remaining) for each resting order, best first.
fn levels<'a>(orders: impl Iterator<Item = &'a Order>) -> Vec<(i64, Quantity)> {
    orders.map(|o| (o.price.minor_units(), o.quantity)).collect()
}

fn scenario_a() -> OrderBook {
    let mut book = OrderBook::new(SYM);
    assert!(book.submit(sell(101, 15)).is_empty());
    assert!(book.submit(sell(102, 20)).is_empty());
    book
}

#[test]
fn a_non_crossing_orders_rest() {
    let book = scenario_a();
    assert_eq!(levels(book.asks()), vec![(101, 15), (102, 20)]);
    assert_eq!(book.bids().count(), 0);
    assert!(book.trade_log().is_empty());
    book.check_invariants().unwrap();
}

#[test]
fn b_partial_fill_at_maker_price() {
    let mut book = scenario_a();
    let trades = book.submit(buy(102, 10));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, Price::new(101));
    assert_eq!(trades[0].quantity, 10);
    assert_eq!(levels(book.asks()), vec![(101, 5), (102, 20)]);
    assert_eq!(book.bids().count(), 0);
    book.check_invariants().unwrap();
}

#[test]
fn c_sweep_across_two_levels() {
    let mut book = scenario_a();
    book.submit(buy(102, 10));
    let trades = book.submit(buy(102, 20));

    let fills: Vec<(i64, Quantity)> = trades
        .iter()
        .map(|t| (t.price.minor_units(), t.quantity))
        .collect();
    assert_eq!(fills, vec![(101, 5), (102, 15)]);
    assert_eq!(levels(book.asks()), vec![(102, 5)]);
    assert_eq!(book.bids().count(), 0);
    assert_eq!(book.last_trade_price(), Some(Price::new(102)));
    book.check_invariants().unwrap();
}

#[test]
fn d_one_sided_book_reports_present() {
    let mut book = OrderBook::new(SYM);
    book.submit(buy(100, 10));

    let best = book.best_prices();
    assert_eq!(best.bid, Some(Price::new(100)));
    assert_eq!(best.ask, None);
    assert!(best.present());
    assert_eq!(book.midpoint(), None);
}

#[test]
fn e_empty_book_queries_are_absent() {
    let book = OrderBook::new(SYM);
    assert!(!book.best_prices().present());
    assert_eq!(book.midpoint(), None);
    assert_eq!(book.last_trade_price(), None);
}

#[test]
fn fifo_within_a_price_level() {
    let mut book = OrderBook::new(SYM);
    let first = sell(100, 5);
    let second = sell(100, 5);
    let (first_id, second_id) = (first.id, second.id);
    book.submit(first);
    book.submit(second);

    let trades = book.submit(buy(100, 7));
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].sell_order_id, first_id);
    assert_eq!(trades[0].quantity, 5);
    assert_eq!(trades[1].sell_order_id, second_id);
    assert_eq!(trades[1].quantity, 2);

    let rest: Vec<_> = book.asks().collect();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].id, second_id);
    assert_eq!(rest[0].status, OrderStatus::PartiallyFilled);
}

#[test]
fn better_price_beats_earlier_arrival() {
    let mut book = OrderBook::new(SYM);
    let early = buy(99, 5);
    let better = buy(100, 5);
    let better_id = better.id;
    book.submit(early);
    book.submit(better);

    let trades = book.submit(sell(99, 5));
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].buy_order_id, better_id);
    assert_eq!(trades[0].price, Price::new(100));
}

#[test]
fn incoming_sell_trades_at_resting_bid_price() {
    let mut book = OrderBook::new(SYM);
    let bid = buy(105, 3);
    let bid_id = bid.id;
    book.submit(bid);

    let ask = sell(100, 3);
    let ask_id = ask.id;
    let trades = book.submit(ask);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, Price::new(105));
    assert_eq!(trades[0].buy_order_id, bid_id);
    assert_eq!(trades[0].sell_order_id, ask_id);
    assert_eq!(trades[0].taker_side, Side::Sell);
    assert!(book.is_empty());
}

#[test]
fn equal_prices_cross() {
    let mut book = OrderBook::new(SYM);
    book.submit(sell(100, 1));
    assert_eq!(book.submit(buy(100, 1)).len(), 1);
}

#[test]
fn remainder_rests_after_partial_sweep() {
    let mut book = OrderBook::new(SYM);
    book.submit(sell(100, 2));
    book.submit(sell(103, 2));

    let exec = book.execute(buy(101, 5));
    assert_eq!(exec.filled_quantity(), 2);
    assert_eq!(exec.order.status, OrderStatus::PartiallyFilled);
    assert_eq!(levels(book.bids()), vec![(101, 3)]);
    assert_eq!(levels(book.asks()), vec![(103, 2)]);
    assert_eq!(book.midpoint(), Some(Price::new(102)));
    book.check_invariants().unwrap();
}

#[test]
fn zero_price_is_a_real_price() {
    let mut book = OrderBook::new(SYM);
    book.submit(buy(0, 1));

    let best = book.best_prices();
    assert_eq!(best.bid, Some(Price::new(0)));
    assert!(best.present());
}

#[test]
fn midpoint_rounds_down() {
    let mut book = OrderBook::new(SYM);
    book.submit(buy(100, 1));
    book.submit(sell(103, 1));
    assert_eq!(book.midpoint(), Some(Price::new(101)));
}

#[test]
fn trades_are_returned_in_consumption_order_and_logged() {
    let mut book = OrderBook::new(SYM);
    book.submit(buy(98, 1));
    book.submit(buy(100, 1));
    book.submit(buy(99, 1));

    let trades = book.submit(sell(90, 3));
    let prices: Vec<i64> = trades.iter().map(|t| t.price.minor_units()).collect();
    assert_eq!(prices, vec![100, 99, 98]);
    assert_eq!(book.trade_log(), trades.as_slice());
    assert_eq!(book.last_trade_price(), Some(Price::new(98)));
}
