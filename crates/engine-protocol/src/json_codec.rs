//! JSON encoding of the engine's data model.
//!
//! Field names follow the public order / trade shape:
//!
//! - Order: `order_id, symbol, price, quantity, original_quantity,
//!   order_type, side, status, placedAt, executed_at`
//! - Trade: `trade_id, buy_order_id, sell_order_id, price, quantity,
//!   timestamp, taker_side`
//!
//! Prices are integers in minor currency units; timestamps are RFC 3339.

use engine_core::{BestPrices, BookSnapshot, Order, Price, Trade};
use serde::Serialize;

use crate::error::ProtocolError;
use crate::request::PlaceOrderRequest;

/// Decode a place-order request body.
///
/// Only decodes; call [`PlaceOrderRequest::validate`] before submitting.
pub fn decode_place_order(body: &str) -> Result<PlaceOrderRequest, ProtocolError> {
    Ok(serde_json::from_str(body)?)
}

pub fn encode_order(order: &Order) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(order)?)
}

pub fn encode_trade(trade: &Trade) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(trade)?)
}

pub fn encode_trades(trades: &[Trade]) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(trades)?)
}

pub fn encode_snapshot(snapshot: &BookSnapshot) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Wire shape of a best-prices answer: absent sides are `null`, and
/// `present` is false only for an empty book.
#[derive(Serialize)]
struct BestPricesBody {
    bid: Option<Price>,
    ask: Option<Price>,
    present: bool,
}

pub fn encode_best_prices(best: &BestPrices) -> Result<String, ProtocolError> {
    let body = BestPricesBody {
        bid: best.bid,
        ask: best.ask,
        present: best.present(),
    };
    Ok(serde_json::to_string(&body)?)
}
