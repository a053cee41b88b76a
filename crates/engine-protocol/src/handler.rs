//! Request handling glue between a transport and a [`SharedOrderBook`].
//!
//! A transport (HTTP, TCP, a replay file) hands over raw request bodies;
//! these functions decode, validate, submit, and encode the reply.

use engine_core::{Execution, SharedOrderBook};
use tracing::{debug, warn};

use crate::error::ProtocolError;
use crate::json_codec;

/// Decode, validate and submit one place-order body.
pub fn place_order(book: &SharedOrderBook, body: &str) -> Result<Execution, ProtocolError> {
    let request = json_codec::decode_place_order(body)?;
    let order = request.validate(book.symbol()).map_err(|e| {
        warn!(symbol = %request.symbol, error = %e, "rejected order");
        e
    })?;

    debug!(order_id = %order.id, side = %order.side, price = %order.price, quantity = order.quantity, "received order");
    Ok(book.execute(order))
}

/// `{"bid":..,"ask":..,"present":..}` for the book's best prices.
pub fn best_prices(book: &SharedOrderBook) -> Result<String, ProtocolError> {
    json_codec::encode_best_prices(&book.best_prices())
}

/// The book's resting orders, both sides, as JSON.
pub fn order_book(book: &SharedOrderBook) -> Result<String, ProtocolError> {
    json_codec::encode_snapshot(&book.snapshot())
}

/// The last `limit` trades, oldest first, as JSON.
pub fn recent_trades(book: &SharedOrderBook, limit: usize) -> Result<String, ProtocolError> {
    json_codec::encode_trades(&book.recent_trades(limit))
}
