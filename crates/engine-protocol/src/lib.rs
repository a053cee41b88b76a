//! engine-protocol
//!
//! Boundary between the outside world and `engine-core`.
//!
//! - [`request`]    : place-order requests and the validation that turns
//!   them into engine orders
//! - [`json_codec`] : JSON encoding of orders, trades and book views
//! - [`handler`]    : decode / validate / submit / encode glue

pub mod error;
pub mod handler;
pub mod json_codec;
pub mod request;

pub use error::ProtocolError;
pub use json_codec::{
    decode_place_order,
    encode_best_prices,
    encode_order,
    encode_snapshot,
    encode_trade,
    encode_trades,
};
pub use request::{PlaceOrderRequest, ValidationError};
