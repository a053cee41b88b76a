//! Inbound place-order requests and their validation.
//!
//! The book assumes every order it receives is well formed. This module
//! is where that assumption is earned: a [`PlaceOrderRequest`] decoded
//! from the outside world only becomes an engine [`Order`] after
//! [`PlaceOrderRequest::validate`] accepts it.

use engine_core::{Order, OrderType, Price, Side};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a place-order request.
///
/// `quantity` is signed so that a negative value is reported as an
/// invalid quantity rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub symbol: String,
    #[serde(default)]
    pub price: Option<Price>,
    pub quantity: i64,
    #[serde(default)]
    pub order_type: OrderType,
    pub side: Side,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol is empty")]
    EmptySymbol,

    #[error("symbol {got:?} is not traded here (expected {expected:?})")]
    UnknownSymbol { expected: String, got: String },

    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    #[error("limit order requires a price")]
    MissingPrice,

    #[error("{0:?} orders are not supported")]
    UnsupportedOrderType(OrderType),
}

impl PlaceOrderRequest {
    pub fn limit(symbol: impl Into<String>, side: Side, price: Price, quantity: i64) -> Self {
        PlaceOrderRequest {
            symbol: symbol.into(),
            price: Some(price),
            quantity,
            order_type: OrderType::Limit,
            side,
        }
    }

    /// Check the request against the book it is meant for and build the
    /// engine order (fresh id, pending, placed now).
    pub fn validate(&self, book_symbol: &str) -> Result<Order, ValidationError> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if self.symbol != book_symbol {
            return Err(ValidationError::UnknownSymbol {
                expected: book_symbol.to_string(),
                got: self.symbol.clone(),
            });
        }
        if self.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity(self.quantity));
        }
        if self.order_type != OrderType::Limit {
            return Err(ValidationError::UnsupportedOrderType(self.order_type));
        }
        let price = self.price.ok_or(ValidationError::MissingPrice)?;

        // quantity > 0 was checked above, so the conversion is lossless.
        Ok(Order::limit(self.symbol.clone(), self.side, price, self.quantity as u64))
    }
}
