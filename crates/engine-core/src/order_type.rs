//! Order type (Market vs Limit).
//!
//! The book only ever rests and matches limit orders; `Market` exists so
//! the data model round-trips the `order_type` field of inbound requests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    #[default]
    Limit,
}
