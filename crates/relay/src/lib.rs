mod client;
mod error;
mod fees;
mod search;

pub use client::{
    Expiration, NewOrder, RelayClient, DEFAULT_FEE_RECIPIENT, DEFAULT_ORDER_DURATION_SECS,
    DEFAULT_RELAY_URL,
};
pub use error::RelayError;
pub use fees::{FeeQuote, FeeRequest};
pub use search::{filter_orders, SearchParams};
