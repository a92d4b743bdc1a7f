use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use types::num;

/// The subset of order fields the relay needs to quote fees.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRequest {
    pub maker_token_address: Address,
    #[serde(with = "num::decimal")]
    pub maker_token_amount: U256,
    pub taker_token_address: Address,
    #[serde(with = "num::decimal")]
    pub taker_token_amount: U256,
    #[serde(with = "num::decimal")]
    pub expiration_unix_timestamp_sec: U256,
    #[serde(with = "num::decimal")]
    pub salt: U256,
    pub fee_recipient: Address,
}

/// The relay's fee terms for a prospective order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub fee_recipient: Address,
    #[serde(with = "num::decimal")]
    pub maker_fee: U256,
    #[serde(with = "num::decimal")]
    pub taker_fee: U256,
    /// The taker the relay requires the order to name, when it requires
    /// one at all.
    #[serde(default)]
    pub taker_to_specify: Option<Address>,
}
