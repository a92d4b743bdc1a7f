use alloy_primitives::Address;
use serde::Serialize;
use types::SignedOrder;

/// The search keys the relay understands. `None` fields are never sent,
/// and unknown parameters are never forwarded.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_contract_address: Option<Address>,
    /// Matches orders trading the token on either side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker_token_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker_token_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker: Option<Address>,
    /// Matches orders where the address is maker or taker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trader: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_recipient: Option<Address>,
}

impl SearchParams {
    /// Whether `signed` satisfies every predicate that is present.
    pub fn matches(&self, signed: &SignedOrder) -> bool {
        let order = &signed.order;
        self.exchange_contract_address
            .map_or(true, |a| order.exchange_contract_address == a)
            && self.token_address.map_or(true, |a| {
                order.maker_token_address == a || order.taker_token_address == a
            })
            && self
                .maker_token_address
                .map_or(true, |a| order.maker_token_address == a)
            && self
                .taker_token_address
                .map_or(true, |a| order.taker_token_address == a)
            && self.maker.map_or(true, |a| order.maker == a)
            && self.taker.map_or(true, |a| order.taker == a)
            && self
                .trader
                .map_or(true, |a| order.maker == a || order.taker == a)
            && self.fee_recipient.map_or(true, |a| order.fee_recipient == a)
    }
}

/// Local counterpart of the relay's order search, for filtering orders
/// already in memory.
pub fn filter_orders<'a>(orders: &'a [SignedOrder], params: &SearchParams) -> Vec<&'a SignedOrder> {
    orders
        .iter()
        .filter(|order| params.matches(order))
        .collect()
}
