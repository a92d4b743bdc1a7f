//! JSON encoding of orders, the relay's default wire format.
//!
//! Numeric fields travel as decimal strings so no precision is lost across
//! the text boundary; `ecSignature.v` is the one plain number. Unlike the
//! binary codec, parsing can verify the signature against the maker.

use crate::{
    hash::{ExchangeScheme, SignatureScheme},
    Order, OrderError, SignedOrder,
};

/// Decodes a signed order, optionally verifying its signature against the
/// maker. Availability is always re-derived, with absent fill history
/// counting as zero.
pub fn parse(text: &str, verify: bool) -> Result<SignedOrder, OrderError> {
    parse_with(text, verify, &ExchangeScheme)
}

/// [`parse`] under a caller-supplied signature scheme.
pub fn parse_with<S: SignatureScheme>(
    text: &str,
    verify: bool,
    scheme: &S,
) -> Result<SignedOrder, OrderError> {
    let order = serde_json::from_str::<SignedOrder>(text)
        .map_err(|e| OrderError::MalformedInput(e.to_string()))?;
    process_with(order, verify, scheme)
}

/// Re-derives availability on an already-decoded order, verifying the
/// signature first when asked.
pub fn process(order: SignedOrder, verify: bool) -> Result<SignedOrder, OrderError> {
    process_with(order, verify, &ExchangeScheme)
}

/// [`process`] under a caller-supplied signature scheme.
pub fn process_with<S: SignatureScheme>(
    order: SignedOrder,
    verify: bool,
    scheme: &S,
) -> Result<SignedOrder, OrderError> {
    if verify {
        let hash = scheme.order_hash(&order.order);
        if !scheme.verify(hash, &order.ec_signature, order.order.maker) {
            return Err(OrderError::InvalidSignature);
        }
    }
    SignedOrder::with_fill_history(
        order.order,
        order.ec_signature,
        order.taker_token_amount_filled,
        order.taker_token_amount_cancelled,
    )
}

/// Decodes an order carrying no signature, e.g. a fee request body.
pub fn parse_unsigned(text: &str) -> Result<Order, OrderError> {
    serde_json::from_str(text).map_err(|e| OrderError::MalformedInput(e.to_string()))
}

/// Encodes the order with every numeric field as a decimal string. The
/// exact inverse of [`parse`] for every field it populates.
pub fn serialize(order: &SignedOrder) -> Result<String, OrderError> {
    serde_json::to_string(order).map_err(|e| OrderError::MalformedInput(e.to_string()))
}
