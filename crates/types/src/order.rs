use alloy_primitives::{Address, B256, U256};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{num, OrderError};

/// Low 32 bits of every salt generated by this library, marking the order
/// as one of ours. Informational only; never validated on parse.
pub const SALT_WATERMARK: u32 = 132_727_578;

/// An unsigned offer to trade `maker_token_amount` of one token for
/// `taker_token_amount` of another. A zero `taker` means any taker may
/// fill it. Amounts and fees are in base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub exchange_contract_address: Address,
    pub maker: Address,
    pub taker: Address,
    pub maker_token_address: Address,
    pub taker_token_address: Address,
    pub fee_recipient: Address,
    #[serde(with = "num::decimal")]
    pub maker_token_amount: U256,
    #[serde(with = "num::decimal")]
    pub taker_token_amount: U256,
    #[serde(with = "num::decimal")]
    pub maker_fee: U256,
    #[serde(with = "num::decimal")]
    pub taker_fee: U256,
    #[serde(with = "num::decimal")]
    pub expiration_unix_timestamp_sec: U256,
    #[serde(with = "num::decimal")]
    pub salt: U256,
}

impl Order {
    /// Remaining quantities once the filled and cancelled taker-side
    /// amounts are known. Underflow means the relay served corrupt fill
    /// history and is surfaced, never clamped.
    fn availability(&self, filled: U256, cancelled: U256) -> Result<(U256, U256), OrderError> {
        let taker_available = self
            .taker_token_amount
            .checked_sub(filled)
            .and_then(|left| left.checked_sub(cancelled))
            .ok_or(OrderError::InconsistentAvailability)?;
        // taker_available <= taker_token_amount, so the quotient fits.
        let maker_available = num::mul_div(
            self.maker_token_amount,
            taker_available,
            self.taker_token_amount,
        );
        Ok((taker_available, maker_available))
    }
}

/// An ECDSA signature over the canonical order hash. `v` is the recovery
/// byte as it appears on the wire, 27 or 28.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

/// An [`Order`] plus its maker's signature and the derived availability
/// fields. Fill history defaults to zero until a relay reports otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub ec_signature: EcSignature,
    #[serde(default, with = "num::decimal")]
    pub taker_token_amount_filled: U256,
    #[serde(default, with = "num::decimal")]
    pub taker_token_amount_cancelled: U256,
    #[serde(default, with = "num::decimal")]
    pub taker_token_amount_available: U256,
    #[serde(default, with = "num::decimal")]
    pub maker_token_amount_available: U256,
}

impl SignedOrder {
    /// A freshly signed order with no fill history.
    pub fn new(order: Order, ec_signature: EcSignature) -> Self {
        let maker_available = if order.taker_token_amount.is_zero() {
            U256::ZERO
        } else {
            order.maker_token_amount
        };
        Self {
            taker_token_amount_filled: U256::ZERO,
            taker_token_amount_cancelled: U256::ZERO,
            taker_token_amount_available: order.taker_token_amount,
            maker_token_amount_available: maker_available,
            order,
            ec_signature,
        }
    }

    /// Assembles a signed order from relay-reported fill history, deriving
    /// both availability fields.
    pub fn with_fill_history(
        order: Order,
        ec_signature: EcSignature,
        filled: U256,
        cancelled: U256,
    ) -> Result<Self, OrderError> {
        let (taker_available, maker_available) = order.availability(filled, cancelled)?;
        Ok(Self {
            order,
            ec_signature,
            taker_token_amount_filled: filled,
            taker_token_amount_cancelled: cancelled,
            taker_token_amount_available: taker_available,
            maker_token_amount_available: maker_available,
        })
    }
}

/// A random 256-bit salt whose low 32 bits carry [`SALT_WATERMARK`].
pub fn generate_watermarked_salt() -> U256 {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes[28..].copy_from_slice(&SALT_WATERMARK.to_be_bytes());
    U256::from_be_bytes(bytes)
}

#[cfg(test)]
pub(crate) mod testing {
    use alloy_primitives::{address, b256};

    use super::*;

    pub fn sample_order() -> Order {
        Order {
            exchange_contract_address: address!("12459c951127e0c374ff9105dda097662a027093"),
            maker: address!("9e56625509c2f60af937f23b7b532600390e8c8b"),
            taker: Address::ZERO,
            maker_token_address: address!("e41d2489571d322189246dafa5ebde1f4699f498"),
            taker_token_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            fee_recipient: address!("c22d5b2951db72b44cfb8089bb8cd374a3c354ea"),
            maker_token_amount: U256::from(200u64),
            taker_token_amount: U256::from(100u64),
            maker_fee: U256::from(3u64),
            taker_fee: U256::from(7u64),
            expiration_unix_timestamp_sec: U256::from(1_700_000_000u64),
            salt: U256::from(987_654_321_012_345u64),
        }
    }

    pub fn sample_signature() -> EcSignature {
        EcSignature {
            v: 27,
            r: b256!("6162636465666768616263646566676861626364656667686162636465666768"),
            s: b256!("7172737475767778717273747576777871727374757677787172737475767778"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{sample_order, sample_signature};
    use super::*;

    #[test]
    fn fresh_order_is_fully_available() {
        let signed = SignedOrder::new(sample_order(), sample_signature());
        assert_eq!(signed.taker_token_amount_filled, U256::ZERO);
        assert_eq!(signed.taker_token_amount_cancelled, U256::ZERO);
        assert_eq!(signed.taker_token_amount_available, U256::from(100u64));
        assert_eq!(signed.maker_token_amount_available, U256::from(200u64));
    }

    #[test]
    fn availability_arithmetic() {
        let signed = SignedOrder::with_fill_history(
            sample_order(),
            sample_signature(),
            U256::from(30u64),
            U256::from(20u64),
        )
        .unwrap();
        assert_eq!(signed.taker_token_amount_available, U256::from(50u64));
        assert_eq!(signed.maker_token_amount_available, U256::from(100u64));
    }

    #[test]
    fn overfilled_order_is_rejected() {
        let err = SignedOrder::with_fill_history(
            sample_order(),
            sample_signature(),
            U256::from(80u64),
            U256::from(30u64),
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::InconsistentAvailability));
    }

    #[test]
    fn zero_taker_amount_has_no_availability() {
        let mut order = sample_order();
        order.taker_token_amount = U256::ZERO;
        let signed = SignedOrder::new(order, sample_signature());
        assert_eq!(signed.taker_token_amount_available, U256::ZERO);
        assert_eq!(signed.maker_token_amount_available, U256::ZERO);
    }

    #[test]
    fn generated_salts_carry_the_watermark() {
        let salt = generate_watermarked_salt();
        assert_eq!(
            salt % U256::from(1u64 << 32),
            U256::from(SALT_WATERMARK)
        );
        assert_ne!(generate_watermarked_salt(), salt);
    }
}
