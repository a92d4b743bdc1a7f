use alloy_primitives::{keccak256, Address, B256, PrimitiveSignature};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use crate::{EcSignature, Order, OrderError, SignedOrder};

/// Hashing and signature scheme agreed with the exchange contract.
/// A trait so tests can substitute a deterministic implementation.
pub trait SignatureScheme {
    /// Canonical 32-byte hash of the order fields.
    fn order_hash(&self, order: &Order) -> B256;

    /// Whether `signature` over `hash` recovers to `signer`.
    fn verify(&self, hash: B256, signature: &EcSignature, signer: Address) -> bool;
}

/// The exchange contract's scheme: Keccak-256 over the twelve order fields
/// in layout order, each left-padded to 32 bytes, with ECDSA recovery over
/// the raw hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExchangeScheme;

impl SignatureScheme for ExchangeScheme {
    fn order_hash(&self, order: &Order) -> B256 {
        let mut buf = Vec::with_capacity(12 * 32);
        for address in [
            order.exchange_contract_address,
            order.maker,
            order.taker,
            order.maker_token_address,
            order.taker_token_address,
            order.fee_recipient,
        ] {
            buf.extend_from_slice(&[0u8; 12]);
            buf.extend_from_slice(address.as_slice());
        }
        for word in [
            order.maker_token_amount,
            order.taker_token_amount,
            order.maker_fee,
            order.taker_fee,
            order.expiration_unix_timestamp_sec,
            order.salt,
        ] {
            buf.extend_from_slice(&word.to_be_bytes::<32>());
        }
        keccak256(&buf)
    }

    fn verify(&self, hash: B256, signature: &EcSignature, signer: Address) -> bool {
        // The wire carries 27/28; recovery wants 0/1.
        let parity = match signature.v {
            0 | 27 => 0,
            1 | 28 => 1,
            _ => return false,
        };
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(signature.r.as_slice());
        bytes[32..64].copy_from_slice(signature.s.as_slice());
        bytes[64] = parity;
        let Ok(decoded) = PrimitiveSignature::try_from(&bytes[..]) else {
            return false;
        };
        decoded
            .recover_address_from_prehash(&hash)
            .map(|recovered| recovered == signer)
            .unwrap_or(false)
    }
}

impl Order {
    /// Signs the canonical hash, yielding a fresh signed order with no
    /// fill history.
    pub fn sign(&self, signer: &PrivateKeySigner) -> Result<SignedOrder, OrderError> {
        let hash = ExchangeScheme.order_hash(self);
        let signature = signer
            .sign_hash_sync(&hash)
            .map_err(|e| OrderError::Signer(e.to_string()))?;
        let mut bytes = signature.as_bytes();
        if bytes[64] < 27 {
            bytes[64] += 27;
        }
        Ok(SignedOrder::new(
            self.clone(),
            EcSignature {
                v: bytes[64],
                r: B256::from_slice(&bytes[..32]),
                s: B256::from_slice(&bytes[32..64]),
            },
        ))
    }
}
