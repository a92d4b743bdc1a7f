//! Fixed-layout binary encoding of signed orders.
//!
//! A record is six 20-byte addresses, six 32-byte big-endian words, then
//! the signature as `v || r || s` (1 + 32 + 32 bytes), 377 bytes in total.
//! Records served with fill history carry two further 32-byte words, the
//! filled and cancelled taker amounts, for 441 bytes.

use alloy_primitives::{Address, B256, U256};

use crate::{num, EcSignature, Order, OrderError, SignedOrder};

/// Length of a signed order record without fill history.
pub const ORDER_LEN: usize = 377;
/// Length of a signed order record carrying filled and cancelled amounts.
pub const ORDER_WITH_HISTORY_LEN: usize = 441;

const ADDRESS_WIDTH: usize = 20;
const WORD_WIDTH: usize = 32;

/// Sequential field reader; callers validate the total length up front.
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, width: usize) -> &'a [u8] {
        let (head, rest) = self.buf.split_at(width);
        self.buf = rest;
        head
    }

    fn address(&mut self) -> Address {
        Address::from_slice(self.take(ADDRESS_WIDTH))
    }

    fn word(&mut self) -> U256 {
        U256::from_be_slice(self.take(WORD_WIDTH))
    }

    fn b256(&mut self) -> B256 {
        B256::from_slice(self.take(WORD_WIDTH))
    }

    fn byte(&mut self) -> u8 {
        self.take(1)[0]
    }
}

/// Decodes a single 377 or 441 byte record. The short form defaults fill
/// history to zero; both forms derive the availability fields.
///
/// The signature is not verified here. Callers wanting verification go
/// through [`SignatureScheme`](crate::SignatureScheme).
pub fn parse(data: &[u8]) -> Result<SignedOrder, OrderError> {
    if data.len() != ORDER_LEN && data.len() != ORDER_WITH_HISTORY_LEN {
        return Err(OrderError::MalformedInput(format!(
            "expected {ORDER_LEN} or {ORDER_WITH_HISTORY_LEN} bytes, got {}",
            data.len()
        )));
    }
    let mut reader = Reader { buf: data };
    let order = Order {
        exchange_contract_address: reader.address(),
        maker: reader.address(),
        taker: reader.address(),
        maker_token_address: reader.address(),
        taker_token_address: reader.address(),
        fee_recipient: reader.address(),
        maker_token_amount: reader.word(),
        taker_token_amount: reader.word(),
        maker_fee: reader.word(),
        taker_fee: reader.word(),
        expiration_unix_timestamp_sec: reader.word(),
        salt: reader.word(),
    };
    let ec_signature = EcSignature {
        v: reader.byte(),
        r: reader.b256(),
        s: reader.b256(),
    };
    let (filled, cancelled) = if data.len() == ORDER_WITH_HISTORY_LEN {
        (reader.word(), reader.word())
    } else {
        (U256::ZERO, U256::ZERO)
    };
    SignedOrder::with_fill_history(order, ec_signature, filled, cancelled)
}

/// Decodes a concatenation of fixed 441-byte records, the relay's
/// octet-stream list framing. Trailing bytes short of a full record are
/// discarded.
pub fn parse_list(data: &[u8]) -> Result<Vec<SignedOrder>, OrderError> {
    data.chunks_exact(ORDER_WITH_HISTORY_LEN)
        .map(parse)
        .collect()
}

/// Encodes the 377-byte record. Fill history is the relay's to report and
/// is never serialized.
pub fn serialize(signed: &SignedOrder) -> Result<Vec<u8>, OrderError> {
    let order = &signed.order;
    let mut out = Vec::with_capacity(ORDER_LEN);
    for address in [
        order.exchange_contract_address,
        order.maker,
        order.taker,
        order.maker_token_address,
        order.taker_token_address,
        order.fee_recipient,
    ] {
        out.extend_from_slice(address.as_slice());
    }
    for word in [
        order.maker_token_amount,
        order.taker_token_amount,
        order.maker_fee,
        order.taker_fee,
        order.expiration_unix_timestamp_sec,
        order.salt,
    ] {
        out.extend_from_slice(&num::to_fixed_be_bytes(word, WORD_WIDTH)?);
    }
    out.push(signed.ec_signature.v);
    out.extend_from_slice(signed.ec_signature.r.as_slice());
    out.extend_from_slice(signed.ec_signature.s.as_slice());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::testing::{sample_order, sample_signature};

    fn sample_signed() -> SignedOrder {
        SignedOrder::new(sample_order(), sample_signature())
    }

    fn with_history(filled: u64, cancelled: u64) -> Vec<u8> {
        let mut bytes = serialize(&sample_signed()).unwrap();
        bytes.extend_from_slice(&U256::from(filled).to_be_bytes::<32>());
        bytes.extend_from_slice(&U256::from(cancelled).to_be_bytes::<32>());
        bytes
    }

    #[test]
    fn round_trip() {
        let signed = sample_signed();
        let bytes = serialize(&signed).unwrap();
        assert_eq!(bytes.len(), ORDER_LEN);
        assert_eq!(parse(&bytes).unwrap(), signed);
    }

    #[test]
    fn field_offsets() {
        let bytes = serialize(&sample_signed()).unwrap();
        let order = sample_order();
        assert_eq!(&bytes[20..40], order.maker.as_slice());
        assert_eq!(&bytes[100..120], order.fee_recipient.as_slice());
        assert_eq!(bytes[280..312], order.salt.to_be_bytes::<32>());
        assert_eq!(bytes[312], 27);
        assert_eq!(&bytes[313..345], sample_signature().r.as_slice());
        assert_eq!(&bytes[345..377], sample_signature().s.as_slice());
    }

    #[test]
    fn short_record_defaults_history_to_zero() {
        let parsed = parse(&serialize(&sample_signed()).unwrap()).unwrap();
        assert_eq!(parsed.taker_token_amount_filled, U256::ZERO);
        assert_eq!(parsed.taker_token_amount_cancelled, U256::ZERO);
        assert_eq!(parsed.taker_token_amount_available, U256::from(100u64));
        assert_eq!(parsed.maker_token_amount_available, U256::from(200u64));
    }

    #[test]
    fn long_record_reads_history() {
        let parsed = parse(&with_history(30, 20)).unwrap();
        assert_eq!(parsed.taker_token_amount_filled, U256::from(30u64));
        assert_eq!(parsed.taker_token_amount_cancelled, U256::from(20u64));
        assert_eq!(parsed.taker_token_amount_available, U256::from(50u64));
        assert_eq!(parsed.maker_token_amount_available, U256::from(100u64));
    }

    #[test]
    fn corrupt_history_is_surfaced() {
        let err = parse(&with_history(80, 30)).unwrap_err();
        assert!(matches!(err, OrderError::InconsistentAvailability));
    }

    #[test]
    fn other_lengths_are_malformed() {
        for len in [0usize, 1, 376, 378, 440, 442] {
            let err = parse(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, OrderError::MalformedInput(_)), "len {len}");
        }
    }

    #[test]
    fn list_parse_splits_records() {
        let first = with_history(30, 20);
        let mut second_order = sample_order();
        second_order.salt = U256::from(9u64);
        let mut second = serialize(&SignedOrder::new(second_order, sample_signature())).unwrap();
        second.extend_from_slice(&[0u8; 64]);

        let mut stream = first.clone();
        stream.extend_from_slice(&second);

        let orders = parse_list(&stream).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0], parse(&first).unwrap());
        assert_eq!(orders[1], parse(&second).unwrap());
    }

    #[test]
    fn list_parse_discards_a_trailing_partial_record() {
        let mut stream = with_history(30, 20);
        stream.extend_from_slice(&[0u8; 17]);
        assert_eq!(parse_list(&stream).unwrap().len(), 1);
    }
}
