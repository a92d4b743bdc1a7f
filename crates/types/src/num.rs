//! Conversions between 256-bit integers and the fixed-width big-endian
//! buffers and decimal strings used by the wire formats.

use alloy_primitives::{U256, U512};

use crate::OrderError;

/// Minimal big-endian bytes of `value`, left-padded with zeros to `width`.
pub fn to_fixed_be_bytes(value: U256, width: usize) -> Result<Vec<u8>, OrderError> {
    let len = value.byte_len();
    if len > width {
        return Err(OrderError::ValueOverflow { width });
    }
    let mut out = vec![0u8; width];
    out[width - len..].copy_from_slice(&value.to_be_bytes_trimmed_vec());
    Ok(out)
}

/// `a * b / d`, truncating, with the product widened to 512 bits so it
/// cannot overflow. Callers must keep `b <= d` so the quotient fits back
/// into 256 bits. A zero `d` yields zero.
pub fn mul_div(a: U256, b: U256, d: U256) -> U256 {
    if d.is_zero() {
        return U256::ZERO;
    }
    let wide = widen(a) * widen(b) / widen(d);
    let bytes = wide.to_be_bytes::<64>();
    U256::from_be_slice(&bytes[32..])
}

fn widen(value: U256) -> U512 {
    U512::from_be_slice(&value.to_be_bytes::<32>())
}

/// Serde adapter rendering a `U256` as a decimal string, the only numeric
/// encoding that survives the JSON boundary without precision loss.
pub mod decimal {
    use core::str::FromStr;

    use alloy_primitives::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let text = String::deserialize(deserializer)?;
        U256::from_str(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::OrderError;

    #[test]
    fn fixed_width_pads_on_the_left() {
        let bytes = to_fixed_be_bytes(U256::from(0x1234u64), 4).unwrap();
        assert_eq!(bytes, vec![0, 0, 0x12, 0x34]);
    }

    #[test]
    fn zero_fills_the_whole_width() {
        assert_eq!(to_fixed_be_bytes(U256::ZERO, 32).unwrap(), vec![0u8; 32]);
    }

    #[test]
    fn oversized_value_is_an_overflow() {
        let err = to_fixed_be_bytes(U256::MAX, 20).unwrap_err();
        assert!(matches!(err, OrderError::ValueOverflow { width: 20 }));
    }

    #[test]
    fn mul_div_truncates() {
        let q = mul_div(U256::from(10u64), U256::from(3u64), U256::from(4u64));
        assert_eq!(q, U256::from(7u64));
    }

    #[test]
    fn mul_div_survives_a_wide_product() {
        assert_eq!(
            mul_div(U256::MAX, U256::from(2u64), U256::from(2u64)),
            U256::MAX
        );
    }

    #[test]
    fn mul_div_by_zero_is_zero() {
        assert_eq!(
            mul_div(U256::from(5u64), U256::from(5u64), U256::ZERO),
            U256::ZERO
        );
    }

    #[derive(Serialize, Deserialize)]
    struct Wrapper(#[serde(with = "decimal")] U256);

    #[test]
    fn decimal_serde_round_trips() {
        let text = serde_json::to_string(&Wrapper(U256::from(1_000_000_000_000_000_000u64))).unwrap();
        assert_eq!(text, "\"1000000000000000000\"");
        let back: Wrapper = serde_json::from_str(&text).unwrap();
        assert_eq!(back.0, U256::from(1_000_000_000_000_000_000u64));
    }
}
