mod error;
mod hash;
mod order;

pub mod binary;
pub mod json;
pub mod num;

pub use error::OrderError;
pub use hash::{ExchangeScheme, SignatureScheme};
pub use order::{generate_watermarked_salt, EcSignature, Order, SignedOrder, SALT_WATERMARK};
