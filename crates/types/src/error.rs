use thiserror::Error;

/// Failures produced by the codecs and order math. All of them are
/// synchronous and leave no partial result behind.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Input bytes or text do not decode into an order.
    #[error("malformed order input: {0}")]
    MalformedInput(String),

    /// The attached signature does not recover to the maker.
    #[error("order signature is invalid")]
    InvalidSignature,

    /// A numeric value does not fit its fixed serialization width.
    #[error("value does not fit in {width} bytes")]
    ValueOverflow { width: usize },

    /// Filled plus cancelled amounts exceed the taker amount, which only
    /// happens when the relay served corrupt fill history.
    #[error("filled and cancelled amounts exceed the taker token amount")]
    InconsistentAvailability,

    /// Producing a signature failed.
    #[error("signing failed: {0}")]
    Signer(String),
}
