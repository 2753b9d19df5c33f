//! Error tiers for the socket boundary: framing errors and read/write
//! failures are connection-scoped — they close the one connection that
//! produced them without affecting any other.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("frame length must be nonzero")]
    ZeroLength,

    #[error("frame length {0} exceeds the 1 MiB limit")]
    TooLarge(u32),

    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("envelope did not parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error("connection closed before hello")]
    NoHello,

    #[error("expected hello as the first message, got {0:?}")]
    UnexpectedFirstMessage(String),
}
