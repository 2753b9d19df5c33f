//! Wire framing and per-connection handling: the one piece of "transport"
//! this repository owns, since it is the contract boundary the rest of
//! the system is built against.

pub mod codec;
pub mod connection;
pub mod error;

pub use codec::{read_envelope, write_envelope, MAX_FRAME_BYTES};
pub use connection::{handle_connection, ConnectionConfig};
pub use error::{ConnectionError, FramingError};
