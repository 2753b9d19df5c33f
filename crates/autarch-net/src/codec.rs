//! The wire codec: 32-bit little-endian length prefix followed by that
//! many bytes of a JSON envelope. Owns only the framing, never the
//! meaning of the payload inside it.

use autarch_core::wire::Envelope;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::FramingError;

/// Frames above this size are rejected outright; a well-formed snapshot or
/// command never approaches it, so a frame this large is either a bug in
/// the peer or a hostile input.
pub const MAX_FRAME_BYTES: u32 = 1024 * 1024;

/// Read one length-prefixed envelope. Returns `Ok(None)` on a clean EOF
/// before any byte of a new frame has been read (the normal way a
/// connection ends); any other I/O failure, or a length of zero or above
/// [`MAX_FRAME_BYTES`], is a [`FramingError`] that should close the
/// connection.
pub async fn read_envelope<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Option<Envelope>, FramingError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(FramingError::Io(err)),
    }

    let len = u32::from_le_bytes(len_buf);
    if len == 0 {
        return Err(FramingError::ZeroLength);
    }
    if len > MAX_FRAME_BYTES {
        return Err(FramingError::TooLarge(len));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    let envelope: Envelope = serde_json::from_slice(&body)?;
    Ok(Some(envelope))
}

/// Write one envelope as a length-prefixed JSON frame.
pub async fn write_envelope<W: AsyncWrite + Unpin>(writer: &mut W, envelope: &Envelope) -> Result<(), FramingError> {
    let body = serde_json::to_vec(envelope)?;
    let len = u32::try_from(body.len()).map_err(|_| FramingError::TooLarge(u32::MAX))?;
    if len > MAX_FRAME_BYTES {
        return Err(FramingError::TooLarge(len));
    }
    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}
