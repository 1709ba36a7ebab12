use crate::domain::ports::{EncodeOptions, Frame, QrCodec, QrImage};
use crate::error::CodecError;

const MAGIC: [u8; 4] = *b"QBQR";

/// Codec stand-in that stores the payload bytes directly in the pixel
/// buffer behind a magic/length header. Not scannable, but a deterministic
/// round-trip for everything that sits above the codec port.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCodec;

impl PassthroughCodec {
    pub fn new() -> Self {
        Self
    }
}

impl QrCodec for PassthroughCodec {
    fn encode(&self, text: &str, _opts: &EncodeOptions) -> Result<QrImage, CodecError> {
        let bytes = text.as_bytes();
        let len = u32::try_from(bytes.len())
            .map_err(|_| CodecError::Encode("payload too large".to_string()))?;

        let mut pixels = Vec::with_capacity(MAGIC.len() + 4 + bytes.len());
        pixels.extend_from_slice(&MAGIC);
        pixels.extend_from_slice(&len.to_be_bytes());
        pixels.extend_from_slice(bytes);

        Ok(QrImage {
            width: pixels.len() as u32,
            height: 1,
            pixels,
        })
    }

    fn decode(&self, frame: &Frame) -> Option<String> {
        let rest = frame.pixels.strip_prefix(&MAGIC)?;
        let (len_bytes, body) = rest.split_first_chunk::<4>()?;
        let len = u32::from_be_bytes(*len_bytes) as usize;
        let body = body.get(..len)?;
        String::from_utf8(body.to_vec()).ok()
    }
}
