use qrcode::{Color, QrCode};

use crate::domain::ports::{EncodeOptions, Frame, QrCodec, QrImage};
use crate::error::CodecError;

/// Real codec adapter: `qrcode` produces the module matrix, `rqrr` reads a
/// code back out of a greyscale frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrImageCodec;

impl QrImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl QrCodec for QrImageCodec {
    fn encode(&self, text: &str, opts: &EncodeOptions) -> Result<QrImage, CodecError> {
        let code = QrCode::new(text).map_err(|e| CodecError::Encode(e.to_string()))?;
        let modules = code.to_colors();
        let width = code.width();

        let scale = opts.module_scale.max(1) as usize;
        let quiet = opts.quiet_zone as usize;
        let side = (width + 2 * quiet) * scale;

        let mut pixels = vec![opts.light; side * side];
        for (i, color) in modules.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let mx = i % width;
            let my = i / width;
            for dy in 0..scale {
                let row = ((my + quiet) * scale + dy) * side + (mx + quiet) * scale;
                pixels[row..row + scale].fill(opts.dark);
            }
        }

        Ok(QrImage {
            width: side as u32,
            height: side as u32,
            pixels,
        })
    }

    fn decode(&self, frame: &Frame) -> Option<String> {
        let width = frame.width as usize;
        let height = frame.height as usize;
        if width == 0 || height == 0 || frame.pixels.len() < width * height {
            return None;
        }

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
            frame.pixels[y * width + x]
        });
        let grids = prepared.detect_grids();
        let grid = grids.first()?;
        match grid.decode() {
            Ok((_meta, content)) => Some(content),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_square_with_quiet_zone() {
        let codec = QrImageCodec::new();
        let opts = EncodeOptions::default();
        let image = codec.encode("hello", &opts).unwrap();

        assert_eq!(image.width, image.height);
        assert_eq!(image.pixels.len(), (image.width * image.height) as usize);
        // the quiet zone keeps the border light
        let border = (opts.quiet_zone * opts.module_scale) as usize;
        let side = image.width as usize;
        for x in 0..side {
            assert_eq!(image.pixels[x], opts.light);
            assert_eq!(image.pixels[(border - 1) * side + x], opts.light);
        }
    }

    #[test]
    fn test_round_trip() {
        let codec = QrImageCodec::new();
        let text = r#"{"accountNumber":"1234567890","customerName":"Jane Doe","serviceType":"Cash Deposit","amount":"150.00"}"#;
        let image = codec.encode(text, &EncodeOptions::default()).unwrap();
        let decoded = codec.decode(&Frame::from(image)).unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_blank_frame_is_no_match() {
        let codec = QrImageCodec::new();
        let frame = Frame {
            width: 64,
            height: 64,
            pixels: vec![255; 64 * 64],
        };
        assert_eq!(codec.decode(&frame), None);
    }
}
