use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{CameraError, CodecError};

/// 8-bit luma image produced by the QR encoder. 0 is a dark pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// One captured camera frame, same pixel convention as [`QrImage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl From<QrImage> for Frame {
    /// A perfect capture of a displayed code.
    fn from(image: QrImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Environment,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Pixels per QR module.
    pub module_scale: u32,
    /// Light border, in modules, around the code.
    pub quiet_zone: u32,
    pub dark: u8,
    pub light: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            module_scale: 8,
            quiet_zone: 4,
            dark: 0,
            light: 255,
        }
    }
}

/// The QR codec consumed by both flows. Algorithm is opaque; the core only
/// needs these two operations.
pub trait QrCodec: Send + Sync {
    fn encode(&self, text: &str, opts: &EncodeOptions) -> Result<QrImage, CodecError>;

    /// `None` while no code is in view. That is the expected steady state
    /// of a scan, never an error.
    fn decode(&self, frame: &Frame) -> Option<String>;
}

#[async_trait]
pub trait CameraSource: Send + Sync {
    /// Requests a camera stream. The only suspending operation in the
    /// system: it awaits an external grant and may be denied.
    async fn acquire(&self, facing: Facing) -> Result<Box<dyn CameraStream>, CameraError>;
}

pub trait CameraStream: Send {
    /// Readiness predicate, polled once per scheduled tick. `None` means
    /// the next frame is not yet fully available.
    fn try_frame(&mut self) -> Option<Frame>;

    /// Stops all active tracks. Idempotent.
    fn stop(&mut self);

    fn active_tracks(&self) -> usize;
}

pub type QrCodecRef = Arc<dyn QrCodec>;
pub type CameraSourceBox = Box<dyn CameraSource>;
