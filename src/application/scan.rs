use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::ports::{CameraSourceBox, Facing, QrCodecRef};
use crate::error::CameraError;

/// Default tick pacing, roughly one visual frame at 60Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Cooperative cancellation flag shared between a scan and its owner.
/// Checked at the top of every tick.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A payload was decoded. Delivered at most once per scan.
    Decoded(String),
    Cancelled,
}

/// Captures frames from the camera at frame cadence and hands each one to
/// the codec until a decode succeeds or the caller cancels.
pub struct ScanPipeline {
    camera: CameraSourceBox,
    codec: QrCodecRef,
    frame_interval: Duration,
}

impl ScanPipeline {
    pub fn new(camera: CameraSourceBox, codec: QrCodecRef) -> Self {
        Self {
            camera,
            codec,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Runs one scan session. The stream is exclusively owned by this call
    /// and released (all tracks stopped) on success or cancellation,
    /// whichever occurs first.
    ///
    /// Acquisition failure is returned as-is; there is no automatic retry.
    /// Re-invoking `scan` is the only recovery path.
    pub async fn scan(
        &self,
        facing: Facing,
        cancel: &CancelToken,
    ) -> Result<ScanOutcome, CameraError> {
        let mut stream = match self.camera.acquire(facing).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!(%err, "camera acquisition failed");
                return Err(err);
            }
        };
        info!("camera stream acquired, scanning");

        loop {
            if cancel.is_cancelled() {
                stream.stop();
                info!("scan cancelled, camera released");
                return Ok(ScanOutcome::Cancelled);
            }
            if let Some(frame) = stream.try_frame() {
                if let Some(text) = self.codec.decode(&frame) {
                    // A cancel racing the decode wins; nothing is emitted.
                    if cancel.is_cancelled() {
                        stream.stop();
                        return Ok(ScanOutcome::Cancelled);
                    }
                    stream.stop();
                    info!(len = text.len(), "QR payload decoded");
                    return Ok(ScanOutcome::Decoded(text));
                }
                debug!("no code in frame");
            }
            tokio::time::sleep(self.frame_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
