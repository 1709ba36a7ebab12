use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::ports::{CameraSource, CameraStream, Facing, Frame};
use crate::error::CameraError;

/// In-memory camera fed from a prepared frame script.
///
/// Each script entry is one tick of capture: `None` models a frame that is
/// not yet fully available, `Some` a captured frame. The script and the
/// active-track counter are shared with every stream handed out, so release
/// is observable from outside the scan.
#[derive(Default, Clone)]
pub struct ScriptedCamera {
    frames: Arc<Mutex<VecDeque<Option<Frame>>>>,
    tracks: Arc<AtomicUsize>,
}

impl ScriptedCamera {
    pub fn new(script: Vec<Option<Frame>>) -> Self {
        Self {
            frames: Arc::new(Mutex::new(script.into())),
            tracks: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A script of `warmup` not-yet-ready ticks followed by one capture.
    pub fn warmup_then(warmup: usize, frame: Frame) -> Self {
        let mut script: Vec<Option<Frame>> = vec![None; warmup];
        script.push(Some(frame));
        Self::new(script)
    }

    /// Script entries not yet served, ready or not.
    pub fn frames_remaining(&self) -> usize {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn active_tracks(&self) -> usize {
        self.tracks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraSource for ScriptedCamera {
    async fn acquire(&self, _facing: Facing) -> Result<Box<dyn CameraStream>, CameraError> {
        self.tracks.store(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedStream {
            frames: Arc::clone(&self.frames),
            tracks: Arc::clone(&self.tracks),
        }))
    }
}

struct ScriptedStream {
    frames: Arc<Mutex<VecDeque<Option<Frame>>>>,
    tracks: Arc<AtomicUsize>,
}

impl CameraStream for ScriptedStream {
    fn try_frame(&mut self) -> Option<Frame> {
        if self.tracks.load(Ordering::SeqCst) == 0 {
            return None;
        }
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .flatten()
    }

    fn stop(&mut self) {
        self.tracks.store(0, Ordering::SeqCst);
    }

    fn active_tracks(&self) -> usize {
        self.tracks.load(Ordering::SeqCst)
    }
}

impl Drop for ScriptedStream {
    // teardown releases the tracks even without an explicit stop
    fn drop(&mut self) {
        self.stop();
    }
}

/// Camera that never grants a stream: permission denied, or no device.
pub struct UnavailableCamera {
    reason: String,
}

impl UnavailableCamera {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CameraSource for UnavailableCamera {
    async fn acquire(&self, _facing: Facing) -> Result<Box<dyn CameraStream>, CameraError> {
        Err(CameraError::Unavailable(self.reason.clone()))
    }
}
