//! Camera-side scanning flow, modelled as an owned resource.
//!
//! The capture device behaves like a lock: while one scanner holds it, no
//! other component can open the camera. The `Scanner` therefore owns its
//! `FrameSource` and drives an explicit state machine
//! (`Idle -> Scanning -> Stopped`, startable again after a stop), releasing
//! the device on every exit path: decode, explicit stop, source error, or
//! drop. Decoding itself is a third-party concern behind the `Decode` trait;
//! a frame with no readable code in it is noise, not an error, and is
//! filtered here.

use thiserror::Error;
use tracing::debug;

/// A stream of camera frames. `open` acquires the capture device, `close`
/// releases it. `next_frame` yields `Ok(None)` when no frame is currently
/// available.
pub trait FrameSource {
    type Frame;

    fn open(&mut self) -> Result<(), ScanError>;
    fn next_frame(&mut self) -> Result<Option<Self::Frame>, ScanError>;
    fn close(&mut self);
}

pub trait Decode<F> {
    /// `None` when the frame holds no readable code.
    fn decode(&self, frame: &F) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    Idle,
    Scanning,
    Stopped,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("capture device unavailable: {0}")]
    Device(String),
    #[error("scanner is not scanning")]
    NotScanning,
}

pub struct Scanner<S: FrameSource, D> {
    source: S,
    decoder: D,
    state: ScannerState,
}

impl<S: FrameSource, D> Scanner<S, D> {
    pub fn new(source: S, decoder: D) -> Self {
        Self {
            source,
            decoder,
            state: ScannerState::Idle,
        }
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    /// Acquires the capture device. Starting an already-scanning scanner is
    /// a no-op; a stopped scanner can be started again.
    pub fn start(&mut self) -> Result<(), ScanError> {
        if self.state == ScannerState::Scanning {
            return Ok(());
        }
        self.source.open()?;
        self.state = ScannerState::Scanning;
        Ok(())
    }

    /// Idempotent: stopping twice releases the device once.
    pub fn stop(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.state == ScannerState::Scanning {
            self.source.close();
        }
        self.state = ScannerState::Stopped;
    }
}

impl<S: FrameSource, D: Decode<S::Frame>> Scanner<S, D> {
    /// Pumps frames until a code is decoded or the source has nothing more
    /// to offer. On a decode the capture device is released BEFORE the
    /// payload is returned, so verification never runs while frames are
    /// still coming in.
    pub fn poll(&mut self) -> Result<Option<String>, ScanError> {
        if self.state != ScannerState::Scanning {
            return Err(ScanError::NotScanning);
        }
        loop {
            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => return Ok(None),
                Err(e) => {
                    self.release();
                    return Err(e);
                }
            };
            match self.decoder.decode(&frame) {
                Some(code) => {
                    self.release();
                    return Ok(Some(code));
                }
                None => {
                    // No code in this frame. Keep pumping.
                    debug!("frame without readable code, skipping");
                }
            }
        }
    }
}

impl<S: FrameSource, D> Drop for Scanner<S, D> {
    fn drop(&mut self) {
        // Teardown must never leak the capture device, even without an
        // explicit stop.
        self.release();
    }
}
