//! # Simulator
//!
//! A stand-in panel for running without hardware. Frames are validated
//! exactly like the real driver and the latest one is kept for inspection.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{info, trace};

use crate::driver::Lcd;
use crate::error::DeviceResult;
use crate::frame::{self, HEIGHT, WIDTH};

/// Headless panel.
#[derive(Default)]
pub struct Simulator {
    frames: AtomicU64,
    last_frame: Mutex<Option<Vec<u8>>>,
}

impl Simulator {
    /// Creates a simulator that has shown nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames accepted so far.
    #[must_use]
    pub fn frames_shown(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Copy of the most recent frame's pixels.
    #[must_use]
    pub fn last_frame(&self) -> Option<Vec<u8>> {
        self.last_frame.lock().clone()
    }
}

impl Lcd for Simulator {
    fn image_size(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn send_frame(&self, pixels: &[u8]) -> DeviceResult<()> {
        frame::check_size(pixels)?;
        let mut last = self.last_frame.lock();
        match last.as_mut() {
            Some(buf) => buf.copy_from_slice(pixels),
            None => *last = Some(pixels.to_vec()),
        }
        let shown = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(shown, "simulated frame");
        Ok(())
    }

    fn reset(&self) -> DeviceResult<()> {
        info!("simulated device reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FRAME_PIXEL_BYTES;

    #[test]
    fn test_keeps_last_frame() {
        let sim = Simulator::new();
        assert!(sim.last_frame().is_none());
        sim.send_frame(&vec![1; FRAME_PIXEL_BYTES]).unwrap();
        sim.send_frame(&vec![2; FRAME_PIXEL_BYTES]).unwrap();
        assert_eq!(sim.frames_shown(), 2);
        assert_eq!(sim.last_frame().unwrap()[0], 2);
    }

    #[test]
    fn test_rejects_wrong_size() {
        let sim = Simulator::new();
        assert!(sim.send_frame(&[0; 3]).is_err());
        assert_eq!(sim.frames_shown(), 0);
        assert!(sim.reset().is_ok());
    }
}
