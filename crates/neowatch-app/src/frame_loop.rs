//! Fixed-timestep frame pacing.
//!
//! Wall-clock time is banked in an accumulator and paid out in whole 60 Hz
//! steps, so asteroid spin and the moon's orbit advance at the same rate no
//! matter how often frames are drawn.

use std::time::Instant;
use tracing::warn;

/// Fixed animation step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Frame times above this are clamped; the scene slows down instead of
/// running dozens of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct FrameLoop {
    previous_time: Instant,
    accumulator: f64,
    frame_count: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            frame_count: 0,
        }
    }

    /// Start a frame. Returns how many [`FIXED_DT`] steps are due.
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
        }
        self.step(frame_time)
    }

    /// [`tick`](Self::tick) with an explicit frame time in seconds.
    pub fn step(&mut self, frame_time: f64) -> u32 {
        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);
        let mut steps = 0;
        while self.accumulator >= FIXED_DT {
            self.accumulator -= FIXED_DT;
            steps += 1;
        }
        self.frame_count += 1;
        steps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
