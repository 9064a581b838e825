//! Time management utilities

use std::time::Instant;

/// Timing information handed to every per-frame update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame
    pub delta: f32,
    /// Seconds since the clock started
    pub elapsed: f64,
}

impl FrameTime {
    /// Create frame timing from explicit values
    pub fn new(delta: f32, elapsed: f64) -> Self {
        Self { delta, elapsed }
    }
}

/// Frame clock producing [`FrameTime`] samples.
///
/// Can be driven from the wall clock with [`FrameClock::tick`], or stepped
/// deterministically with [`FrameClock::advance`] for scripted runs and tests.
pub struct FrameClock {
    last_frame: Instant,
    elapsed: f64,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock starting at zero
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Sample the wall clock (should be called once per frame)
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(delta)
    }

    /// Step the clock by a fixed amount without touching the wall clock
    pub fn advance(&mut self, delta: f32) -> FrameTime {
        let delta = delta.max(0.0);
        self.elapsed += f64::from(delta);
        self.frame_count += 1;
        FrameTime::new(delta, self.elapsed)
    }

    /// Total elapsed seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames produced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
