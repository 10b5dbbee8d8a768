use std::time::{Duration, Instant};

/// Timing snapshot for one presented frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the previous tick (or since the clock started), in seconds.
    pub dt: f32,

    /// Zero-based index of the frame.
    pub frame_index: u64,
}

/// Counts presented frames and the time they took.
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            frames: 0,
        }
    }

    /// Records one presented frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frames,
        };
        self.frames += 1;
        ft
    }

    /// Frames recorded so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Mean frames per second over the clock's lifetime; 0 before any frame.
    pub fn average_fps(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if self.frames == 0 || secs <= 0.0 {
            0.0
        } else {
            self.frames as f64 / secs
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
