//! Frame timing.
//!
//! The loop is unpaced, so timing is only observed, never enforced:
//! call `tick()` once per presented frame and read the totals at shutdown.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
