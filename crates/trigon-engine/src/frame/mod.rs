//! Frame loop.
//!
//! `Running` -> `QuitRequested` -> `Terminated`. Each `Running` step is one
//! whole frame (poll, clear, draw, present); the quit check happens only
//! between frames.

mod frame_loop;
mod state;

pub use frame_loop::{FrameFault, FrameLoop, FrameReport, Presenter};
pub use state::FrameState;
