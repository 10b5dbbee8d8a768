//! Event loop.
//!
//! Owns the `winit` EventLoop and turns its events into a quit intent.

mod runtime;

pub use runtime::WindowRuntime;
