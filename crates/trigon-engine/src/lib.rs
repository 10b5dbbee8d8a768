//! Trigon engine crate.
//!
//! A minimal real-time rendering harness: window + GL context, a two-stage
//! shader program, one static triangle, and a polling frame loop.

pub mod driver;
pub mod shader;
pub mod program;
pub mod layout;

pub mod device;
pub mod window;
pub mod time;
pub mod frame;
pub mod core;

pub mod logging;
