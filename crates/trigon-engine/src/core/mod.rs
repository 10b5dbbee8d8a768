//! Setup and top-level wiring.
//!
//! [`Scene`] composes compiler, linker and binder into one all-or-nothing
//! setup step; [`run`] adds the window/context around it and drives the
//! frame loop.

mod error;
mod harness;
mod scene;

pub use error::{check_version, SetupError};
pub use harness::{drive, identify_driver, run, HarnessConfig};
pub use scene::{Scene, SceneConfig};
