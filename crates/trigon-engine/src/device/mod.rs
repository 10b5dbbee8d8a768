//! GL context management.
//!
//! This module is responsible for:
//! - creating the native window with a GL-capable config
//! - creating a core-profile context and making it current
//! - loading GL entry points and checking the context version
//! - presenting frames and tearing everything down in order

mod context;
mod init;

pub use context::{DrawSurface, GraphicsContext};
pub use init::{ColorBits, ContextInit};
