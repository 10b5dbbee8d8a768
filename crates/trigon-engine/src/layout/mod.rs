//! Vertex data and its layout.
//!
//! Convention:
//! - one interleaved record per vertex: `position` (2 x f32) then `colour`
//!   (3 x f32), 20 bytes
//! - positions are already in clip space; no transform is applied

mod bind;
mod vertex;

pub use bind::{AttributeBinding, AttributeSpec, BindError, BindReport, VertexLayout, VertexLayoutBinder};
pub use vertex::{VertexBuffer, VertexRecord, TRIANGLE, TRIANGLE_VERTEX_COUNT};
