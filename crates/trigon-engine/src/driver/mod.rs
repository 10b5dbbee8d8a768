//! Graphics driver seam.
//!
//! Every call takes the objects it operates on explicitly. Implementations may
//! keep driver-side "current" state internally, but callers never rely on a
//! binding outliving the operation that made it.
//!
//! - [`GlowDriver`] talks to a live OpenGL context through `glow`
//! - the test-only mock records calls and emulates compile/link results

mod gl;
mod handle;
mod info;

#[cfg(test)]
pub(crate) mod mock;

pub use gl::GlowDriver;
pub use handle::{BufferHandle, ProgramHandle, ShaderHandle, VertexArrayHandle};
pub use info::{DriverInfo, DriverString};

use crate::shader::ShaderKind;

/// Raw driver error code as returned by the error flag query.
pub type DriverErrorCode = u32;

/// Minimal driver surface needed by the harness.
///
/// Object creation is the only fallible call; everything else mirrors the
/// driver's fire-and-forget behavior and reports problems through status
/// queries or [`Driver::error`].
pub trait Driver {
    // shaders
    fn create_shader(&self, kind: ShaderKind) -> Result<ShaderHandle, String>;
    fn shader_source(&self, shader: ShaderHandle, source: &str);
    fn compile_shader(&self, shader: ShaderHandle);
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    /// Returns the compiler log. An empty string is a valid log.
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&self, shader: ShaderHandle);

    // programs
    fn create_program(&self) -> Result<ProgramHandle, String>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn bind_frag_data_location(&self, program: ProgramHandle, color_number: u32, name: &str);
    fn link_program(&self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;
    fn delete_program(&self, program: ProgramHandle);
    fn use_program(&self, program: Option<ProgramHandle>);

    // vertex input
    /// Slot of a named vertex attribute; `None` when the linked program has no
    /// active attribute with that name.
    fn attrib_location(&self, program: ProgramHandle, name: &str) -> Option<u32>;
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    // vertex arrays and buffers
    fn create_vertex_array(&self) -> Result<VertexArrayHandle, String>;
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>);
    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle);
    fn create_buffer(&self) -> Result<BufferHandle, String>;
    fn bind_array_buffer(&self, buffer: Option<BufferHandle>);
    /// Uploads `data` into the bound array buffer with a static usage hint.
    fn buffer_data_static(&self, data: &[u8]);
    fn delete_buffer(&self, buffer: BufferHandle);

    // frame
    fn clear_color(&self, rgba: [f32; 4]);
    fn clear_color_buffer(&self);
    fn draw_triangles(&self, first: i32, count: i32);

    // diagnostics
    /// Pops the driver error flag; `None` when no error is pending.
    fn error(&self) -> Option<DriverErrorCode>;
    fn query_string(&self, query: DriverString) -> String;
}
