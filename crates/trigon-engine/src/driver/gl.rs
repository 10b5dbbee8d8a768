use std::cell::RefCell;
use std::collections::HashMap;

use glow::HasContext;

use super::{
    BufferHandle, Driver, DriverErrorCode, DriverString, ProgramHandle, ShaderHandle,
    VertexArrayHandle,
};
use crate::shader::ShaderKind;

/// [`Driver`] backed by a `glow` context.
///
/// The context must be current on the calling thread for the lifetime of the
/// driver. `GraphicsContext` guarantees this by owning both.
pub struct GlowDriver {
    gl: glow::Context,
    rejected: RejectedAttachments,
}

impl GlowDriver {
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            rejected: RejectedAttachments::default(),
        }
    }

    /// Context version as `(major, minor)`.
    pub fn version(&self) -> (u32, u32) {
        let v = self.gl.version();
        (v.major, v.minor)
    }
}

/// Programs that had the null shader attached, with the reason.
///
/// `glow` cannot express attaching object 0, so the rejected attach is
/// remembered here and surfaces as a failed link, as it would on the driver.
#[derive(Debug, Default)]
struct RejectedAttachments {
    reasons: RefCell<HashMap<u32, String>>,
}

impl RejectedAttachments {
    const NULL_SHADER: &'static str = "attached shader object 0 is not a valid shader";

    fn reject_null_shader(&self, program: ProgramHandle) {
        self.reasons
            .borrow_mut()
            .insert(program.raw(), Self::NULL_SHADER.to_string());
    }

    fn is_rejected(&self, program: ProgramHandle) -> bool {
        self.reasons.borrow().contains_key(&program.raw())
    }

    /// Appends the rejection reason, if any, to the driver's link log.
    fn annotate(&self, program: ProgramHandle, mut log: String) -> String {
        if let Some(reason) = self.reasons.borrow().get(&program.raw()) {
            if !log.is_empty() && !log.ends_with('\n') {
                log.push('\n');
            }
            log.push_str(reason);
        }
        log
    }

    fn forget(&self, program: ProgramHandle) {
        self.reasons.borrow_mut().remove(&program.raw());
    }
}

#[inline]
fn shader(h: ShaderHandle) -> Option<glow::NativeShader> {
    h.non_null().map(glow::NativeShader)
}

#[inline]
fn program(h: ProgramHandle) -> Option<glow::NativeProgram> {
    h.non_null().map(glow::NativeProgram)
}

#[inline]
fn buffer(h: BufferHandle) -> Option<glow::NativeBuffer> {
    h.non_null().map(glow::NativeBuffer)
}

#[inline]
fn vertex_array(h: VertexArrayHandle) -> Option<glow::NativeVertexArray> {
    h.non_null().map(glow::NativeVertexArray)
}

fn shader_type(kind: ShaderKind) -> u32 {
    match kind {
        ShaderKind::Vertex => glow::VERTEX_SHADER,
        ShaderKind::Fragment => glow::FRAGMENT_SHADER,
        ShaderKind::Geometry => glow::GEOMETRY_SHADER,
    }
}

// SAFETY (all blocks below): the context is current on this thread and every
// object name passed in was produced by this context.
impl Driver for GlowDriver {
    fn create_shader(&self, kind: ShaderKind) -> Result<ShaderHandle, String> {
        let s = unsafe { self.gl.create_shader(shader_type(kind)) }?;
        Ok(s.0.into())
    }

    fn shader_source(&self, h: ShaderHandle, source: &str) {
        if let Some(s) = shader(h) {
            unsafe { self.gl.shader_source(s, source) };
        }
    }

    fn compile_shader(&self, h: ShaderHandle) {
        if let Some(s) = shader(h) {
            unsafe { self.gl.compile_shader(s) };
        }
    }

    fn shader_compile_status(&self, h: ShaderHandle) -> bool {
        shader(h).is_some_and(|s| unsafe { self.gl.get_shader_compile_status(s) })
    }

    fn shader_info_log(&self, h: ShaderHandle) -> String {
        shader(h)
            .map(|s| unsafe { self.gl.get_shader_info_log(s) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, h: ShaderHandle) {
        if let Some(s) = shader(h) {
            unsafe { self.gl.delete_shader(s) };
        }
    }

    fn create_program(&self) -> Result<ProgramHandle, String> {
        let p = unsafe { self.gl.create_program() }?;
        Ok(p.0.into())
    }

    fn attach_shader(&self, p: ProgramHandle, s: ShaderHandle) {
        let Some(p_native) = program(p) else { return };
        match shader(s) {
            Some(s) => unsafe { self.gl.attach_shader(p_native, s) },
            None => self.rejected.reject_null_shader(p),
        }
    }

    fn bind_frag_data_location(&self, p: ProgramHandle, color_number: u32, name: &str) {
        if let Some(p) = program(p) {
            unsafe { self.gl.bind_frag_data_location(p, color_number, name) };
        }
    }

    fn link_program(&self, p: ProgramHandle) {
        if let Some(p) = program(p) {
            unsafe { self.gl.link_program(p) };
        }
    }

    fn program_link_status(&self, p: ProgramHandle) -> bool {
        if self.rejected.is_rejected(p) {
            return false;
        }
        program(p).is_some_and(|p| unsafe { self.gl.get_program_link_status(p) })
    }

    fn program_info_log(&self, p: ProgramHandle) -> String {
        let log = program(p)
            .map(|p| unsafe { self.gl.get_program_info_log(p) })
            .unwrap_or_default();
        self.rejected.annotate(p, log)
    }

    fn delete_program(&self, p: ProgramHandle) {
        self.rejected.forget(p);
        if let Some(p) = program(p) {
            unsafe { self.gl.delete_program(p) };
        }
    }

    fn use_program(&self, p: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(p.and_then(program)) };
    }

    fn attrib_location(&self, p: ProgramHandle, name: &str) -> Option<u32> {
        program(p).and_then(|p| unsafe { self.gl.get_attrib_location(p, name) })
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) };
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, glow::FLOAT, normalized, stride, offset)
        };
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle, String> {
        let v = unsafe { self.gl.create_vertex_array() }?;
        Ok(v.0.into())
    }

    fn bind_vertex_array(&self, v: Option<VertexArrayHandle>) {
        unsafe { self.gl.bind_vertex_array(v.and_then(vertex_array)) };
    }

    fn delete_vertex_array(&self, v: VertexArrayHandle) {
        if let Some(v) = vertex_array(v) {
            unsafe { self.gl.delete_vertex_array(v) };
        }
    }

    fn create_buffer(&self) -> Result<BufferHandle, String> {
        let b = unsafe { self.gl.create_buffer() }?;
        Ok(b.0.into())
    }

    fn bind_array_buffer(&self, b: Option<BufferHandle>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, b.and_then(buffer)) };
    }

    fn buffer_data_static(&self, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW)
        };
    }

    fn delete_buffer(&self, b: BufferHandle) {
        if let Some(b) = buffer(b) {
            unsafe { self.gl.delete_buffer(b) };
        }
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe { self.gl.clear_color(r, g, b, a) };
    }

    fn clear_color_buffer(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) };
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, first, count) };
    }

    fn error(&self) -> Option<DriverErrorCode> {
        match unsafe { self.gl.get_error() } {
            glow::NO_ERROR => None,
            code => Some(code),
        }
    }

    fn query_string(&self, query: DriverString) -> String {
        let name = match query {
            DriverString::Version => glow::VERSION,
            DriverString::ShadingLanguageVersion => glow::SHADING_LANGUAGE_VERSION,
            DriverString::Vendor => glow::VENDOR,
            DriverString::Renderer => glow::RENDERER,
        };
        unsafe { self.gl.get_parameter_string(name) }
    }
}
