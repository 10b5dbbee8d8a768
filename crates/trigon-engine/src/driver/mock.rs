//! Recording driver for tests.
//!
//! Emulates just enough of a GL driver to exercise the shader pipeline:
//! compile status from a brace/`main` check, link status from attachment
//! validity, attribute slots from the `in` declarations of the vertex stage.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use super::{
    BufferHandle, Driver, DriverErrorCode, DriverString, ProgramHandle, ShaderHandle,
    VertexArrayHandle,
};
use crate::frame::Presenter;
use crate::shader::ShaderKind;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(ShaderKind, ShaderHandle),
    CompileShader(ShaderHandle),
    DeleteShader(ShaderHandle),
    CreateProgram(ProgramHandle),
    AttachShader(ProgramHandle, ShaderHandle),
    BindFragDataLocation(ProgramHandle, u32, String),
    LinkProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    UseProgram(Option<ProgramHandle>),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    CreateVertexArray(VertexArrayHandle),
    BindVertexArray(Option<VertexArrayHandle>),
    DeleteVertexArray(VertexArrayHandle),
    CreateBuffer(BufferHandle),
    BindArrayBuffer(Option<BufferHandle>),
    BufferData(usize),
    DeleteBuffer(BufferHandle),
    ClearColor([f32; 4]),
    Clear,
    DrawTriangles { first: i32, count: i32 },
    QueryString(DriverString),
}

#[derive(Debug)]
struct MockShader {
    kind: ShaderKind,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<ShaderHandle>,
    linked: bool,
    log: String,
    attributes: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct MockDriver {
    next_name: Cell<u32>,
    shaders: RefCell<HashMap<u32, MockShader>>,
    programs: RefCell<HashMap<u32, MockProgram>>,
    calls: RefCell<Vec<Call>>,
    pending_errors: RefCell<VecDeque<DriverErrorCode>>,
    silent_logs: bool,
    fail_shader_creation: bool,
    fail_buffer_creation: bool,
}

impl MockDriver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Failed compiles and links report an empty log.
    pub(crate) fn with_silent_logs() -> Self {
        Self {
            silent_logs: true,
            ..Self::default()
        }
    }

    /// Every `create_shader` call fails.
    pub(crate) fn with_failing_shader_creation() -> Self {
        Self {
            fail_shader_creation: true,
            ..Self::default()
        }
    }

    /// Every `create_buffer` call fails.
    pub(crate) fn with_failing_buffer_creation() -> Self {
        Self {
            fail_buffer_creation: true,
            ..Self::default()
        }
    }

    /// Queues a driver error to be returned by the next [`Driver::error`].
    pub(crate) fn push_error(&self, code: DriverErrorCode) {
        self.pending_errors.borrow_mut().push_back(code);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn live_shaders(&self) -> usize {
        self.shaders.borrow().len()
    }

    pub(crate) fn live_programs(&self) -> usize {
        self.programs.borrow().len()
    }

    pub(crate) fn attached(&self, program: ProgramHandle) -> Vec<ShaderHandle> {
        self.programs
            .borrow()
            .get(&program.raw())
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self) -> u32 {
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        name
    }
}

/// Accepts sources with balanced braces/parens and a `main` function.
fn check_syntax(source: &str) -> Result<(), String> {
    let mut depth_brace = 0i32;
    let mut depth_paren = 0i32;
    for ch in source.chars() {
        match ch {
            '{' => depth_brace += 1,
            '}' => depth_brace -= 1,
            '(' => depth_paren += 1,
            ')' => depth_paren -= 1,
            _ => {}
        }
        if depth_brace < 0 || depth_paren < 0 {
            return Err("0:1(1): error: syntax error, unexpected '}'".to_string());
        }
    }
    if depth_brace != 0 || depth_paren != 0 {
        return Err("0:1(1): error: syntax error, unexpected end of file".to_string());
    }
    if !source.contains("void main()") {
        return Err("0:1(1): error: function `main' is not defined".to_string());
    }
    Ok(())
}

/// Names of `in` declarations, in declaration order.
fn declared_inputs(source: &str) -> Vec<String> {
    source
        .split(';')
        .filter_map(|stmt| {
            let line = stmt.lines().last()?.trim();
            let rest = line.strip_prefix("in ")?;
            rest.split_whitespace().last().map(str::to_string)
        })
        .collect()
}

impl Driver for MockDriver {
    fn create_shader(&self, kind: ShaderKind) -> Result<ShaderHandle, String> {
        if self.fail_shader_creation {
            return Err("out of shader objects".to_string());
        }
        let name = self.alloc();
        self.shaders.borrow_mut().insert(
            name,
            MockShader {
                kind,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        let h = ShaderHandle::from_raw(name);
        self.record(Call::CreateShader(kind, h));
        Ok(h)
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        if let Some(s) = self.shaders.borrow_mut().get_mut(&shader.raw()) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        self.record(Call::CompileShader(shader));
        let silent = self.silent_logs;
        if let Some(s) = self.shaders.borrow_mut().get_mut(&shader.raw()) {
            match check_syntax(&s.source) {
                Ok(()) => {
                    s.compiled = true;
                    s.log.clear();
                }
                Err(log) => {
                    s.compiled = false;
                    s.log = if silent { String::new() } else { log };
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.shaders
            .borrow()
            .get(&shader.raw())
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.shaders
            .borrow()
            .get(&shader.raw())
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.record(Call::DeleteShader(shader));
        self.shaders.borrow_mut().remove(&shader.raw());
    }

    fn create_program(&self) -> Result<ProgramHandle, String> {
        let name = self.alloc();
        self.programs
            .borrow_mut()
            .insert(name, MockProgram::default());
        let h = ProgramHandle::from_raw(name);
        self.record(Call::CreateProgram(h));
        Ok(h)
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(Call::AttachShader(program, shader));
        if let Some(p) = self.programs.borrow_mut().get_mut(&program.raw()) {
            p.attached.push(shader);
        }
    }

    fn bind_frag_data_location(&self, program: ProgramHandle, color_number: u32, name: &str) {
        self.record(Call::BindFragDataLocation(program, color_number, name.to_string()));
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record(Call::LinkProgram(program));
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        let Some(p) = programs.get_mut(&program.raw()) else { return };

        let mut errors = Vec::new();
        let mut stages = Vec::new();
        let mut inputs = Vec::new();
        for h in &p.attached {
            match shaders.get(&h.raw()) {
                Some(s) if s.compiled => {
                    stages.push(s.kind);
                    if s.kind == ShaderKind::Vertex {
                        inputs = declared_inputs(&s.source);
                    }
                }
                Some(_) => errors.push(format!("error: {h:?} was not successfully compiled")),
                None => errors.push(format!("error: {h:?} is not a valid shader object")),
            }
        }
        for required in [ShaderKind::Vertex, ShaderKind::Fragment] {
            if !stages.contains(&required) {
                errors.push(format!("error: program lacks a {} stage", required.name()));
            }
        }

        p.linked = errors.is_empty();
        p.log = if self.silent_logs { String::new() } else { errors.join("\n") };
        p.attributes = if p.linked { inputs } else { Vec::new() };
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.programs
            .borrow()
            .get(&program.raw())
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.programs
            .borrow()
            .get(&program.raw())
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record(Call::DeleteProgram(program));
        self.programs.borrow_mut().remove(&program.raw());
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.record(Call::UseProgram(program));
    }

    fn attrib_location(&self, program: ProgramHandle, name: &str) -> Option<u32> {
        let programs = self.programs.borrow();
        let p = programs.get(&program.raw())?;
        p.attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            normalized,
            stride,
            offset,
        });
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle, String> {
        let h = VertexArrayHandle::from_raw(self.alloc());
        self.record(Call::CreateVertexArray(h));
        Ok(h)
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<BufferHandle, String> {
        if self.fail_buffer_creation {
            return Err("out of buffer objects".to_string());
        }
        let h = BufferHandle::from_raw(self.alloc());
        self.record(Call::CreateBuffer(h));
        Ok(h)
    }

    fn bind_array_buffer(&self, buffer: Option<BufferHandle>) {
        self.record(Call::BindArrayBuffer(buffer));
    }

    fn buffer_data_static(&self, data: &[u8]) {
        self.record(Call::BufferData(data.len()));
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(Call::DrawTriangles { first, count });
    }

    fn error(&self) -> Option<DriverErrorCode> {
        self.pending_errors.borrow_mut().pop_front()
    }

    fn query_string(&self, query: DriverString) -> String {
        self.record(Call::QueryString(query));
        match query {
            DriverString::Version => "3.2.0 Mock",
            DriverString::ShadingLanguageVersion => "1.50 Mock",
            DriverString::Vendor => "Trigon",
            DriverString::Renderer => "Mock Renderer",
        }
        .to_string()
    }
}

/// Presenter that reports a quit intent on poll number `quit_on_poll`
/// (0-based) and counts presented frames.
#[derive(Debug)]
pub(crate) struct ScriptedPresenter {
    quit_on_poll: usize,
    pub(crate) polls: usize,
    pub(crate) presents: usize,
    present_failure: Option<String>,
}

impl ScriptedPresenter {
    pub(crate) fn quit_on_poll(quit_on_poll: usize) -> Self {
        Self {
            quit_on_poll,
            polls: 0,
            presents: 0,
            present_failure: None,
        }
    }

    pub(crate) fn failing_present(mut self, message: &str) -> Self {
        self.present_failure = Some(message.to_string());
        self
    }
}

impl Presenter for ScriptedPresenter {
    fn poll_quit_intent(&mut self) -> bool {
        let quit = self.polls >= self.quit_on_poll;
        self.polls += 1;
        quit
    }

    fn present_frame(&mut self) -> anyhow::Result<()> {
        self.presents += 1;
        match &self.present_failure {
            Some(msg) => Err(anyhow::anyhow!("{msg}")),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_inputs_reads_single_line_sources() {
        let src = "#version 150 core\nin vec2 position;in vec3 colour;out vec3 Colour;void main() { }";
        assert_eq!(declared_inputs(src), vec!["position", "colour"]);
    }

    #[test]
    fn syntax_check_rejects_unbalanced_braces() {
        assert!(check_syntax("void main() { ").is_err());
        assert!(check_syntax("void main() { }").is_ok());
    }
}
