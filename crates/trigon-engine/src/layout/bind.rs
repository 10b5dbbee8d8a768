use std::borrow::Cow;
use std::fmt;
use std::mem::{offset_of, size_of};

use crate::driver::{Driver, ProgramHandle};

use super::{VertexBuffer, VertexRecord};

/// One named attribute inside an interleaved record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: Cow<'static, str>,
    /// Number of f32 components.
    pub components: i32,
    pub byte_offset: i32,
}

impl AttributeSpec {
    pub const fn new(name: &'static str, components: i32, byte_offset: i32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            components,
            byte_offset,
        }
    }
}

/// Record stride plus the attributes packed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: i32,
    pub attributes: Vec<AttributeSpec>,
}

impl VertexLayout {
    /// Layout of [`VertexRecord`]: `position` 2@0, `colour` 3@8, stride 20.
    pub fn vertex_record() -> Self {
        Self {
            stride: size_of::<VertexRecord>() as i32,
            attributes: vec![
                AttributeSpec::new("position", 2, offset_of!(VertexRecord, position) as i32),
                AttributeSpec::new("colour", 3, offset_of!(VertexRecord, colour) as i32),
            ],
        }
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::vertex_record()
    }
}

/// Result of binding one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBinding {
    pub name: String,
    /// Resolved slot; `None` when the program has no such active attribute.
    pub location: Option<u32>,
    pub components: i32,
    pub byte_offset: i32,
    pub stride: i32,
}

impl AttributeBinding {
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.location.is_some()
    }
}

/// An attribute name the linked program did not resolve.
///
/// Not fatal by default: the binding is left disabled. The name may be
/// misspelled or optimized out by the compiler; both look the same here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    pub name: String,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vertex attribute `{}` not found in program", self.name)
    }
}

impl std::error::Error for BindError {}

/// All bindings produced for one layout, resolved or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    pub bindings: Vec<AttributeBinding>,
}

impl BindReport {
    pub fn get(&self, name: &str) -> Option<&AttributeBinding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Soft failures, one per unresolved attribute.
    pub fn unresolved(&self) -> Vec<BindError> {
        self.bindings
            .iter()
            .filter(|b| !b.is_enabled())
            .map(|b| BindError { name: b.name.clone() })
            .collect()
    }

    /// Promotes the first unresolved attribute to an error.
    pub fn strict(self) -> Result<Self, BindError> {
        match self.unresolved().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Wires a linked program's attributes to a vertex buffer.
pub struct VertexLayoutBinder<'d, D: Driver + ?Sized> {
    driver: &'d D,
}

impl<'d, D: Driver + ?Sized> VertexLayoutBinder<'d, D> {
    pub fn new(driver: &'d D) -> Self {
        Self { driver }
    }

    /// Resolves every attribute of `layout` against `program` and records its
    /// pointer geometry in `vertices`' vertex array.
    ///
    /// The vertex array and buffer are bound only for the duration of the call.
    pub fn bind(
        &self,
        program: ProgramHandle,
        vertices: &VertexBuffer,
        layout: &VertexLayout,
    ) -> BindReport {
        let d = self.driver;
        d.bind_vertex_array(Some(vertices.vertex_array()));
        d.bind_array_buffer(Some(vertices.buffer()));

        let bindings = layout
            .attributes
            .iter()
            .map(|attr| {
                let location = d.attrib_location(program, &attr.name);
                match location {
                    Some(index) => {
                        d.enable_vertex_attrib_array(index);
                        d.vertex_attrib_pointer_f32(
                            index,
                            attr.components,
                            false,
                            layout.stride,
                            attr.byte_offset,
                        );
                        log::debug!(
                            "attribute `{}` -> slot {index} ({} x f32 @ {})",
                            attr.name,
                            attr.components,
                            attr.byte_offset
                        );
                    }
                    None => log::warn!("vertex attribute `{}` not found in {program:?}", attr.name),
                }
                AttributeBinding {
                    name: attr.name.to_string(),
                    location,
                    components: attr.components,
                    byte_offset: attr.byte_offset,
                    stride: layout.stride,
                }
            })
            .collect();

        d.bind_array_buffer(None);
        d.bind_vertex_array(None);

        BindReport { bindings }
    }
}
