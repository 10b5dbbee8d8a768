use bytemuck::{Pod, Zeroable};

use crate::driver::{BufferHandle, Driver, VertexArrayHandle};

/// One interleaved vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct VertexRecord {
    pub position: [f32; 2],
    pub colour: [f32; 3],
}

impl VertexRecord {
    pub const fn new(x: f32, y: f32, r: f32, g: f32, b: f32) -> Self {
        Self {
            position: [x, y],
            colour: [r, g, b],
        }
    }
}

/// Records in a [`VertexBuffer`]: one triangle.
pub const TRIANGLE_VERTEX_COUNT: usize = 3;

/// Red top, green bottom-right, blue bottom-left.
pub const TRIANGLE: [VertexRecord; TRIANGLE_VERTEX_COUNT] = [
    VertexRecord::new(0.0, 0.5, 1.0, 0.0, 0.0),
    VertexRecord::new(0.5, -0.5, 0.0, 1.0, 0.0),
    VertexRecord::new(-0.5, -0.5, 0.0, 0.0, 1.0),
];

/// A vertex array + array buffer holding exactly one triangle.
///
/// Uploaded once with a static usage hint and never written again.
#[derive(Debug, PartialEq, Eq)]
pub struct VertexBuffer {
    vertex_array: VertexArrayHandle,
    buffer: BufferHandle,
}

impl VertexBuffer {
    /// Creates the vertex array and buffer and uploads `records`.
    ///
    /// If buffer creation fails the already created vertex array is deleted.
    pub fn upload<D: Driver + ?Sized>(
        driver: &D,
        records: &[VertexRecord; TRIANGLE_VERTEX_COUNT],
    ) -> Result<Self, String> {
        let vertex_array = driver.create_vertex_array()?;
        let buffer = match driver.create_buffer() {
            Ok(b) => b,
            Err(e) => {
                driver.delete_vertex_array(vertex_array);
                return Err(e);
            }
        };

        driver.bind_array_buffer(Some(buffer));
        driver.buffer_data_static(bytemuck::cast_slice(records.as_slice()));
        driver.bind_array_buffer(None);

        log::debug!(
            "uploaded {} vertices ({} bytes) into {buffer:?}",
            TRIANGLE_VERTEX_COUNT,
            std::mem::size_of_val(records)
        );

        Ok(Self {
            vertex_array,
            buffer,
        })
    }

    #[inline]
    pub fn vertex_array(&self) -> VertexArrayHandle {
        self.vertex_array
    }

    #[inline]
    pub fn buffer(&self) -> BufferHandle {
        self.buffer
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        TRIANGLE_VERTEX_COUNT
    }

    /// Deletes the buffer, then the vertex array.
    pub fn release<D: Driver + ?Sized>(self, driver: &D) {
        driver.delete_buffer(self.buffer);
        driver.delete_vertex_array(self.vertex_array);
    }
}
