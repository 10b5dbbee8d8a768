use crate::driver::Driver;
use crate::layout::{
    BindReport, TRIANGLE, TRIANGLE_VERTEX_COUNT, VertexBuffer, VertexLayout, VertexLayoutBinder,
    VertexRecord,
};
use crate::program::ShaderPipeline;
use crate::shader::{builtin, ShaderSource};

use super::SetupError;

/// Everything the scene setup needs.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
    /// Fragment output bound to color attachment 0.
    pub frag_output: String,
    pub layout: VertexLayout,
    pub vertices: [VertexRecord; TRIANGLE_VERTEX_COUNT],
    pub clear_color: [f32; 4],
    /// Treat an unresolved vertex attribute as a setup failure.
    ///
    /// Off by default: the driver tolerates unknown names and so does the
    /// harness, leaving the attribute disabled.
    pub strict_attributes: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            vertex: builtin::VERTEX,
            fragment: builtin::FRAGMENT,
            frag_output: builtin::FRAG_OUTPUT.to_string(),
            layout: VertexLayout::vertex_record(),
            vertices: TRIANGLE,
            clear_color: [0.0, 0.0, 0.0, 0.0],
            strict_attributes: false,
        }
    }
}

/// Fully set-up GPU state for the frame loop.
///
/// Only ever observed complete: [`Scene::build`] either returns every object
/// or releases what it created.
#[derive(Debug)]
pub struct Scene {
    pipeline: ShaderPipeline,
    vertices: VertexBuffer,
    bindings: BindReport,
}

impl Scene {
    /// Uploads the vertices, builds the program, binds the layout and sets the
    /// clear color.
    pub fn build<D: Driver + ?Sized>(driver: &D, config: &SceneConfig) -> Result<Self, SetupError> {
        let vertices =
            VertexBuffer::upload(driver, &config.vertices).map_err(SetupError::Buffer)?;

        let pipeline = match ShaderPipeline::build(
            driver,
            &config.vertex,
            &config.fragment,
            &config.frag_output,
        ) {
            Ok(p) => p,
            Err(e) => {
                vertices.release(driver);
                return Err(e.into());
            }
        };

        let bindings =
            VertexLayoutBinder::new(driver).bind(pipeline.program(), &vertices, &config.layout);

        let bindings = if config.strict_attributes {
            match bindings.strict() {
                Ok(b) => b,
                Err(e) => {
                    pipeline.release(driver);
                    vertices.release(driver);
                    return Err(e.into());
                }
            }
        } else {
            bindings
        };

        driver.clear_color(config.clear_color);

        log::info!(
            "scene ready: {:?}, {} vertices, {} attribute(s)",
            pipeline.program(),
            vertices.vertex_count(),
            bindings.bindings.len()
        );

        Ok(Self {
            pipeline,
            vertices,
            bindings,
        })
    }

    #[inline]
    pub fn pipeline(&self) -> &ShaderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn vertices(&self) -> &VertexBuffer {
        &self.vertices
    }

    #[inline]
    pub fn bindings(&self) -> &BindReport {
        &self.bindings
    }

    /// Clears the color buffer and draws the triangle.
    ///
    /// Program and vertex array are bound for the draw only.
    pub fn draw<D: Driver + ?Sized>(&self, driver: &D) {
        driver.clear_color_buffer();
        driver.use_program(Some(self.pipeline.program()));
        driver.bind_vertex_array(Some(self.vertices.vertex_array()));
        driver.draw_triangles(0, TRIANGLE_VERTEX_COUNT as i32);
        driver.bind_vertex_array(None);
        driver.use_program(None);
    }

    /// Releases program, fragment shader, vertex shader, buffer and vertex
    /// array, in that order.
    pub fn release<D: Driver + ?Sized>(self, driver: &D) {
        self.pipeline.release(driver);
        self.vertices.release(driver);
        log::debug!("scene released");
    }
}
