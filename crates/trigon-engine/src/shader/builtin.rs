//! GLSL stages drawn by the harness.
//!
//! The vertex stage consumes `position` (vec2) and `colour` (vec3) and forwards
//! the color; the fragment stage writes it to `outColour`.

use super::{ShaderKind, ShaderSource};

pub const VERTEX_GLSL: &str = "#version 150 core\n\
    in vec2 position;\
    in vec3 colour;\
    out vec3 Colour;\
    void main() { \
        Colour = colour;\
        gl_Position = vec4( position, 0.0, 1.0 ); \
    }";

pub const FRAGMENT_GLSL: &str = "#version 150 core\n\
    in vec3 Colour;\
    out vec4 outColour;\
    void main() { \
        outColour = vec4( Colour, 1.0 );\
    }";

/// Name of the fragment output bound to color attachment 0.
pub const FRAG_OUTPUT: &str = "outColour";

pub const VERTEX: ShaderSource = ShaderSource::from_static(ShaderKind::Vertex, VERTEX_GLSL);
pub const FRAGMENT: ShaderSource = ShaderSource::from_static(ShaderKind::Fragment, FRAGMENT_GLSL);
