use std::borrow::Cow;
use std::fmt;

/// Pipeline stage a shader is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderKind {
    /// Lowercase stage name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
            ShaderKind::Geometry => "geometry",
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stage + GLSL text. The text is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    kind: ShaderKind,
    text: Cow<'static, str>,
}

impl ShaderSource {
    pub const fn from_static(kind: ShaderKind, text: &'static str) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(text),
        }
    }

    pub fn new(kind: ShaderKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Cow::Owned(text.into()),
        }
    }

    #[inline]
    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}
