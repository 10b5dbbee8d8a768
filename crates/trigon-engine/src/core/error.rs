use std::fmt;

use crate::layout::BindError;
use crate::program::PipelineError;

/// A failure before the frame loop starts. Always fatal.
#[derive(Debug)]
pub enum SetupError {
    /// The native window could not be created.
    Window(anyhow::Error),
    /// The GL context or its surface could not be created or made current.
    Context(anyhow::Error),
    /// GL entry points could not be loaded.
    Loader(anyhow::Error),
    /// The context is older than requested.
    Version {
        required: (u32, u32),
        found: (u32, u32),
    },
    /// Vertex array or buffer creation failed.
    Buffer(String),
    /// Shader compilation/linking failed.
    Pipeline(PipelineError),
    /// An attribute did not resolve and strict binding was requested.
    Attribute(BindError),
}

impl SetupError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Window(e) => write!(f, "failed to create window: {e:#}"),
            SetupError::Context(e) => write!(f, "failed to create GL context: {e:#}"),
            SetupError::Loader(e) => write!(f, "failed to load GL functions: {e:#}"),
            SetupError::Version { required, found } => write!(
                f,
                "OpenGL {}.{} required, context provides {}.{}",
                required.0, required.1, found.0, found.1
            ),
            SetupError::Buffer(msg) => write!(f, "failed to create vertex storage: {msg}"),
            SetupError::Pipeline(e) => write!(f, "failed to build shader program: {e}"),
            SetupError::Attribute(e) => write!(f, "strict attribute binding: {e}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Window(e) | SetupError::Context(e) | SetupError::Loader(e) => Some(&**e),
            SetupError::Pipeline(e) => Some(e),
            SetupError::Attribute(e) => Some(e),
            SetupError::Version { .. } | SetupError::Buffer(_) => None,
        }
    }
}

impl From<PipelineError> for SetupError {
    fn from(e: PipelineError) -> Self {
        SetupError::Pipeline(e)
    }
}

impl From<BindError> for SetupError {
    fn from(e: BindError) -> Self {
        SetupError::Attribute(e)
    }
}

/// Fails when `found` is older than `required`.
pub fn check_version(required: (u32, u32), found: (u32, u32)) -> Result<(), SetupError> {
    if found >= required {
        Ok(())
    } else {
        Err(SetupError::Version { required, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_check_compares_major_then_minor() {
        assert!(check_version((3, 2), (3, 2)).is_ok());
        assert!(check_version((3, 2), (4, 0)).is_ok());
        assert!(check_version((3, 2), (3, 1)).is_err());
        assert!(check_version((3, 2), (2, 9)).is_err());
    }

    #[test]
    fn every_setup_failure_exits_with_one() {
        let errs = [
            SetupError::Window(anyhow::anyhow!("no display")),
            SetupError::Version { required: (3, 2), found: (2, 1) },
            SetupError::Buffer("out of memory".into()),
            SetupError::Attribute(BindError { name: "colour".into() }),
        ];
        for e in errs {
            assert_eq!(e.exit_code(), 1);
        }
    }

    #[test]
    fn version_error_names_both_versions() {
        let e = check_version((3, 2), (2, 1)).unwrap_err();
        assert_eq!(e.to_string(), "OpenGL 3.2 required, context provides 2.1");
    }
}
