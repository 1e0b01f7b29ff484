//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the atelier crate.
///
/// None of these are fatal to a host page: a failed mount leaves the
/// renderer inactive and the host keeps working without the 3D view.
#[derive(Debug)]
pub enum AtelierError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// WGSL composition failure.
    Shader(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// The host did not provide a usable mount point.
    MountUnavailable(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for AtelierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::MountUnavailable(msg) => {
                write!(f, "mount point unavailable: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for AtelierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for AtelierError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for AtelierError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_names_the_failure() {
        let err = AtelierError::MountUnavailable("#anatomy".into());
        assert_eq!(err.to_string(), "mount point unavailable: #anatomy");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = AtelierError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(AtelierError::Shader("x".into()).source().is_none());
    }
}
