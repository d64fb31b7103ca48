//! Error types for mesh loading and renderer setup
use std::fmt;
use std::io;

/// Failure while building or loading a mesh.
#[derive(Debug)]
pub enum MeshError {
    /// A record in a mesh file could not be parsed.
    Parse { line: usize, message: String },
    /// A face references a vertex that does not exist. `index` is 1-based.
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    Io(io::Error),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Parse { line, message } => {
                write!(f, "parse error on line {}: {}", line, message)
            }
            MeshError::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {} references vertex {} but the mesh has {} vertices",
                face, index, vertex_count
            ),
            MeshError::Io(e) => write!(f, "failed to read mesh: {}", e),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MeshError {
    fn from(e: io::Error) -> Self {
        MeshError::Io(e)
    }
}

/// Failure while acquiring render resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    EmptyBuffer { width: u32, height: u32 },
    /// The color buffer is too large to allocate.
    Allocation { width: u32, height: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::EmptyBuffer { width, height } => {
                write!(f, "color buffer cannot be empty: {}x{}", width, height)
            }
            RenderError::Allocation { width, height } => {
                write!(f, "out of memory for a {}x{} color buffer", width, height)
            }
        }
    }
}

impl std::error::Error for RenderError {}
