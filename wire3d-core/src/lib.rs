//! wire3d core library - software wireframe rendering
//!
//! Rotates a triangle mesh, projects it with a perspective divide and
//! rasterizes the outlines into an ARGB color buffer. Showing that buffer is
//! left to a [`Display`] implementation.

pub mod config;
pub mod error;
pub mod frame;
pub mod framebuffer;
pub mod geometry;
pub mod obj;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod transform;

// Re-export commonly used types
pub use config::RenderConfig;
pub use error::{MeshError, RenderError};
pub use frame::{Display, FrameLimiter, FrameStats};
pub use framebuffer::{Color, PixelBuffer};
pub use geometry::{Face, Mesh, Triangle};
pub use pipeline::FramePipeline;
pub use projection::{project, Camera};
pub use transform::{rotate_x, rotate_y, rotate_z, RotationState};
