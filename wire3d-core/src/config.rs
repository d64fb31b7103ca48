//! Renderer configuration
use crate::framebuffer::Color;

/// Tunables for the frame pipeline and loop.
///
/// The defaults reproduce the classic rotating cube: a 650 field-of-view
/// factor, the camera 5 units back, 0.01 rad of rotation per frame on every
/// axis and a 30 FPS cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub fov_factor: f32,
    pub camera_z: f32,
    /// Fixed angle added to each axis once per frame, independent of frame time.
    pub rotation_per_frame: f32,
    /// Side length of the square drawn on every projected vertex.
    pub marker_size: u32,
    pub grid_color: Color,
    pub marker_color: Color,
    pub edge_color: Color,
    pub clear_color: Color,
    /// Target frame rate. Zero disables pacing.
    pub fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_factor: 650.0,
            camera_z: -5.0,
            rotation_per_frame: 0.01,
            marker_size: 10,
            grid_color: Color(0xFF33_3333),
            marker_color: Color(0xFFFF_FF00),
            edge_color: Color(0xFF00_FF00),
            clear_color: Color(0xFF00_0000),
            fps: 30,
        }
    }
}
