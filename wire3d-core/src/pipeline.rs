//! Per-frame transform, projection and rasterization
use log::{debug, trace};
use nalgebra::Vector2;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::frame::Display;
use crate::framebuffer::PixelBuffer;
use crate::geometry::{Mesh, Triangle};
use crate::projection::Camera;
use crate::raster;
use crate::transform::RotationState;

/// Owns everything a frame needs: the mesh, the camera, the accumulated
/// rotation, the color buffer and the list of triangles to draw.
///
/// The triangle list is sized to the face count once and overwritten on every
/// [`update`](FramePipeline::update), so frames never allocate.
pub struct FramePipeline {
    mesh: Mesh,
    camera: Camera,
    rotation: RotationState,
    config: RenderConfig,
    buffer: PixelBuffer,
    triangles: Vec<Triangle>,
}

impl FramePipeline {
    pub fn new(
        mesh: Mesh,
        config: RenderConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let mut buffer = PixelBuffer::new(width, height)?;
        buffer.clear(config.clear_color);

        let triangles = Vec::with_capacity(mesh.faces().len());
        debug!(
            "pipeline ready: {}x{} buffer, {} vertices, {} faces",
            width,
            height,
            mesh.vertices().len(),
            mesh.faces().len()
        );

        Ok(Self {
            mesh,
            camera: Camera::new(config.camera_z, config.fov_factor),
            rotation: RotationState::zero(),
            config,
            buffer,
            triangles,
        })
    }

    /// Transform and project every face, then advance the rotation.
    pub fn update(&mut self) {
        self.triangles.clear();

        let (width, height) = (self.buffer.width(), self.buffer.height());
        for (face_index, face) in self.mesh.faces().iter().enumerate() {
            let Some(vertices) = self.mesh.face_vertices(face) else {
                continue;
            };

            let mut points = [Vector2::zeros(); 3];
            let mut visible = true;
            for (point, vertex) in points.iter_mut().zip(vertices) {
                let view = self.camera.to_view(self.rotation.apply(vertex));
                match self.camera.project_to_screen(&view, width, height) {
                    Some(projected) => *point = projected,
                    None => {
                        visible = false;
                        break;
                    }
                }
            }

            if visible {
                self.triangles.push(Triangle { points });
            } else {
                trace!("face {} skipped: vertex on the camera plane", face_index);
            }
        }

        self.rotation.advance(self.config.rotation_per_frame);
    }

    /// Rasterize the grid and the current triangles into the buffer.
    pub fn draw(&mut self) {
        raster::draw_grid(&mut self.buffer, self.config.grid_color);
        for triangle in &self.triangles {
            raster::draw_triangle(
                &mut self.buffer,
                self.config.edge_color,
                self.config.marker_color,
                self.config.marker_size,
                triangle,
            );
        }
    }

    /// Draw the frame, hand it to the display and clear the buffer for the next one.
    pub fn render<D: Display>(&mut self, display: &mut D) -> Result<(), D::Error> {
        self.draw();
        let presented = display.present(&self.buffer);
        self.buffer.clear(self.config.clear_color);
        presented
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_capacity(&self) -> usize {
        self.triangles.capacity()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }
}
