//! Primitive rasterization into a [`PixelBuffer`]
use nalgebra::Vector2;

use crate::framebuffer::{Color, PixelBuffer};
use crate::geometry::Triangle;

/// Distance in pixels between reference grid dots
pub const GRID_SPACING: usize = 10;

pub fn draw_pixel(buffer: &mut PixelBuffer, color: Color, x: i32, y: i32) {
    buffer.set_pixel(x, y, color);
}

/// Fill a `w` x `h` rectangle whose top-left corner is at `(x, y)`.
///
/// Pixels falling outside the buffer are skipped one by one, so a rectangle
/// hanging off an edge is partially drawn.
pub fn draw_rect(buffer: &mut PixelBuffer, color: Color, x: f32, y: f32, w: u32, h: u32) {
    for i in 0..w {
        for j in 0..h {
            let current_x = (x + i as f32) as i32;
            let current_y = (y + j as f32) as i32;
            draw_pixel(buffer, color, current_x, current_y);
        }
    }
}

/// Plot a dot every [`GRID_SPACING`] pixels along both axes.
pub fn draw_grid(buffer: &mut PixelBuffer, color: Color) {
    let (width, height) = (buffer.width() as i32, buffer.height() as i32);
    for y in (0..height).step_by(GRID_SPACING) {
        for x in (0..width).step_by(GRID_SPACING) {
            draw_pixel(buffer, color, x, y);
        }
    }
}

/// Draw a line from `p0` to `p1` with the DDA algorithm.
///
/// The longer axis sets the number of samples, so steep and shallow lines
/// are both gap free. The deltas are truncated to whole pixels before
/// stepping; positions start at `p0`, accumulate in floating point and are
/// rounded to the nearest pixel on each sample.
pub fn draw_line(buffer: &mut PixelBuffer, color: Color, p0: Vector2<f32>, p1: Vector2<f32>) {
    if !(p0.x.is_finite() && p0.y.is_finite() && p1.x.is_finite() && p1.y.is_finite()) {
        return;
    }

    let dx = (p1.x - p0.x).trunc();
    let dy = (p1.y - p0.y).trunc();
    let steps = dx.abs().max(dy.abs()) as u32;

    if steps == 0 {
        draw_pixel(buffer, color, p0.x.round() as i32, p0.y.round() as i32);
        return;
    }

    let x_inc = dx / steps as f32;
    let y_inc = dy / steps as f32;

    let mut current_x = p0.x;
    let mut current_y = p0.y;
    for _ in 0..=steps {
        draw_pixel(buffer, color, current_x.round() as i32, current_y.round() as i32);
        current_x += x_inc;
        current_y += y_inc;
    }
}

/// Draw a triangle outline with a square marker on each vertex.
pub fn draw_triangle(
    buffer: &mut PixelBuffer,
    edge_color: Color,
    marker_color: Color,
    marker_size: u32,
    triangle: &Triangle,
) {
    for point in &triangle.points {
        draw_rect(buffer, marker_color, point.x, point.y, marker_size, marker_size);
    }
    for (from, to) in triangle.edges() {
        draw_line(buffer, edge_color, from, to);
    }
}
