//! Axis rotations and the accumulated rotation state
use nalgebra::{Rotation3, Vector3};

/// Rotate `v` about the X axis by `angle` radians.
pub fn rotate_x(v: Vector3<f32>, angle: f32) -> Vector3<f32> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle) * v
}

/// Rotate `v` about the Y axis by `angle` radians.
pub fn rotate_y(v: Vector3<f32>, angle: f32) -> Vector3<f32> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle) * v
}

/// Rotate `v` about the Z axis by `angle` radians.
pub fn rotate_z(v: Vector3<f32>, angle: f32) -> Vector3<f32> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle) * v
}

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Advance every axis by the same angle.
    pub fn advance(&mut self, delta: f32) {
        self.rotate(delta, delta, delta);
    }

    /// Apply the X, then Y, then Z rotation to a vertex.
    pub fn apply(&self, v: Vector3<f32>) -> Vector3<f32> {
        let v = rotate_x(v, self.x);
        let v = rotate_y(v, self.y);
        rotate_z(v, self.z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}
