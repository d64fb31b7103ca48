//! Camera and perspective projection
use nalgebra::{Vector2, Vector3};

/// Depths closer to zero than this are not projected.
pub const NEAR_EPSILON: f32 = 1e-4;

/// Perspective divide of a camera-space point.
///
/// Returns `None` when the depth is non-finite or within [`NEAR_EPSILON`] of zero.
pub fn project(point: &Vector3<f32>, fov_factor: f32) -> Option<Vector2<f32>> {
    if !point.z.is_finite() || point.z.abs() < NEAR_EPSILON {
        return None;
    }

    Some(Vector2::new(
        (fov_factor * point.x) / point.z,
        (fov_factor * point.y) / point.z,
    ))
}

/// A camera looking down +z, only offset along the z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub fov_factor: f32,
}

impl Camera {
    pub fn new(camera_z: f32, fov_factor: f32) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, camera_z),
            fov_factor,
        }
    }

    /// Move a world-space point into camera space.
    pub fn to_view(&self, point: Vector3<f32>) -> Vector3<f32> {
        Vector3::new(point.x, point.y, point.z - self.position.z)
    }

    /// Project a camera-space point to 2D, centred on the origin.
    pub fn project(&self, point: &Vector3<f32>) -> Option<Vector2<f32>> {
        project(point, self.fov_factor)
    }

    /// Project a camera-space point to buffer coordinates for a `width` x `height` target.
    pub fn project_to_screen(
        &self,
        point: &Vector3<f32>,
        width: u32,
        height: u32,
    ) -> Option<Vector2<f32>> {
        let projected = self.project(point)?;
        // Integer halving, the origin sits on a whole pixel.
        let center = Vector2::new((width / 2) as f32, (height / 2) as f32);
        Some(projected + center)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(-5.0, 650.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, -5.0));
        assert!((camera.fov_factor - 650.0).abs() < 1e-6);
    }

    #[test]
    fn test_on_axis_point_projects_to_origin() {
        let p = project(&Vector3::new(0.0, 0.0, -5.0), 650.0).unwrap();
        assert_eq!(p, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_perspective_divide() {
        let p = project(&Vector3::new(1.0, -2.0, 4.0), 100.0).unwrap();
        assert!((p.x - 25.0).abs() < 1e-6);
        assert!((p.y + 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_farther_points_shrink() {
        let near = project(&Vector3::new(1.0, 1.0, 2.0), 650.0).unwrap();
        let far = project(&Vector3::new(1.0, 1.0, 8.0), 650.0).unwrap();
        assert!(far.norm() < near.norm());
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        assert!(project(&Vector3::new(1.0, 1.0, 0.0), 650.0).is_none());
        assert!(project(&Vector3::new(1.0, 1.0, 1e-6), 650.0).is_none());
        assert!(project(&Vector3::new(1.0, 1.0, f32::NAN), 650.0).is_none());
    }

    #[test]
    fn test_to_view_pushes_scene_away() {
        let camera = Camera::default();
        let view = camera.to_view(Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(view, Vector3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_project_to_screen_recentres() {
        let camera = Camera::default();
        let p = camera
            .project_to_screen(&Vector3::new(0.0, 0.0, 5.0), 801, 600)
            .unwrap();
        assert_eq!(p, Vector2::new(400.0, 300.0));
    }
}
