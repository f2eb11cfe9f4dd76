use glam::{Mat4, Quat, Vec3};

use crate::{HelioError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near_plane: f32,
    /// Far clipping distance. Normalized fade distances are scaled by this.
    pub far_plane: f32,
}

impl Camera {
    pub fn new_perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y,
            aspect_ratio,
            near_plane: near,
            far_plane: far,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Check the clip planes describe a usable depth range.
    pub fn validate(&self) -> Result<()> {
        if self.near_plane <= 0.0 || self.far_plane <= self.near_plane {
            return Err(HelioError::InvalidConfiguration(format!(
                "camera clip planes near={} far={} are not an increasing positive range",
                self.near_plane, self.far_plane
            )));
        }
        Ok(())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near_plane, self.far_plane)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Distance of `point` along the view direction (positive in front of the camera).
    pub fn view_depth(&self, point: Vec3) -> f32 {
        (point - self.position).dot(self.forward())
    }

    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        let mat3 = glam::Mat3::from_cols(right, up, -forward);
        self.rotation = Quat::from_mat3(&mat3);
    }

    pub fn set_far_plane(&mut self, far: f32) {
        self.far_plane = far;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(std::f32::consts::FRAC_PI_3, 16.0 / 9.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert_eq!(camera.far_plane, 1000.0);
        assert!((camera.view_depth(Vec3::new(0.0, 0.0, -25.0)) - 25.0).abs() < 1e-5);
        assert!(camera.view_depth(Vec3::new(0.0, 0.0, 5.0)) < 0.0);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut camera = Camera::default().with_position(Vec3::new(10.0, 0.0, 0.0));
        camera.look_at(Vec3::ZERO, Vec3::Y);
        let forward = camera.forward();
        assert!((forward - Vec3::NEG_X).length() < 1e-4);
    }

    #[test]
    fn validate_rejects_inverted_planes() {
        let camera = Camera::new_perspective(1.0, 1.0, 10.0, 5.0);
        assert!(matches!(
            camera.validate(),
            Err(HelioError::InvalidConfiguration(_))
        ));
        assert!(Camera::default().validate().is_ok());
    }
}
