//! Perspective camera with a scroll-driven sweep.
//!
//! The camera always looks at the origin. Page scroll moves it along a
//! sine/cosine arc so the sphere drifts across the viewport as the page
//! scrolls, without ever changing its distance class.

use glam::{Mat4, Vec3};

const BASE_DISTANCE: f32 = 5.0;
const FOV_DEG: f32 = 75.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Origin-locked perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub aspect: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, BASE_DISTANCE),
            aspect,
        }
    }

    /// Update the aspect ratio after a resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Sweep the camera for a normalized scroll fraction in `[0, 1]`.
    ///
    /// X traces a full sine period across the scroll range, Y a quarter
    /// cosine, Z stays fixed; the look target stays at the origin.
    pub fn set_scroll(&mut self, fraction: f32) {
        use std::f32::consts::PI;
        let s = fraction.clamp(0.0, 1.0);
        let max_x = self.aspect * BASE_DISTANCE * 0.8;
        self.position = Vec3::new(
            (s * PI * 2.0).sin() * max_x,
            (s * PI * 0.5).cos() * 0.8,
            BASE_DISTANCE,
        );
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_DEG.to_radians(), self.aspect, NEAR, FAR)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_endpoints() {
        let mut cam = Camera::new(16.0 / 9.0);
        cam.set_scroll(0.0);
        assert!(cam.position.x.abs() < 1e-5);
        assert!((cam.position.y - 0.8).abs() < 1e-5);
        assert_eq!(cam.position.z, 5.0);

        cam.set_scroll(1.0);
        // Full sine period returns X to zero; quarter cosine lands Y at ~0.57.
        assert!(cam.position.x.abs() < 1e-4);
        assert!((cam.position.y - (std::f32::consts::FRAC_PI_2).cos() * 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_scroll_quarter_swings_x() {
        let mut cam = Camera::new(2.0);
        cam.set_scroll(0.25);
        // sin(pi/2) = 1 at the quarter point.
        assert!((cam.position.x - 2.0 * 5.0 * 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_view_proj_is_invertible() {
        let cam = Camera::new(1.5);
        let vp = cam.view_proj();
        let round = vp * vp.inverse();
        assert!((round.determinant() - 1.0).abs() < 1e-3);
    }
}
