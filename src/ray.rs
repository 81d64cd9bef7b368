//! Ray construction and intersection tests for hover/pick detection.
//!
//! A ray is built from the camera through a pointer position in normalized
//! device coordinates, then tested against whichever object the active
//! morph owns: a point cloud (proximity test) or a triangle mesh
//! (Möller-Trumbore).

use glam::{Mat4, Vec3};

/// A world-space ray with normalized direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }

    /// Build a ray by unprojecting a pointer position through a
    /// view-projection matrix. `ndc` is in `[-1, 1]` on both axes.
    pub fn from_ndc(view_proj: Mat4, ndc: glam::Vec2) -> Self {
        let inv = view_proj.inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Self::new(near, far - near)
    }

    /// Map the ray through `m` (used to carry a world ray into an
    /// object's rotated local frame via the inverse model matrix).
    pub fn transformed(&self, m: Mat4) -> Self {
        Self::new(
            m.transform_point3(self.origin),
            m.transform_vector3(self.dir),
        )
    }

    /// Point along the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Shortest distance from the ray to a point. Points behind the
    /// origin measure to the origin itself.
    pub fn distance_to_point(&self, p: Vec3) -> f32 {
        let t = (p - self.origin).dot(self.dir);
        if t <= 0.0 {
            (p - self.origin).length()
        } else {
            (p - self.at(t)).length()
        }
    }

    /// Möller-Trumbore ray/triangle intersection, both winding orders.
    ///
    /// Returns the ray parameter of the hit, or `None`.
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        const EPS: f32 = 1e-7;

        let e1 = b - a;
        let e2 = c - a;
        let p = self.dir.cross(e2);
        let det = e1.dot(p);
        if det.abs() < EPS {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(e1);
        let v = self.dir.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = e2.dot(q) * inv_det;
        (t > EPS).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_distance_to_point() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!((ray.distance_to_point(Vec3::new(1.0, 0.0, 5.0)) - 1.0).abs() < 1e-6);
        // Behind the origin: distance to origin.
        let d = ray.distance_to_point(Vec3::new(0.0, 0.0, -3.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, -5.0), Vec3::Z);
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);

        let t = ray.intersect_triangle(a, b, c).unwrap();
        assert!((t - 5.0).abs() < 1e-4);
        // Same triangle, reversed winding.
        assert!(ray.intersect_triangle(a, c, b).is_some());

        let miss = Ray::new(Vec3::new(2.0, 2.0, -5.0), Vec3::Z);
        assert!(miss.intersect_triangle(a, b, c).is_none());
    }

    #[test]
    fn test_behind_triangle_is_no_hit() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::Z);
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);
        assert!(ray.intersect_triangle(a, b, c).is_none());
    }

    #[test]
    fn test_from_ndc_center_points_forward() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(75f32.to_radians(), 1.0, 0.1, 1000.0);
        let ray = Ray::from_ndc(proj * view, Vec2::ZERO);
        // Center of the screen looks straight down -Z toward the target.
        assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
        assert!(ray.origin.z < 5.0 + 1e-3);
    }
}
