//! Sphere particle field: the scatter/reconstruct morph.
//!
//! N points are laid out on a sphere with a golden-spiral distribution.
//! A trigger scatters every point toward a per-particle jittered target;
//! the next trigger pulls them back and snaps them exactly onto the
//! original sphere. Positions are the only state written per tick; the
//! two endpoints of every particle's path are fixed at construction.

use glam::{EulerRot, Mat4, Vec3};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::Capacities;
use crate::ease;
use crate::ray::Ray;
use crate::theme::hsl_to_rgb;
use crate::Morph;

pub const SPHERE_RADIUS: f32 = 1.2;
const SCATTER_DISTANCE: f32 = 12.0;
const SCATTER_SECS: f32 = 3.0;
const RECONSTRUCT_SECS: f32 = 4.0;
/// World-space tolerance for ray/point-cloud hover hits.
const HOVER_TOLERANCE: f32 = 0.35;

/// Discrete animation state of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Scattering,
    Scattered,
    Reconstructing,
    /// Reconstruction finished; behaves as `Idle` for triggers.
    Complete,
}

/// One point of the field. `original` and `scattered` are fixed;
/// `current` always lies on the eased segment between them.
#[derive(Debug, Clone, Copy)]
pub struct SphereParticle {
    pub original: Vec3,
    pub scattered: Vec3,
    pub current: Vec3,
}

/// The uniform-sphere point cloud and its scatter/reconstruct machine.
pub struct ParticleField {
    particles: Vec<SphereParticle>,
    colors: Vec<Vec3>,
    color: Vec3,
    phase: Phase,
    animating: bool,
    anim_start: f32,
    rotation: Vec3,
    point_size: f32,
    disposed: bool,
}

impl ParticleField {
    /// Build the field with `caps.particle_count` points and per-particle
    /// scatter targets drawn from `rng`.
    pub fn new(caps: &Capacities, color: Vec3, rng: &mut StdRng) -> Self {
        let n = caps.particle_count;
        let mut particles = Vec::with_capacity(n);

        for i in 0..n {
            // Golden-spiral distribution: near-uniform density without
            // rejection sampling.
            let phi = (-1.0 + 2.0 * i as f32 / n as f32).acos();
            let theta = (n as f32 * std::f32::consts::PI).sqrt() * phi;
            let original = Vec3::new(
                SPHERE_RADIUS * theta.cos() * phi.sin(),
                SPHERE_RADIUS * theta.sin() * phi.sin(),
                SPHERE_RADIUS * phi.cos(),
            );
            let scattered = original
                + Vec3::new(
                    rng.gen_range(-SCATTER_DISTANCE..SCATTER_DISTANCE),
                    rng.gen_range(-SCATTER_DISTANCE..SCATTER_DISTANCE),
                    rng.gen_range(-SCATTER_DISTANCE..SCATTER_DISTANCE),
                );
            particles.push(SphereParticle {
                original,
                scattered,
                current: original,
            });
        }

        Self {
            colors: vec![color; n],
            particles,
            color,
            phase: Phase::Idle,
            animating: false,
            anim_start: 0.0,
            rotation: Vec3::ZERO,
            point_size: caps.particle_size,
            disposed: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn particles(&self) -> &[SphereParticle] {
        &self.particles
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    #[inline]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Accumulated rotation as Euler angles (radians).
    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Begin the scatter animation. No-op while another animation runs.
    pub fn start_scatter(&mut self, now: f32) -> bool {
        if self.animating || self.disposed {
            return false;
        }
        self.animating = true;
        self.phase = Phase::Scattering;
        self.anim_start = now;
        true
    }

    /// Begin the reconstruct animation. No-op while another animation runs.
    pub fn start_reconstruct(&mut self, now: f32) -> bool {
        if self.animating || self.disposed {
            return false;
        }
        self.animating = true;
        self.phase = Phase::Reconstructing;
        self.anim_start = now;
        true
    }

    fn step_scatter(&mut self, now: f32) {
        let elapsed = now - self.anim_start;
        let progress = (elapsed / SCATTER_SECS).min(1.0);
        let eased = ease::out_cubic(progress);

        for (i, p) in self.particles.iter_mut().enumerate() {
            p.current = p.original.lerp(p.scattered, eased);
            // Shimmering dispersal: hue cycles with time and index.
            let hue = (0.6 + (elapsed * 2.0 + i as f32 * 0.01).sin() * 0.2).rem_euclid(1.0);
            self.colors[i] = hsl_to_rgb(hue, 0.8, 0.6);
        }

        if progress >= 1.0 {
            self.animating = false;
            self.phase = Phase::Scattered;
        }
    }

    fn step_reconstruct(&mut self, now: f32) {
        let progress = ((now - self.anim_start) / RECONSTRUCT_SECS).min(1.0);
        let eased = ease::in_out_cubic(progress);

        for (i, p) in self.particles.iter_mut().enumerate() {
            p.current = p.scattered.lerp(p.original, eased);
            // Fractional blend per tick: exponential-style settling onto
            // the theme color, no hard snap.
            self.colors[i] = self.colors[i].lerp(self.color, eased * 0.1);
        }

        if progress >= 1.0 {
            self.animating = false;
            self.phase = Phase::Complete;
            // Remove residual floating-point drift.
            for p in &mut self.particles {
                p.current = p.original;
            }
        }
    }
}

impl Morph for ParticleField {
    fn update(&mut self, now: f32, dt: f32, auto_rotation: Vec3) {
        if self.disposed {
            return;
        }
        if self.animating {
            match self.phase {
                Phase::Scattering => self.step_scatter(now),
                Phase::Reconstructing => self.step_reconstruct(now),
                _ => {}
            }
        }
        // Rotation accumulates; doubled while scattered to signal the
        // unlocked state, frozen mid-transition.
        if self.phase == Phase::Scattered {
            self.rotation += auto_rotation * 2.0 * dt;
        } else if !self.animating {
            self.rotation += auto_rotation * dt;
        }
    }

    fn check_hover(&self, ray: &Ray) -> bool {
        if self.animating || self.disposed {
            return false;
        }
        let local = ray.transformed(self.model_matrix().inverse());
        self.particles
            .iter()
            .any(|p| local.distance_to_point(p.current) < HOVER_TOLERANCE)
    }

    fn handle_trigger(&mut self, ray: &Ray, now: f32) -> bool {
        if !self.check_hover(ray) {
            return false;
        }
        match self.phase {
            Phase::Idle | Phase::Complete => self.start_scatter(now),
            Phase::Scattered => self.start_reconstruct(now),
            _ => false,
        }
    }

    fn set_color(&mut self, color: Vec3) {
        self.color = color;
        self.colors.fill(color);
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.animating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const AUTO: Vec3 = Vec3::new(0.6, 0.9, 0.3);

    fn field() -> ParticleField {
        let caps = Capacities::for_class(crate::DeviceClass::Desktop);
        let mut rng = StdRng::seed_from_u64(7);
        ParticleField::new(&caps, Vec3::new(0.5, 0.0, 1.0), &mut rng)
    }

    #[test]
    fn test_construction() {
        let f = field();
        assert_eq!(f.particles().len(), 1500);
        assert_eq!(f.phase(), Phase::Idle);
        for p in f.particles() {
            assert!((p.original.length() - SPHERE_RADIUS).abs() < 1e-4);
            assert_eq!(p.current, p.original);
        }
    }

    #[test]
    fn test_scatter_targets_correlate_with_source() {
        let f = field();
        for p in f.particles() {
            let offset = p.scattered - p.original;
            assert!(offset.x.abs() < SCATTER_DISTANCE);
            assert!(offset.y.abs() < SCATTER_DISTANCE);
            assert!(offset.z.abs() < SCATTER_DISTANCE);
        }
    }

    #[test]
    fn test_scatter_endpoints() {
        let mut f = field();
        assert!(f.start_scatter(10.0));
        f.update(10.0, 0.0, AUTO);
        for p in f.particles() {
            assert!((p.current - p.original).length() < 1e-6);
        }

        f.update(13.0, 0.0, AUTO);
        assert_eq!(f.phase(), Phase::Scattered);
        assert!(!f.is_animating());
        for p in f.particles() {
            assert!((p.current - p.scattered).length() < 1e-4);
        }
    }

    #[test]
    fn test_retrigger_rejected_mid_animation() {
        let mut f = field();
        f.start_scatter(0.0);
        f.update(1.0, 1.0 / 60.0, AUTO);
        assert_eq!(f.phase(), Phase::Scattering);
        assert!(!f.start_scatter(1.0));
        assert!(!f.start_reconstruct(1.0));
        assert_eq!(f.phase(), Phase::Scattering);
    }

    #[test]
    fn test_reconstruct_snaps_exactly() {
        let mut f = field();
        f.start_scatter(0.0);
        f.update(3.0, 0.0, AUTO);
        f.start_reconstruct(3.0);
        // Advance through a few intermediate ticks to accumulate drift.
        f.update(4.0, 0.0, AUTO);
        f.update(6.5, 0.0, AUTO);
        f.update(7.0, 0.0, AUTO);
        assert_eq!(f.phase(), Phase::Complete);
        for p in f.particles() {
            assert_eq!(p.current, p.original);
        }
    }

    #[test]
    fn test_hover_disabled_while_animating() {
        let mut f = field();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(f.check_hover(&ray));
        f.start_scatter(0.0);
        assert!(!f.check_hover(&ray));
    }

    #[test]
    fn test_trigger_cycle() {
        let mut f = field();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        assert!(f.handle_trigger(&ray, 0.0));
        assert_eq!(f.phase(), Phase::Scattering);
        // Mid-flight trigger is a silent no-op.
        assert!(!f.handle_trigger(&ray, 1.0));

        f.update(3.0, 0.0, AUTO);
        assert_eq!(f.phase(), Phase::Scattered);

        // Scattered cloud still covers the ray near the origin poles,
        // but hover now tests against scattered positions; aim wide.
        // A trigger from Scattered starts reconstruction.
        if f.check_hover(&ray) {
            assert!(f.handle_trigger(&ray, 3.0));
            assert_eq!(f.phase(), Phase::Reconstructing);
        } else {
            assert!(f.start_reconstruct(3.0));
        }
    }

    #[test]
    fn test_rotation_rates() {
        let mut f = field();
        let dt = 1.0 / 60.0;

        f.update(0.0, dt, AUTO);
        let idle_rot = f.rotation();
        assert!((idle_rot - AUTO * dt).length() < 1e-6);

        // Frozen while a transition animates.
        f.start_scatter(0.0);
        f.update(0.1, dt, AUTO);
        assert_eq!(f.rotation(), idle_rot);

        // Doubled once scattered.
        f.update(3.0, 0.0, AUTO);
        assert_eq!(f.phase(), Phase::Scattered);
        let before = f.rotation();
        f.update(3.1, dt, AUTO);
        assert!((f.rotation() - (before + AUTO * 2.0 * dt)).length() < 1e-6);
    }

    #[test]
    fn test_set_color_is_immediate() {
        let mut f = field();
        let c = Vec3::new(0.1, 0.9, 0.4);
        f.set_color(c);
        assert!(f.colors().iter().all(|&x| x == c));
        // Works in any phase.
        f.start_scatter(0.0);
        f.set_color(Vec3::ONE);
        assert!(f.colors().iter().all(|&x| x == Vec3::ONE));
    }

    #[test]
    fn test_dispose_halts_advancement() {
        let mut f = field();
        f.start_scatter(0.0);
        f.dispose();
        f.dispose(); // idempotent
        let snapshot: Vec<Vec3> = f.particles().iter().map(|p| p.current).collect();
        f.update(2.0, 1.0 / 60.0, AUTO);
        let after: Vec<Vec3> = f.particles().iter().map(|p| p.current).collect();
        assert_eq!(snapshot, after);
    }
}
