//! Wireframe body: an icosphere that bursts into particles on trigger
//! and reforms onto its own face corners.
//!
//! While the mesh is visible it slowly auto-rotates and answers raycast
//! hover/trigger queries. A trigger swaps it for a radial burst of
//! particles that fly outward from the impact point, then fall back onto
//! the mesh's face-corner positions; near the end of the inbound leg the
//! particles grow short-lived connection lines, which fade out as the
//! mesh reappears.

use glam::{EulerRot, Mat4, Vec3};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::Capacities;
use crate::ease;
use crate::mesh::TriMesh;
use crate::ray::Ray;
use crate::Morph;

const BODY_RADIUS: f32 = 1.2;
const SUBDIVISIONS: u32 = 1;
/// Fraction of the burst traversed per second.
const PROGRESS_RATE: f32 = 0.72;
/// Spin applied to the burst cloud while it is airborne.
const BURST_ROTATION: Vec3 = Vec3::new(1.2, 1.8, 0.6);
/// Particles closer than this grow a connection line.
const CONNECT_DISTANCE: f32 = 1.8;
/// Hard ceiling on lines per frame, below any device cap.
const CONNECT_FRAME_CAP: usize = 40;

/// One burst particle. All three waypoints are fixed when the explosion
/// is created; `current` moves along the out-then-in path.
#[derive(Debug, Clone, Copy)]
pub struct BurstParticle {
    pub start: Vec3,
    pub burst_target: Vec3,
    pub mesh_target: Vec3,
    pub current: Vec3,
}

/// The icosphere wireframe and its explode/reform machine.
pub struct WireframeBody {
    mesh: TriMesh,
    edges: Vec<(Vec3, Vec3)>,
    corners: Vec<Vec3>,
    particles: Vec<BurstParticle>,
    connections: Vec<(Vec3, Vec3)>,
    connection_opacity: f32,
    color: Vec3,
    progress: f32,
    animating: bool,
    mesh_visible: bool,
    mesh_rotation: Vec3,
    burst_rotation: Vec3,
    burst_capacity: usize,
    burst_point_size: f32,
    max_connections: usize,
    rng: StdRng,
    disposed: bool,
}

impl WireframeBody {
    pub fn new(caps: &Capacities, color: Vec3, rng: StdRng) -> Self {
        let mesh = TriMesh::icosphere(BODY_RADIUS, SUBDIVISIONS);
        let edges = mesh.edges();
        let corners = mesh.corner_vertices();
        Self {
            mesh,
            edges,
            corners,
            particles: Vec::new(),
            connections: Vec::new(),
            connection_opacity: 0.0,
            color,
            progress: 0.0,
            animating: false,
            mesh_visible: true,
            mesh_rotation: Vec3::ZERO,
            burst_rotation: Vec3::ZERO,
            burst_capacity: caps.burst_capacity,
            burst_point_size: caps.burst_particle_size,
            max_connections: caps.max_connections,
            rng,
            disposed: false,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[inline]
    pub fn is_mesh_visible(&self) -> bool {
        self.mesh_visible
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    /// Connection line segments of the reforming burst, world space.
    pub fn connections(&self) -> &[(Vec3, Vec3)] {
        &self.connections
    }

    #[inline]
    pub fn connection_opacity(&self) -> f32 {
        self.connection_opacity
    }

    /// Wireframe edge segments in mesh-local space.
    pub fn edges(&self) -> &[(Vec3, Vec3)] {
        &self.edges
    }

    #[inline]
    pub fn burst_point_size(&self) -> f32 {
        self.burst_point_size
    }

    pub fn mesh_model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.mesh_rotation.x,
            self.mesh_rotation.y,
            self.mesh_rotation.z,
        )
    }

    pub fn burst_model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.burst_rotation.x,
            self.burst_rotation.y,
            self.burst_rotation.z,
        )
    }

    /// Spawn the burst around a world-space impact point and hide the mesh.
    pub fn trigger_explosion(&mut self, impact: Vec3) {
        let model = self.mesh_model_matrix();
        let count = self.burst_capacity.min(self.corners.len());
        self.particles.clear();
        self.particles.reserve(count);

        for i in 0..count {
            let angle = (i as f32 / count as f32) * std::f32::consts::TAU
                + self.rng.gen::<f32>() * 0.5;
            let distance = 6.0 + self.rng.gen::<f32>() * 10.0;
            let height = (self.rng.gen::<f32>() - 0.5) * 6.0;
            // Ring in the screen plane; depth gets only a small jitter.
            let burst_target = impact
                + Vec3::new(
                    angle.cos() * distance,
                    angle.sin() * distance + height,
                    (self.rng.gen::<f32>() - 0.5) * 5.0,
                );
            // Landing targets follow the mesh's orientation at the moment
            // of the burst; the mesh stops rotating while hidden so they
            // stay valid.
            let mesh_target = model.transform_point3(self.corners[i % self.corners.len()]);
            self.particles.push(BurstParticle {
                start: impact,
                burst_target,
                mesh_target,
                current: impact,
            });
        }

        self.mesh_visible = false;
        self.connections.clear();
        self.connection_opacity = 0.0;
        self.progress = 0.0;
        self.animating = true;
    }

    fn step_burst(&mut self, dt: f32) {
        self.progress = (self.progress + PROGRESS_RATE * dt).min(1.0);
        let p = self.progress;

        if p <= 0.5 {
            // Outbound leg: fast launch, decelerating toward the apex.
            let t = ease::out_cubic(p * 2.0);
            for part in &mut self.particles {
                part.current = part.start.lerp(part.burst_target, t);
            }
            self.connections.clear();
            self.connection_opacity = 0.0;
        } else {
            // Inbound leg: accelerate from the apex onto the mesh corners.
            let t = ease::in_cubic(1.0 - (p - 0.5) * 2.0);
            for part in &mut self.particles {
                part.current = part.mesh_target.lerp(part.burst_target, t);
            }
            if p > 0.65 {
                self.rebuild_connections();
                let mut opacity = (((p - 0.65) * 6.0).min(1.0)) * 0.5;
                if p > 0.9 {
                    opacity *= (1.0 - (p - 0.9) * 8.0).max(0.0);
                }
                self.connection_opacity = opacity;
            }
        }

        self.burst_rotation += BURST_ROTATION * dt;

        if p >= 1.0 {
            self.particles.clear();
            self.connections.clear();
            self.connection_opacity = 0.0;
            self.burst_rotation = Vec3::ZERO;
            self.mesh_visible = true;
            self.animating = false;
        }
    }

    /// Index-ordered pair scan, capped so a dense cluster cannot flood
    /// the frame with lines.
    fn rebuild_connections(&mut self) {
        let cap = CONNECT_FRAME_CAP.min(self.max_connections);
        self.connections.clear();
        'outer: for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = self.particles[i].current;
                let b = self.particles[j].current;
                if a.distance(b) < CONNECT_DISTANCE {
                    self.connections.push((a, b));
                    if self.connections.len() >= cap {
                        break 'outer;
                    }
                }
            }
        }
    }
}

impl Morph for WireframeBody {
    fn update(&mut self, _now: f32, dt: f32, auto_rotation: Vec3) {
        if self.disposed {
            return;
        }
        if self.animating {
            self.step_burst(dt);
        }
        if self.mesh_visible && !self.animating {
            self.mesh_rotation += auto_rotation * dt;
        }
    }

    fn check_hover(&self, ray: &Ray) -> bool {
        if self.animating || self.disposed || !self.mesh_visible {
            return false;
        }
        let local = ray.transformed(self.mesh_model_matrix().inverse());
        self.mesh.raycast(&local).is_some()
    }

    fn handle_trigger(&mut self, ray: &Ray, _now: f32) -> bool {
        if self.animating || self.disposed || !self.mesh_visible {
            return false;
        }
        let model = self.mesh_model_matrix();
        let local = ray.transformed(model.inverse());
        match self.mesh.raycast(&local) {
            Some(hit) => {
                self.trigger_explosion(model.transform_point3(hit));
                true
            }
            None => false,
        }
    }

    fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.animating = false;
        self.particles.clear();
        self.connections.clear();
    }
}
