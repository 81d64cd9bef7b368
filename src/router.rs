//! Interaction router: owns the camera, both morphs, and the per-frame
//! dispatch between them.
//!
//! Pointer and scroll input arrive in normalized coordinates; the router
//! turns them into picking rays, pointer tilt, camera sweep, and theme
//! changes, and forwards exactly one hover probe and at most one trigger
//! to the active morph per frame.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::body::WireframeBody;
use crate::camera::Camera;
use crate::config::Capacities;
use crate::field::ParticleField;
use crate::ray::Ray;
use crate::theme::Theme;
use crate::Morph;

/// Baseline auto-rotation, radians per second per axis.
const AUTO_ROTATION: Vec3 = Vec3::new(0.6, 0.9, 0.3);
/// Per-tick convergence of the pointer tilt toward its target.
const TILT_LERP: f32 = 0.1;

/// Which morph is live. The inactive one keeps its state but is neither
/// updated nor rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Particles,
    Wireframe,
}

/// Pointer-follow tilt, applied on top of the auto-rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tilt {
    pub current: Vec2,
    target: Vec2,
    max: f32,
}

impl Tilt {
    fn new(max_deg: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            max: max_deg.to_radians(),
        }
    }

    fn set_pointer(&mut self, ndc: Vec2) {
        // Pointer x tilts around Y, pointer y around X.
        self.target = Vec2::new(-ndc.y, ndc.x) * self.max;
    }

    fn step(&mut self) {
        self.current += (self.target - self.current) * TILT_LERP;
    }
}

/// Owns the scene and routes input to whichever morph is active.
pub struct Router {
    pub camera: Camera,
    field: ParticleField,
    body: WireframeBody,
    mode: Mode,
    theme: Theme,
    tilt: Tilt,
    cursor_ndc: Option<Vec2>,
    hovering: bool,
}

impl Router {
    pub fn new(caps: &Capacities, aspect: f32, seed: u64, theme: Theme) -> Self {
        let color = theme.primary();
        let mut field_rng = StdRng::seed_from_u64(seed);
        let body_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        Self {
            camera: Camera::new(aspect),
            field: ParticleField::new(caps, color, &mut field_rng),
            body: WireframeBody::new(caps, color, body_rng),
            mode: Mode::Particles,
            theme,
            tilt: Tilt::new(caps.max_tilt_deg),
            cursor_ndc: None,
            hovering: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[inline]
    pub fn tilt(&self) -> Vec2 {
        self.tilt.current
    }

    /// Whether the last tick's hover probe hit the active morph.
    #[inline]
    pub fn hovering(&self) -> bool {
        self.hovering
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn body(&self) -> &WireframeBody {
        &self.body
    }

    fn active_mut(&mut self) -> &mut dyn Morph {
        match self.mode {
            Mode::Particles => &mut self.field,
            Mode::Wireframe => &mut self.body,
        }
    }

    fn active(&self) -> &dyn Morph {
        match self.mode {
            Mode::Particles => &self.field,
            Mode::Wireframe => &self.body,
        }
    }

    fn pick_ray(&self) -> Option<Ray> {
        self.cursor_ndc
            .map(|ndc| Ray::from_ndc(self.camera.view_proj(), ndc))
    }

    /// Advance the active morph one frame. `now` and `dt` come from the
    /// frame clock; the inactive morph is left untouched.
    pub fn tick(&mut self, now: f32, dt: f32) {
        self.tilt.step();
        self.active_mut().update(now, dt, AUTO_ROTATION);
        // One hover probe per frame, after positions settle.
        self.hovering = match self.pick_ray() {
            Some(ray) => self.active().check_hover(&ray),
            None => false,
        };
    }

    pub fn on_pointer_move(&mut self, ndc: Vec2) {
        self.cursor_ndc = Some(ndc);
        self.tilt.set_pointer(ndc);
    }

    pub fn on_pointer_left(&mut self) {
        self.cursor_ndc = None;
        self.hovering = false;
        self.tilt.target = Vec2::ZERO;
    }

    /// Double-click trigger. Returns whether the active morph accepted it.
    pub fn on_double_click(&mut self, now: f32) -> bool {
        match self.pick_ray() {
            Some(ray) => self.active_mut().handle_trigger(&ray, now),
            None => false,
        }
    }

    /// Swap the live morph. The outgoing morph keeps its state and is
    /// resumed as-is when toggled back.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Particles => Mode::Wireframe,
            Mode::Wireframe => Mode::Particles,
        };
        self.hovering = false;
    }

    /// Scroll relay: sweep the camera and push the scroll-band theme
    /// color to both morphs so the inactive one wakes up in sync.
    pub fn on_scroll(&mut self, fraction: f32) {
        self.camera.set_scroll(fraction);
        let theme = Theme::for_scroll(fraction);
        if theme != self.theme {
            self.theme = theme;
            let color = theme.primary();
            self.field.set_color(color);
            self.body.set_color(color);
        }
    }

    pub fn resize(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    pub fn dispose(&mut self) {
        self.field.dispose();
        self.body.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Phase;
    use crate::DeviceClass;

    fn router() -> Router {
        let caps = Capacities::for_class(DeviceClass::Desktop);
        Router::new(&caps, 16.0 / 9.0, 42, Theme::Purple)
    }

    #[test]
    fn test_double_click_routes_to_active_morph() {
        let mut r = router();
        r.on_pointer_move(Vec2::ZERO);
        assert!(r.on_double_click(0.0));
        assert_eq!(r.field().phase(), Phase::Scattering);
        assert!(!r.body().is_animating());
    }

    #[test]
    fn test_trigger_without_cursor_is_noop() {
        let mut r = router();
        assert!(!r.on_double_click(0.0));
        assert_eq!(r.field().phase(), Phase::Idle);
    }

    #[test]
    fn test_mode_toggle_preserves_inactive_state() {
        let mut r = router();
        r.on_pointer_move(Vec2::ZERO);
        assert!(r.on_double_click(0.0));
        // Let the scatter finish.
        r.tick(3.0, 1.0 / 60.0);
        assert_eq!(r.field().phase(), Phase::Scattered);
        let frozen = r.field().rotation();

        r.toggle_mode();
        assert_eq!(r.mode(), Mode::Wireframe);
        // Ticks only advance the wireframe now.
        r.tick(3.1, 1.0 / 60.0);
        r.tick(3.2, 1.0 / 60.0);
        assert_eq!(r.field().phase(), Phase::Scattered);
        assert_eq!(r.field().rotation(), frozen);

        r.toggle_mode();
        r.tick(3.3, 1.0 / 60.0);
        assert!(r.field().rotation() != frozen);
    }

    #[test]
    fn test_wireframe_trigger_after_toggle() {
        let mut r = router();
        r.toggle_mode();
        r.on_pointer_move(Vec2::ZERO);
        assert!(r.on_double_click(0.0));
        assert!(r.body().is_animating());
        assert_eq!(r.field().phase(), Phase::Idle);
    }

    #[test]
    fn test_hover_updates_on_tick() {
        let mut r = router();
        r.on_pointer_move(Vec2::ZERO);
        r.tick(0.0, 1.0 / 60.0);
        assert!(r.hovering());

        // Far corner of the screen misses the sphere.
        r.on_pointer_left();
        assert!(!r.hovering());
        r.tick(0.1, 1.0 / 60.0);
        assert!(!r.hovering());
    }

    #[test]
    fn test_scroll_relays_theme_to_both_morphs() {
        let mut r = router();
        r.on_scroll(0.3);
        assert_eq!(r.theme(), Theme::Blue);
        let expect = Theme::Blue.primary();
        assert!(r.field().colors().iter().all(|&c| c == expect));
        assert_eq!(r.body().color(), expect);
        // Camera swept away from the resting position.
        assert!(r.camera.position.x.abs() > 0.1);
    }

    #[test]
    fn test_tilt_converges_toward_pointer() {
        let mut r = router();
        r.on_pointer_move(Vec2::new(1.0, 0.0));
        for _ in 0..200 {
            r.tick(0.0, 1.0 / 60.0);
        }
        let max = 20f32.to_radians();
        // Pointer x maps to tilt y.
        assert!((r.tilt().y - max).abs() < 1e-3);
        assert!(r.tilt().x.abs() < 1e-3);
    }
}
