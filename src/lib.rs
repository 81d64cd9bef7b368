//! # sphera
//!
//! An interactive 3D sphere visualization: a particle sphere that
//! scatters and reconstructs, and a wireframe icosphere that bursts into
//! particles and reforms, with pointer tilt, scroll-driven camera sweep,
//! and scroll-banded theme colors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sphera::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Visualization::new()
//!         .with_theme(Theme::Purple)
//!         .run()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Interaction
//!
//! - Move the pointer to tilt the sphere; hovering it changes the cursor.
//! - Double-click the sphere to trigger its morph: the particle field
//!   scatters (and reconstructs on the next double-click), the wireframe
//!   bursts and reforms on its own.
//! - Press Space to switch between the particle field and the wireframe;
//!   the inactive one is frozen, not reset.
//! - Scroll to sweep the camera and cycle the theme color.
//!
//! ## Core Concepts
//!
//! Both scene objects implement [`Morph`]: a per-frame `update`, a
//! hover probe, a trigger, and a color push. The [`Router`] owns both
//! plus the camera, and forwards input to whichever is active.
//! Rendering is CPU-animated: positions are rewritten into instance
//! buffers every frame and drawn as billboarded point sprites and
//! thin-quad lines.

pub mod body;
pub mod camera;
pub mod config;
pub mod ease;
mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod mesh;
pub mod ray;
pub mod router;
pub mod theme;
pub mod time;
mod viz;

pub use config::{Capacities, DeviceClass, DeviceHints};
pub use error::{GpuError, VizError};
pub use glam::{Vec2, Vec3};
pub use router::{Mode, Router};
pub use theme::Theme;
pub use viz::Visualization;

use ray::Ray;

/// A scene object the router can drive: the particle field or the
/// wireframe body.
///
/// Implementations own all of their animation state; the router supplies
/// the frame clock, picking rays, and the shared auto-rotation rate.
pub trait Morph {
    /// Advance one frame. `now` and `dt` are seconds from the frame
    /// clock; `auto_rotation` is the baseline spin in radians per second.
    fn update(&mut self, now: f32, dt: f32, auto_rotation: Vec3);

    /// Whether the ray currently hits this object. Always false while an
    /// animation is in flight.
    fn check_hover(&self, ray: &Ray) -> bool;

    /// React to a double-click along `ray`. Returns whether the trigger
    /// was accepted; triggers during an animation are silently dropped.
    fn handle_trigger(&mut self, ray: &Ray, now: f32) -> bool;

    /// Push a new theme color. Takes effect immediately.
    fn set_color(&mut self, color: Vec3);

    /// Permanently halt the object. Further updates and triggers are
    /// no-ops.
    fn dispose(&mut self);
}

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::{Capacities, DeviceClass, DeviceHints};
    pub use crate::error::{GpuError, VizError};
    pub use crate::router::{Mode, Router};
    pub use crate::theme::Theme;
    pub use crate::time::Time;
    pub use crate::viz::Visualization;
    pub use crate::Morph;
    pub use crate::{Vec2, Vec3};
}
