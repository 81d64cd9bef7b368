//! Device-class detection and capacity configuration.
//!
//! Capacity constants (particle counts, connection buffer sizes, point
//! sizes) are resolved once at construction from a coarse device class,
//! so the policy is testable independent of how the class was detected.

/// Coarse hints about the host, gathered by the embedder.
#[derive(Debug, Clone, Copy)]
pub struct DeviceHints {
    /// Whether the host identifies as a mobile device.
    pub is_mobile: bool,
    /// Reported logical CPU core count.
    pub cpu_cores: u32,
    /// Viewport width in device pixels.
    pub viewport_width: u32,
}

impl DeviceHints {
    /// Hints for the local machine: never mobile, real core count.
    pub fn local(viewport_width: u32) -> Self {
        Self {
            is_mobile: false,
            cpu_cores: std::thread::available_parallelism()
                .map(|n| n.get() as u32)
                .unwrap_or(2),
            viewport_width,
        }
    }
}

/// Coarse device bucket used to pick capacity constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Mobile with fewer than 4 cores.
    LowEndMobile,
    /// Narrow viewport (<= 768 px) or mobile with enough cores.
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify from hints. Low-end wins over the viewport check.
    pub fn from_hints(hints: DeviceHints) -> Self {
        if hints.is_mobile && hints.cpu_cores < 4 {
            DeviceClass::LowEndMobile
        } else if hints.viewport_width <= 768 {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    fn is_narrow(&self) -> bool {
        !matches!(self, DeviceClass::Desktop)
    }
}

/// Capacity constants resolved from a [`DeviceClass`].
///
/// All buffers are preallocated from these values and never grow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacities {
    /// Number of points in the sphere particle field.
    pub particle_count: usize,
    /// Rendered point size for the sphere field.
    pub particle_size: f32,
    /// Maximum burst particles for the wireframe body.
    pub burst_capacity: usize,
    /// Rendered point size for burst particles.
    pub burst_particle_size: f32,
    /// Connection line buffer capacity for the burst effect.
    pub max_connections: usize,
    /// Maximum pointer tilt in degrees.
    pub max_tilt_deg: f32,
}

impl Capacities {
    /// Resolve capacity constants for a device class.
    pub fn for_class(class: DeviceClass) -> Self {
        let narrow = class.is_narrow();
        Self {
            particle_count: match class {
                DeviceClass::LowEndMobile => 800,
                DeviceClass::Mobile => 1000,
                DeviceClass::Desktop => 1500,
            },
            particle_size: if narrow { 0.035 } else { 0.04 },
            burst_capacity: 150,
            burst_particle_size: if narrow { 0.05 } else { 0.07 },
            max_connections: if narrow { 75 } else { 120 },
            max_tilt_deg: if narrow { 15.0 } else { 20.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_end_mobile_signature() {
        let class = DeviceClass::from_hints(DeviceHints {
            is_mobile: true,
            cpu_cores: 2,
            viewport_width: 390,
        });
        assert_eq!(class, DeviceClass::LowEndMobile);
        // Low-end constant, not the generic mobile or desktop ones.
        assert_eq!(Capacities::for_class(class).particle_count, 800);
    }

    #[test]
    fn test_capable_mobile_uses_viewport_bucket() {
        let class = DeviceClass::from_hints(DeviceHints {
            is_mobile: true,
            cpu_cores: 8,
            viewport_width: 390,
        });
        assert_eq!(class, DeviceClass::Mobile);
        assert_eq!(Capacities::for_class(class).particle_count, 1000);
    }

    #[test]
    fn test_desktop() {
        let class = DeviceClass::from_hints(DeviceHints {
            is_mobile: false,
            cpu_cores: 16,
            viewport_width: 2560,
        });
        assert_eq!(class, DeviceClass::Desktop);
        let caps = Capacities::for_class(class);
        assert_eq!(caps.particle_count, 1500);
        assert_eq!(caps.max_connections, 120);
        assert_eq!(caps.max_tilt_deg, 20.0);
    }

    #[test]
    fn test_narrow_desktop_counts_as_mobile() {
        let class = DeviceClass::from_hints(DeviceHints {
            is_mobile: false,
            cpu_cores: 8,
            viewport_width: 600,
        });
        assert_eq!(class, DeviceClass::Mobile);
        assert_eq!(Capacities::for_class(class).max_connections, 75);
    }
}
