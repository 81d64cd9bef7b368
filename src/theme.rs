//! Color themes and scroll-driven theme selection.
//!
//! The page scroll position (normalized to `[0, 1]`) selects a named theme;
//! the router pushes the theme's primary color into both morphs and the
//! scene light. Nothing else mutates colors.

use glam::Vec3;

/// Named color theme with a single primary color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Blue,
    #[default]
    Purple,
    Red,
    Green,
    Orange,
}

impl Theme {
    /// Primary color as linear RGB in `[0, 1]`.
    pub fn primary(&self) -> Vec3 {
        match self {
            Theme::Blue => rgb_hex(0x0080ff),
            Theme::Purple => rgb_hex(0x8000ff),
            Theme::Red => rgb_hex(0xff4757),
            Theme::Green => rgb_hex(0x00ff88),
            Theme::Orange => rgb_hex(0xff9500),
        }
    }

    /// Select the theme for a normalized scroll fraction.
    ///
    /// The bands cycle through the palette so every page section gets a
    /// distinct accent; out-of-range input clamps to the nearest band.
    pub fn for_scroll(fraction: f32) -> Theme {
        let s = fraction.clamp(0.0, 1.0);
        if s < 0.12 {
            Theme::Purple
        } else if s < 0.25 {
            Theme::Green
        } else if s < 0.38 {
            Theme::Blue
        } else if s < 0.52 {
            Theme::Orange
        } else if s < 0.66 {
            Theme::Red
        } else if s < 0.8 {
            Theme::Purple
        } else {
            Theme::Green
        }
    }
}

/// Convert a packed `0xRRGGBB` value to an RGB vector.
pub fn rgb_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Convert an HSL color to RGB. All components in `[0, 1]`.
///
/// Used by the scatter shimmer, which cycles hue per particle per tick.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    if s <= 0.0 {
        return Vec3::splat(l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
