//! Easing functions for animation progress.
//!
//! Each function is a monotonic reparameterization of a normalized
//! progress value in `[0, 1]`, with `f(0) == 0` and `f(1) == 1`.

/// Decelerating cubic ease. Fast start, soft landing.
#[inline]
pub fn out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Symmetric cubic ease. Soft start and landing, fast middle.
#[inline]
pub fn in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Accelerating cubic ease. Soft start, fast landing.
#[inline]
pub fn in_cubic(t: f32) -> f32 {
    t * t * t
}
