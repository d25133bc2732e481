//! Per-frame exponential smoothing.
//!
//! Every animated attribute keeps an actual value and chases a target that
//! is recomputed each frame: `actual <- actual + (target - actual) * alpha`.
//! Convergence time therefore depends on alpha and the frame rate, not on a
//! wall-clock schedule, and values never overshoot for `alpha` in `[0, 1]`.

use folio_protocol::{Color, Vec3};

/// Values that can be linearly interpolated toward a target.
pub trait Lerp: Copy {
    fn lerp(self, target: Self, alpha: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(self, target: Self, alpha: f64) -> Self {
        self + (target - self) * alpha
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, target: Self, alpha: f64) -> Self {
        Vec3::new(
            self.x.lerp(target.x, alpha),
            self.y.lerp(target.y, alpha),
            self.z.lerp(target.z, alpha),
        )
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(self, target: Self, alpha: f64) -> Self {
        let a = alpha as f32;
        Color::rgba(
            self.r + (target.r - self.r) * a,
            self.g + (target.g - self.g) * a,
            self.b + (target.b - self.b) * a,
            self.a + (target.a - self.a) * a,
        )
    }
}

/// `actual + (target - actual) * alpha`.
#[inline]
pub fn lerp<T: Lerp>(actual: T, target: T, alpha: f64) -> T {
    actual.lerp(target, alpha)
}

/// An animated attribute.
///
/// Starts uninitialized: the first [`tick`](Self::tick) adopts the target
/// exactly, so an element never visibly slides in from a default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed<T> {
    value: Option<T>,
}

impl<T: Lerp> Smoothed<T> {
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Start from a known value; the first tick interpolates from it.
    pub fn with_value(value: T) -> Self {
        Self { value: Some(value) }
    }

    /// Advance one frame toward `target` and return the new actual value.
    pub fn tick(&mut self, target: T, alpha: f64) -> T {
        let next = match self.value {
            None => target,
            Some(actual) => actual.lerp(target, alpha),
        };
        self.value = Some(next);
        next
    }

    /// Current value, if the attribute has been ticked or seeded.
    pub fn value(&self) -> Option<T> {
        self.value
    }

    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }

    /// Forget the current value; the next tick snaps again.
    pub fn reset(&mut self) {
        self.value = None;
    }
}

impl<T: Lerp> Default for Smoothed<T> {
    fn default() -> Self {
        Self::new()
    }
}
