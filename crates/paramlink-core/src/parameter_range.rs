//! User-space parameter ranges.
//!
//! A [`UserRange`] describes the interval a parameter's user value lives in,
//! plus an optional step size. It provides the clamping and snapping applied
//! by [`FloatParameter`](crate::FloatParameter) setters, and linear
//! normalization for host communication (hosts automate in 0.0 to 1.0).
//!
//! # Example
//!
//! ```
//! use paramlink_core::UserRange;
//!
//! let range = UserRange::new(0.0, 1.0, 0.01);
//! assert_eq!(range.snap(0.754), 0.75);
//! assert_eq!(range.clamp(1.5), 1.0);
//! assert_eq!(range.normalize(0.25), 0.25);
//!
//! let freq = UserRange::continuous(20.0, 20000.0);
//! assert_eq!(freq.denormalize(0.0), 20.0);
//! ```

/// Inclusive value range with an optional step.
///
/// `step == 0.0` means continuous.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserRange {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
    /// Step size, 0.0 for continuous.
    pub step: f64,
}

impl UserRange {
    /// Create a stepped range.
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Create a continuous range.
    pub const fn continuous(min: f64, max: f64) -> Self {
        Self { min, max, step: 0.0 }
    }

    /// Whether the bounds are finite, ordered, and the step non-negative.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min <= self.max
            && self.step >= 0.0
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` to `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }

    /// Snap `value` to the nearest step (relative to `min`) and clamp.
    ///
    /// Continuous ranges only clamp.
    pub fn snap(&self, value: f64) -> f64 {
        let value = self.clamp(value);
        if self.step <= 0.0 {
            return value;
        }
        let steps = ((value - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    /// Map a user value to 0.0-1.0.
    ///
    /// Degenerate ranges (`min == max`) map everything to 0.5.
    pub fn normalize(&self, value: f64) -> f64 {
        if (self.max - self.min).abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Map 0.0-1.0 back to a user value.
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let normalized = normalized.clamp(0.0, 1.0);
        self.min + normalized * (self.max - self.min)
    }
}

impl Default for UserRange {
    fn default() -> Self {
        Self::continuous(0.0, 1.0)
    }
}
