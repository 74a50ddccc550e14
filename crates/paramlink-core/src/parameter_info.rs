//! Parameter metadata.

use crate::parameter_range::UserRange;

/// Static description of a parameter.
///
/// Built with `const` builder methods so plugins can declare their
/// parameters in statics:
///
/// ```
/// use paramlink_core::{ParameterInfo, UserRange};
///
/// const GAIN: ParameterInfo = ParameterInfo::new("gain", "Gain")
///     .with_range(UserRange::new(0.0, 1.0, 0.01))
///     .with_default(0.5);
/// assert_eq!(GAIN.uid, "gain");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterInfo {
    /// Stable unique identifier, also the key the UI uses.
    pub uid: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Default user value.
    pub default_value: f64,
    /// User-space range.
    pub range: UserRange,
}

impl ParameterInfo {
    /// Create a 0.0-1.0 continuous parameter defaulting to 0.5.
    pub const fn new(uid: &'static str, name: &'static str) -> Self {
        Self {
            uid,
            name,
            default_value: 0.5,
            range: UserRange::continuous(0.0, 1.0),
        }
    }

    /// Set the default user value.
    pub const fn with_default(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    /// Set the range.
    pub const fn with_range(mut self, range: UserRange) -> Self {
        self.range = range;
        self
    }
}
