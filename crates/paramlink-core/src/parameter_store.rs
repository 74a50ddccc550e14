//! The engine-level parameter collection.
//!
//! [`ParameterEngine`] is the enumeration and lookup surface the bridge
//! attaches to. The engine's parameter set is fixed for the lifetime of an
//! attachment; parameters added or removed later are not observed.

use std::sync::Arc;

use crate::parameter::Parameter;

/// Collection of engine parameters.
///
/// # Example
///
/// ```
/// use paramlink_core::{FloatParameter, ParameterEngine, ParameterInfo, ParameterSet};
///
/// let engine = ParameterSet::new(vec![
///     FloatParameter::new(ParameterInfo::new("gain", "Gain")),
///     FloatParameter::new(ParameterInfo::new("mix", "Mix")),
/// ])
/// .unwrap();
///
/// assert_eq!(engine.parameters().len(), 2);
/// assert!(engine.parameter("mix").is_some());
/// assert!(engine.parameter("drive").is_none());
/// ```
pub trait ParameterEngine: Send + Sync {
    /// All parameters, in declaration order.
    fn parameters(&self) -> Vec<Arc<dyn Parameter>>;

    /// Find a parameter by uid.
    ///
    /// Default implementation searches linearly through all parameters.
    fn parameter(&self, uid: &str) -> Option<Arc<dyn Parameter>> {
        self.parameters().into_iter().find(|p| p.uid() == uid)
    }
}

impl<E: ParameterEngine + ?Sized> ParameterEngine for Arc<E> {
    fn parameters(&self) -> Vec<Arc<dyn Parameter>> {
        (**self).parameters()
    }

    fn parameter(&self, uid: &str) -> Option<Arc<dyn Parameter>> {
        (**self).parameter(uid)
    }
}
