//! Atomic floating-point parameter.
//!
//! [`FloatParameter`] is the engine-side [`Parameter`] implementation that
//! ships with paramlink. It stores its user value in an `AtomicU64`
//! (`f64::to_bits`), keeps its listener list behind an [`ArcSwap`] so
//! notification is lock-free, and reports user edits to an optional
//! [`HostHandler`].
//!
//! Two kinds of writes exist:
//!
//! - [`set_user_value`](FloatParameter::set_user_value) for changes that
//!   originate in the engine (host automation playback, modulation, preset
//!   loads). Listeners fire, the host is not told.
//! - [`set_user_value_notifying_host`](Parameter::set_user_value_notifying_host)
//!   for user edits. Listeners fire and the host receives `perform_edit`.
//!
//! Both clamp and snap to the range, and notify only when the stored value
//! actually changes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use paramlink_utils::fnv1a_32;

use crate::error::{ParameterError, ParameterResult};
use crate::parameter::{same_listener, HostHandler, Parameter, ParameterListener};
use crate::parameter_format::{DisplayConverter, Formatter};
use crate::parameter_info::ParameterInfo;
use crate::parameter_range::UserRange;
use crate::types::{ParameterId, ParameterValue};

struct HostLink(Arc<dyn HostHandler>);

/// Floating-point parameter with lock-free value and listener storage.
///
/// # Example
///
/// ```
/// use paramlink_core::{FloatParameter, Formatter, Parameter, ParameterInfo, UserRange};
///
/// let gain = FloatParameter::new(
///     ParameterInfo::new("gain", "Gain")
///         .with_range(UserRange::new(0.0, 1.0, 0.01))
///         .with_default(0.5),
/// )
/// .with_formatter(Formatter::Percent { precision: 0 });
///
/// gain.set_user_value(0.754);
/// assert_eq!(gain.user_value(), 0.75);
/// assert_eq!(gain.display_value_for(gain.user_value()).to_string(), "75%");
/// ```
pub struct FloatParameter {
    info: ParameterInfo,
    id: ParameterId,
    value: AtomicU64,
    converter: Box<dyn DisplayConverter>,
    listeners: ArcSwap<Vec<Arc<dyn ParameterListener>>>,
    host: ArcSwapOption<HostLink>,
}

impl FloatParameter {
    /// Create a parameter from its metadata.
    ///
    /// The default is clamped and snapped to the range. The converter starts
    /// as [`Formatter::default`].
    pub fn new(mut info: ParameterInfo) -> Self {
        info.default_value = info.range.snap(info.default_value);

        Self {
            id: fnv1a_32(info.uid),
            value: AtomicU64::new(info.default_value.to_bits()),
            info,
            converter: Box::new(Formatter::default()),
            listeners: ArcSwap::from_pointee(Vec::new()),
            host: ArcSwapOption::empty(),
        }
    }

    /// Use a [`Formatter`] for display conversion.
    pub fn with_formatter(self, formatter: Formatter) -> Self {
        self.with_converter(formatter)
    }

    /// Use a custom display converter.
    pub fn with_converter(mut self, converter: impl DisplayConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Parameter metadata.
    pub fn info(&self) -> &ParameterInfo {
        &self.info
    }

    /// Connect (or disconnect with `None`) the host edit handler.
    pub fn set_host_handler(&self, handler: Option<Arc<dyn HostHandler>>) {
        self.host.store(handler.map(|h| Arc::new(HostLink(h))));
    }

    /// Set the value from inside the engine.
    ///
    /// Returns `true` if the stored value changed. Safe on the audio thread
    /// as long as the registered listeners are.
    pub fn set_user_value(&self, value: ParameterValue) -> bool {
        match self.store(value) {
            Some(stored) => {
                self.notify(stored);
                true
            }
            None => false,
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.load().len()
    }

    fn load(&self) -> ParameterValue {
        f64::from_bits(self.value.load(Ordering::Relaxed))
    }

    fn store(&self, value: ParameterValue) -> Option<ParameterValue> {
        let snapped = self.info.range.snap(value);
        let previous = self.value.swap(snapped.to_bits(), Ordering::AcqRel);
        if previous == snapped.to_bits() {
            None
        } else {
            Some(snapped)
        }
    }

    fn notify(&self, value: ParameterValue) {
        for listener in self.listeners.load().iter() {
            listener.parameter_changed(self.id, value);
        }
    }

    fn with_host(&self, f: impl FnOnce(&dyn HostHandler)) {
        if let Some(link) = &*self.host.load() {
            f(link.0.as_ref());
        }
    }
}

impl Parameter for FloatParameter {
    fn uid(&self) -> &str {
        self.info.uid
    }

    fn id(&self) -> ParameterId {
        self.id
    }

    fn name(&self) -> &str {
        self.info.name
    }

    fn user_value(&self) -> ParameterValue {
        self.load()
    }

    fn user_default_value(&self) -> ParameterValue {
        self.info.default_value
    }

    fn user_range(&self) -> UserRange {
        self.info.range
    }

    fn set_user_value_notifying_host(&self, value: ParameterValue) {
        if let Some(stored) = self.store(value) {
            let normalized = self.info.range.normalize(stored);
            self.with_host(|host| host.perform_edit(self.id, normalized));
            self.notify(stored);
        }
    }

    fn begin_change_gesture(&self) {
        self.with_host(|host| host.begin_edit(self.id));
    }

    fn end_change_gesture(&self) {
        self.with_host(|host| host.end_edit(self.id));
    }

    fn converter(&self) -> &dyn DisplayConverter {
        self.converter.as_ref()
    }

    fn add_listener(&self, listener: Arc<dyn ParameterListener>) -> ParameterResult<()> {
        // Checked against the list being replaced, so concurrent adds of the
        // same listener cannot both succeed
        let mut duplicate = false;
        self.listeners.rcu(|current| {
            duplicate = current.iter().any(|l| same_listener(l, &listener));
            if duplicate {
                return Arc::clone(current);
            }
            let mut next = Vec::clone(current);
            next.push(Arc::clone(&listener));
            Arc::new(next)
        });

        if duplicate {
            return Err(ParameterError::ListenerRejected {
                uid: self.info.uid.to_string(),
            });
        }
        Ok(())
    }

    fn remove_listener(&self, listener: &Arc<dyn ParameterListener>) {
        self.listeners.rcu(|current| {
            let next: Vec<_> = current
                .iter()
                .filter(|l| !same_listener(l, listener))
                .cloned()
                .collect();
            Arc::new(next)
        });
    }
}

impl fmt::Debug for FloatParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatParameter")
            .field("info", &self.info)
            .field("id", &self.id)
            .field("value", &self.load())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
