//! The parameter contract the bridge consumes.
//!
//! The engine owns its parameters; everything else (the WebView bridge, a
//! host wrapper) talks to them through the [`Parameter`] trait and observes
//! them through [`ParameterListener`].
//!
//! # Thread Safety
//!
//! Parameters are shared between the audio thread (DSP reads, automation
//! writes), the UI thread (commands from the editor) and the host. All
//! methods take `&self` and implementations must be `Send + Sync`.
//! Listener callbacks are invoked synchronously on whichever thread
//! changed the value, so a [`ParameterListener`] must never block or
//! allocate.

use std::sync::Arc;

use paramlink_utils::fnv1a_32;

use crate::error::ParameterResult;
use crate::parameter_format::{DisplayConverter, DisplayValue};
use crate::parameter_range::UserRange;
use crate::types::{ParameterId, ParameterValue};

/// Observer of parameter value changes.
pub trait ParameterListener: Send + Sync {
    /// Called after the value of parameter `id` changed to `value`.
    ///
    /// May run on the audio thread. Must not block, lock or allocate.
    fn parameter_changed(&self, id: ParameterId, value: ParameterValue);
}

/// Host side of parameter edits (automation recording, undo grouping).
///
/// Mirrors the host component handler of plugin formats: every user edit is
/// bracketed by `begin_edit`/`end_edit` and reported with `perform_edit`
/// using the normalized (0.0-1.0) value.
pub trait HostHandler: Send + Sync {
    /// A user gesture on `id` started.
    fn begin_edit(&self, id: ParameterId);

    /// The user moved `id` to `normalized`.
    fn perform_edit(&self, id: ParameterId, normalized: ParameterValue);

    /// The user gesture on `id` ended.
    fn end_edit(&self, id: ParameterId);
}

/// A single engine parameter.
pub trait Parameter: Send + Sync {
    /// Stable unique identifier.
    fn uid(&self) -> &str;

    /// Numeric id used in listener notifications.
    ///
    /// Defaults to the FNV-1a hash of [`uid`](Self::uid).
    fn id(&self) -> ParameterId {
        fnv1a_32(self.uid())
    }

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Current user value.
    fn user_value(&self) -> ParameterValue;

    /// Default user value.
    fn user_default_value(&self) -> ParameterValue;

    /// User-space range.
    fn user_range(&self) -> UserRange;

    /// Set the user value and report it to the host as an edit.
    ///
    /// Listeners fire synchronously on the calling thread.
    fn set_user_value_notifying_host(&self, value: ParameterValue);

    /// Set the user value as a complete user action.
    ///
    /// Equivalent to a one-shot gesture: begin, set notifying host, end.
    fn set_user_value_as_user_action(&self, value: ParameterValue) {
        self.begin_change_gesture();
        self.set_user_value_notifying_host(value);
        self.end_change_gesture();
    }

    /// Signal the start of an interactive edit to the host.
    fn begin_change_gesture(&self);

    /// Signal the end of an interactive edit to the host.
    fn end_change_gesture(&self);

    /// The parameter's display conversion.
    fn converter(&self) -> &dyn DisplayConverter;

    /// Format `value` with this parameter's converter.
    fn display_value_for(&self, value: ParameterValue) -> DisplayValue {
        self.converter().to_display(value)
    }

    /// Parse display text with this parameter's converter.
    fn value_for_display(&self, text: &str) -> Option<ParameterValue> {
        self.converter().from_display(text)
    }

    /// Register a listener.
    fn add_listener(&self, listener: Arc<dyn ParameterListener>) -> ParameterResult<()>;

    /// Unregister a listener. Unknown listeners are ignored.
    fn remove_listener(&self, listener: &Arc<dyn ParameterListener>);
}

/// Compare two listener handles by the object they point to.
///
/// Vtable pointers of the same object can differ between codegen units, so
/// only the data pointer is compared.
pub fn same_listener(a: &Arc<dyn ParameterListener>, b: &Arc<dyn ParameterListener>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
