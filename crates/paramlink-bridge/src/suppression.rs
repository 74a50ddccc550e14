//! Echo suppression.
//!
//! When the UI sets a parameter, the engine setter calls straight back into
//! the bridge's listener. The UI already shows that value, so pushing it back
//! would be redundant and could race with the UI's own in-flight state.
//! [`EchoSuppressor`] is what the listener checks to skip such echoes.
//!
//! Suppression is only ever entered through a [`SuppressionGuard`], which
//! leaves it again when dropped. A guard lives for the duration of one engine
//! mutation and is released on every exit path, unwinding included.
//!
//! The suppressor counts active guards instead of storing a flag, so guards
//! held by overlapping commands on different threads may be released in any
//! order. The bridge is back in [`PropagationState::Idle`] as soon as the
//! last guard is gone.
//!
//! # Scope
//!
//! There is one suppressor per bridge, not one per parameter. An engine-side
//! change to another parameter that fires while a UI mutation is in flight
//! is suppressed as well.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Propagation state of a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationState {
    /// Engine changes are pushed to the UI.
    Idle,
    /// A UI-originated mutation is in flight; its echo is dropped.
    SuppressingEcho,
}

/// Count of in-flight UI mutations.
#[derive(Debug, Default)]
pub struct EchoSuppressor {
    depth: AtomicUsize,
}

impl EchoSuppressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter [`PropagationState::SuppressingEcho`] until the guard drops.
    ///
    /// Guards nest and may overlap across threads; suppression ends when
    /// every guard has been dropped.
    pub fn suppress(&self) -> SuppressionGuard<'_> {
        self.depth.fetch_add(1, Ordering::AcqRel);
        SuppressionGuard { depth: &self.depth }
    }

    /// Whether listener notifications are currently dropped.
    ///
    /// Lock-free, called from listener callbacks.
    #[inline]
    pub fn is_suppressing(&self) -> bool {
        self.depth.load(Ordering::Acquire) > 0
    }

    pub fn state(&self) -> PropagationState {
        if self.is_suppressing() {
            PropagationState::SuppressingEcho
        } else {
            PropagationState::Idle
        }
    }
}

/// Scope of a suppressed mutation. Dropping it ends this guard's share of
/// the suppression.
#[must_use = "suppression ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SuppressionGuard<'a> {
    depth: &'a AtomicUsize,
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::AcqRel);
    }
}
