//! Parameter registry.
//!
//! [`ParameterRegistry`] captures the engine's parameters once, when the
//! bridge is created, and owns the listener registration on each of them.
//! It never owns parameter state: it holds shared handles only, and after
//! [`detach`](ParameterRegistry::detach) it stops resolving lookups so stale
//! UI calls during teardown fall through as unknown parameters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use paramlink_core::{Parameter, ParameterEngine, ParameterId, ParameterListener};

/// Ordered view of the engine's parameters with uid and id lookup.
pub struct ParameterRegistry {
    parameters: Vec<Arc<dyn Parameter>>,
    by_uid: HashMap<String, usize>,
    by_id: HashMap<ParameterId, usize>,
    attached: AtomicBool,
}

impl ParameterRegistry {
    /// Enumerate the engine's current parameters.
    ///
    /// On duplicate uids or colliding ids the first parameter wins lookups;
    /// every parameter is still attached and listed.
    pub fn new(engine: &dyn ParameterEngine) -> Self {
        let parameters = engine.parameters();
        let mut by_uid = HashMap::with_capacity(parameters.len());
        let mut by_id = HashMap::with_capacity(parameters.len());

        for (index, parameter) in parameters.iter().enumerate() {
            if by_uid.contains_key(parameter.uid()) {
                warn!("Duplicate parameter uid '{}'", parameter.uid());
            } else {
                by_uid.insert(parameter.uid().to_string(), index);
            }
            by_id.entry(parameter.id()).or_insert(index);
        }

        Self {
            parameters,
            by_uid,
            by_id,
            attached: AtomicBool::new(false),
        }
    }

    /// Register `listener` on every parameter.
    ///
    /// A parameter refusing the listener is logged and skipped; the others
    /// are still attached. Returns the number of successful registrations.
    pub fn attach(&self, listener: &Arc<dyn ParameterListener>) -> usize {
        let mut attached = 0;
        for parameter in &self.parameters {
            match parameter.add_listener(Arc::clone(listener)) {
                Ok(()) => attached += 1,
                Err(e) => warn!("Failed to attach to '{}': {}", parameter.uid(), e),
            }
        }
        self.attached.store(true, Ordering::Release);
        debug!(
            "Attached to {} of {} parameters",
            attached,
            self.parameters.len()
        );
        attached
    }

    /// Remove `listener` from every parameter.
    ///
    /// Unconditional: parameters where attaching failed get a removal call
    /// too. Safe to call more than once.
    pub fn detach(&self, listener: &Arc<dyn ParameterListener>) {
        if !self.attached.swap(false, Ordering::AcqRel) {
            return;
        }
        for parameter in &self.parameters {
            parameter.remove_listener(listener);
        }
        debug!("Detached from {} parameters", self.parameters.len());
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Look up an attached parameter by uid.
    pub fn find(&self, uid: &str) -> Option<&Arc<dyn Parameter>> {
        if !self.is_attached() {
            return None;
        }
        self.by_uid.get(uid).map(|&index| &self.parameters[index])
    }

    /// Look up an attached parameter by numeric id.
    pub fn find_by_id(&self, id: ParameterId) -> Option<&Arc<dyn Parameter>> {
        if !self.is_attached() {
            return None;
        }
        self.by_id.get(&id).map(|&index| &self.parameters[index])
    }

    /// Attached parameters in engine order. Empty once detached.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Parameter>> {
        let visible = if self.is_attached() {
            self.parameters.len()
        } else {
            0
        };
        self.parameters[..visible].iter()
    }

    /// Number of parameters captured from the engine.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl std::fmt::Debug for ParameterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterRegistry")
            .field("parameters", &self.parameters.len())
            .field("attached", &self.is_attached())
            .finish()
    }
}
