//! Ordered parameter collection backed by [`FloatParameter`]s.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{ParameterError, ParameterResult};
use crate::float_parameter::FloatParameter;
use crate::parameter::{HostHandler, Parameter};
use crate::parameter_store::ParameterEngine;

/// A fixed, ordered set of parameters.
///
/// Construction validates the declarations: every range must be usable and
/// every uid (and the numeric id derived from it) must be unique.
#[derive(Debug)]
pub struct ParameterSet {
    parameters: Vec<Arc<FloatParameter>>,
}

impl ParameterSet {
    /// Build a set, in the given order.
    pub fn new(parameters: Vec<FloatParameter>) -> ParameterResult<Self> {
        let mut uids = HashSet::with_capacity(parameters.len());
        let mut ids = HashMap::with_capacity(parameters.len());

        for parameter in &parameters {
            let info = parameter.info();
            if !info.range.is_valid() {
                return Err(ParameterError::InvalidRange {
                    uid: info.uid.to_string(),
                    min: info.range.min,
                    max: info.range.max,
                });
            }
            if !uids.insert(info.uid) {
                return Err(ParameterError::DuplicateUid {
                    uid: info.uid.to_string(),
                });
            }
            if let Some(other) = ids.insert(parameter.id(), info.uid) {
                return Err(ParameterError::IdCollision {
                    uid: info.uid.to_string(),
                    other: other.to_string(),
                });
            }
        }

        Ok(Self {
            parameters: parameters.into_iter().map(Arc::new).collect(),
        })
    }

    /// Typed lookup by uid.
    pub fn get(&self, uid: &str) -> Option<&Arc<FloatParameter>> {
        self.parameters.iter().find(|p| p.uid() == uid)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<FloatParameter>> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Connect every parameter to the host's edit handler.
    pub fn set_host_handler(&self, handler: Option<Arc<dyn HostHandler>>) {
        for parameter in &self.parameters {
            parameter.set_host_handler(handler.clone());
        }
    }
}

impl ParameterEngine for ParameterSet {
    fn parameters(&self) -> Vec<Arc<dyn Parameter>> {
        self.parameters
            .iter()
            .map(|p| Arc::clone(p) as Arc<dyn Parameter>)
            .collect()
    }

    fn parameter(&self, uid: &str) -> Option<Arc<dyn Parameter>> {
        self.get(uid).map(|p| Arc::clone(p) as Arc<dyn Parameter>)
    }
}
