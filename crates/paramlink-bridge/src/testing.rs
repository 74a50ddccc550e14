//! Shared test doubles for the bridge.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use paramlink_core::{
    DisplayConverter, FloatParameter, Formatter, Parameter, ParameterEngine, ParameterId,
    ParameterInfo, ParameterListener, ParameterResult, ParameterSet, ParameterValue, UserRange,
};
use parking_lot::Mutex;
use serde_json::Value;

use crate::messages::ParameterUpdate;
use crate::webview::{CommandHandler, WebView};

/// "gain" (0-1 in 0.01 steps, percent) and "freq" (20 Hz-20 kHz).
pub fn gain_engine() -> ParameterSet {
    ParameterSet::new(vec![
        FloatParameter::new(
            ParameterInfo::new("gain", "Gain")
                .with_range(UserRange::new(0.0, 1.0, 0.01))
                .with_default(0.5),
        )
        .with_formatter(Formatter::Percent { precision: 0 }),
        FloatParameter::new(
            ParameterInfo::new("freq", "Frequency")
                .with_range(UserRange::continuous(20.0, 20000.0))
                .with_default(1000.0),
        )
        .with_formatter(Formatter::Frequency),
    ])
    .expect("valid test parameters")
}

pub struct NullListener;

impl ParameterListener for NullListener {
    fn parameter_changed(&self, _id: ParameterId, _value: ParameterValue) {}
}

/// Wraps a real parameter and records or sabotages selected calls.
pub struct ScriptedParameter {
    inner: Arc<FloatParameter>,
    reject_listeners: AtomicBool,
    panic_on_set: AtomicBool,
    linked: Mutex<Option<(Arc<FloatParameter>, ParameterValue)>>,
    gate: Mutex<Option<(Sender<()>, Receiver<()>)>>,
    log: Arc<Mutex<Vec<String>>>,
}

impl ScriptedParameter {
    fn record(&self, event: &str) {
        self.log.lock().push(format!("{} {}", event, self.inner.uid()));
    }

    fn wait_at_gate(&self) {
        let gate = self.gate.lock().clone();
        if let Some((entered, release)) = gate {
            entered.send(()).expect("gate observer dropped");
            release.recv().expect("gate released");
        }
    }
}

impl Parameter for ScriptedParameter {
    fn uid(&self) -> &str {
        self.inner.uid()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn user_value(&self) -> ParameterValue {
        self.inner.user_value()
    }

    fn user_default_value(&self) -> ParameterValue {
        self.inner.user_default_value()
    }

    fn user_range(&self) -> UserRange {
        self.inner.user_range()
    }

    fn set_user_value_notifying_host(&self, value: ParameterValue) {
        self.inner.set_user_value_notifying_host(value);
        let linked = self.linked.lock().clone();
        if let Some((target, linked_value)) = linked {
            target.set_user_value(linked_value);
        }
        self.wait_at_gate();
        if self.panic_on_set.load(Ordering::Relaxed) {
            panic!("scripted panic while setting '{}'", self.inner.uid());
        }
    }

    fn begin_change_gesture(&self) {
        self.record("begin");
        self.inner.begin_change_gesture();
    }

    fn end_change_gesture(&self) {
        self.record("end");
        self.inner.end_change_gesture();
    }

    fn converter(&self) -> &dyn DisplayConverter {
        self.inner.converter()
    }

    fn add_listener(&self, listener: Arc<dyn ParameterListener>) -> ParameterResult<()> {
        if self.reject_listeners.load(Ordering::Relaxed) {
            return Err(paramlink_core::ParameterError::ListenerRejected {
                uid: self.inner.uid().to_string(),
            });
        }
        self.inner.add_listener(listener)
    }

    fn remove_listener(&self, listener: &Arc<dyn ParameterListener>) {
        self.record("remove");
        self.inner.remove_listener(listener);
    }
}

/// Engine over [`gain_engine`] with scriptable failures and a call log.
pub struct ScriptedEngine {
    parameters: Vec<Arc<ScriptedParameter>>,
    log: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEngine {
    pub fn gain() -> Self {
        let log = Arc::new(Mutex::new(Vec::new()));
        let parameters = gain_engine()
            .iter()
            .map(|inner| {
                Arc::new(ScriptedParameter {
                    inner: Arc::clone(inner),
                    reject_listeners: AtomicBool::new(false),
                    panic_on_set: AtomicBool::new(false),
                    linked: Mutex::new(None),
                    gate: Mutex::new(None),
                    log: Arc::clone(&log),
                })
            })
            .collect();
        Self { parameters, log }
    }

    /// Panic after every set of `uid`.
    pub fn panic_on_set(self, uid: &str) -> Self {
        if let Some(p) = self.find(uid) {
            p.panic_on_set.store(true, Ordering::Relaxed);
        }
        self
    }

    /// Refuse listener registration on `uid`.
    pub fn reject_listeners(self, uid: &str) -> Self {
        if let Some(p) = self.find(uid) {
            p.reject_listeners.store(true, Ordering::Relaxed);
        }
        self
    }

    /// Setting `uid` also moves `target` to `value` from inside the engine.
    pub fn link_set(self, uid: &str, target: &str, value: ParameterValue) -> Self {
        let target = self.find(target).map(|p| Arc::clone(&p.inner));
        if let (Some(p), Some(target)) = (self.find(uid), target) {
            *p.linked.lock() = Some((target, value));
        }
        self
    }

    /// Make every set of `uid` block until the returned gate releases it.
    pub fn hold_set(&self, uid: &str) -> SetGate {
        let (entered_tx, entered_rx) = crossbeam_channel::unbounded();
        let (release_tx, release_rx) = crossbeam_channel::unbounded();
        if let Some(p) = self.find(uid) {
            *p.gate.lock() = Some((entered_tx, release_rx));
        }
        SetGate {
            entered: entered_rx,
            release: release_tx,
        }
    }

    /// Recorded begin/end gesture calls, e.g. `"begin gain"`.
    pub fn gestures(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter(|e| e.starts_with("begin ") || e.starts_with("end "))
            .cloned()
            .collect()
    }

    /// Uids that saw a `remove_listener` call, in order.
    pub fn removals(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| e.strip_prefix("remove "))
            .map(str::to_string)
            .collect()
    }

    fn find(&self, uid: &str) -> Option<&Arc<ScriptedParameter>> {
        self.parameters.iter().find(|p| p.uid() == uid)
    }
}

/// Control side of [`ScriptedEngine::hold_set`].
pub struct SetGate {
    entered: Receiver<()>,
    release: Sender<()>,
}

impl SetGate {
    /// Block until a set has stored its value and is waiting.
    pub fn wait_entered(&self) {
        self.entered.recv().expect("set entered the gate");
    }

    /// Let one waiting set return.
    pub fn release(&self) {
        self.release.send(()).expect("set still waiting");
    }
}

impl ParameterEngine for ScriptedEngine {
    fn parameters(&self) -> Vec<Arc<dyn Parameter>> {
        self.parameters
            .iter()
            .map(|p| Arc::clone(p) as Arc<dyn Parameter>)
            .collect()
    }
}

/// WebView double that keeps bound handlers and evaluated scripts.
pub struct RecordingWebView {
    update_function: String,
    handlers: Mutex<HashMap<String, CommandHandler>>,
    scripts: Mutex<Vec<String>>,
}

impl RecordingWebView {
    pub fn new(update_function: &str) -> Self {
        Self {
            update_function: update_function.to_string(),
            handlers: Mutex::new(HashMap::new()),
            scripts: Mutex::new(Vec::new()),
        }
    }

    /// Invoke a bound command the way page script would.
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        let handlers = self.handlers.lock();
        let handler = handlers
            .get(name)
            .unwrap_or_else(|| panic!("'{}' is not bound", name));
        handler(args)
    }

    pub fn bound_names(&self) -> Vec<String> {
        self.handlers.lock().keys().cloned().collect()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().clone()
    }

    /// Evaluated scripts decoded back into updates.
    pub fn updates(&self) -> Vec<ParameterUpdate> {
        let prefix = format!("{}(", self.update_function);
        self.scripts
            .lock()
            .iter()
            .map(|script| {
                let payload = script
                    .strip_prefix(&prefix)
                    .and_then(|rest| rest.strip_suffix(')'))
                    .unwrap_or_else(|| panic!("unexpected script {}", script));
                serde_json::from_str(payload).expect("update payload")
            })
            .collect()
    }
}

impl WebView for RecordingWebView {
    fn bind(&self, name: &str, handler: CommandHandler) {
        self.handlers.lock().insert(name.to_string(), handler);
    }

    fn evaluate(&self, script: &str) {
        self.scripts.lock().push(script.to_string());
    }
}
