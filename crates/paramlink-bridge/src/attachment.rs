//! Wiring an engine to a WebView.
//!
//! A [`ParameterAttachment`] is the bridge instance: it registers its
//! listener on every engine parameter, binds the command surface on the
//! WebView, and delivers queued pushes when the UI thread pumps it. Dropping
//! it detaches from every parameter.
//!
//! # Example
//!
//! ```ignore
//! use paramlink_bridge::{BridgeConfig, ParameterAttachment};
//!
//! let attachment = ParameterAttachment::new(&engine, webview, BridgeConfig::new());
//!
//! // On the UI thread, from the editor's timer or idle callback:
//! attachment.dispatch_pending();
//! ```

use std::sync::Arc;

use log::{debug, error, warn};
use paramlink_core::{ParameterEngine, ParameterListener, ParameterValue};

use crate::commands::{Command, ParameterCommands};
use crate::config::BridgeConfig;
use crate::messages::{update_script, ParameterUpdate};
use crate::propagation::{ChangeForwarder, PushQueue};
use crate::registry::ParameterRegistry;
use crate::suppression::{EchoSuppressor, PropagationState};
use crate::webview::WebView;

/// Lifecycle of something that connects engine state to a web UI.
///
/// `add_listeners` and `add_bindings` run once when the attachment is
/// created; `remove_listeners` runs when it is torn down.
pub trait Attachment {
    /// Start observing the engine.
    fn add_listeners(&self);

    /// Bind commands on the WebView.
    fn add_bindings(&self);

    /// Stop observing the engine. Must be idempotent.
    fn remove_listeners(&self);
}

/// Bidirectional parameter bridge between an engine and a WebView.
pub struct ParameterAttachment<W: WebView> {
    commands: Arc<ParameterCommands>,
    listener: Arc<dyn ParameterListener>,
    queue: Arc<PushQueue>,
    webview: W,
    config: BridgeConfig,
}

impl<W: WebView> ParameterAttachment<W> {
    /// Attach to every parameter of `engine` and bind the commands on
    /// `webview`.
    pub fn new(engine: &dyn ParameterEngine, webview: W, config: BridgeConfig) -> Self {
        let suppressor = Arc::new(EchoSuppressor::new());
        let queue = Arc::new(PushQueue::with_capacity(config.queue_capacity));
        let listener: Arc<dyn ParameterListener> =
            Arc::new(ChangeForwarder::new(Arc::clone(&suppressor), Arc::clone(&queue)));
        let registry = ParameterRegistry::new(engine);

        let attachment = Self {
            commands: Arc::new(ParameterCommands::new(
                registry,
                suppressor,
                Arc::clone(&queue),
            )),
            listener,
            queue,
            webview,
            config,
        };
        attachment.add_listeners();
        attachment.add_bindings();
        attachment
    }

    /// The command surface, for calling commands natively.
    pub fn commands(&self) -> &Arc<ParameterCommands> {
        &self.commands
    }

    pub fn webview(&self) -> &W {
        &self.webview
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn state(&self) -> PropagationState {
        self.commands.state()
    }

    /// Deliver every queued push to the WebView.
    ///
    /// Must be called on the UI thread. If the queue overflowed since the
    /// last call, the queued pushes are replaced by the current value of
    /// every attached parameter. Returns the number of pushes evaluated.
    pub fn dispatch_pending(&self) -> usize {
        let overflowed = self.queue.take_overflow();
        let pending = self.queue.drain();
        let registry = self.commands.registry();

        if overflowed {
            warn!(
                "Push queue overflowed, resynchronizing {} parameters",
                registry.len()
            );
            return registry
                .iter()
                .filter(|p| self.push(p.uid(), p.user_value()))
                .count();
        }

        pending
            .iter()
            .filter_map(|push| registry.find_by_id(push.id).map(|p| (p, push.value)))
            .filter(|(p, value)| self.push(p.uid(), *value))
            .count()
    }

    fn push(&self, uid: &str, value: ParameterValue) -> bool {
        let update = ParameterUpdate {
            parameter: uid.to_string(),
            value,
        };
        match update_script(self.config.update_function, &update) {
            Ok(script) => {
                self.webview.evaluate(&script);
                true
            }
            Err(e) => {
                error!("Failed to serialize update for '{}': {}", uid, e);
                false
            }
        }
    }
}

impl<W: WebView> Attachment for ParameterAttachment<W> {
    fn add_listeners(&self) {
        self.commands.registry().attach(&self.listener);
    }

    fn add_bindings(&self) {
        for command in Command::ALL {
            let name = self.config.bound_name(command);
            let commands = Arc::clone(&self.commands);
            self.webview
                .bind(&name, Box::new(move |args| commands.dispatch(command, args)));
            debug!("Bound '{}'", name);
        }
    }

    fn remove_listeners(&self) {
        self.commands.registry().detach(&self.listener);
    }
}

impl<W: WebView> Drop for ParameterAttachment<W> {
    fn drop(&mut self) {
        self.remove_listeners();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{gain_engine, RecordingWebView};
    use approx::assert_relative_eq;
    use paramlink_core::{Parameter, ParameterSet};
    use serde_json::{json, Value};

    fn attach(
        engine: &ParameterSet,
        config: BridgeConfig,
    ) -> (ParameterAttachment<Arc<RecordingWebView>>, Arc<RecordingWebView>) {
        let webview = Arc::new(RecordingWebView::new(config.update_function));
        let attachment = ParameterAttachment::new(engine, Arc::clone(&webview), config);
        (attachment, webview)
    }

    fn gain(engine: &ParameterSet) -> f64 {
        engine.get("gain").map(|p| p.user_value()).unwrap_or(f64::NAN)
    }

    #[test]
    fn test_binds_every_command() {
        let engine = gain_engine();
        let (_attachment, webview) = attach(&engine, BridgeConfig::new().with_prefix("fx_"));

        let mut names = webview.bound_names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "fx_endPluginParameterGesture",
                "fx_getDisplayValue",
                "fx_getPluginParameters",
                "fx_setDisplayValue",
                "fx_startPluginParameterGesture",
                "fx_updatePluginParameter",
            ]
        );
    }

    #[test]
    fn test_engine_changes_are_pushed_in_order() {
        let engine = gain_engine();
        let (attachment, webview) = attach(&engine, BridgeConfig::new());
        let gain_param = engine.get("gain").unwrap();

        gain_param.set_user_value(0.1);
        gain_param.set_user_value(0.2);
        gain_param.set_user_value(0.3);
        // Nothing reaches the page before the UI thread pumps
        assert!(webview.scripts().is_empty());

        assert_eq!(attachment.dispatch_pending(), 3);
        let updates = webview.updates();
        assert_eq!(updates.len(), 3);
        assert!(updates.iter().all(|u| u.parameter == "gain"));
        assert_relative_eq!(updates[2].value, 0.3);

        // Drained
        assert_eq!(attachment.dispatch_pending(), 0);
    }

    #[test]
    fn test_changes_from_audio_thread() {
        let engine = Arc::new(gain_engine());
        let webview = Arc::new(RecordingWebView::new("window.ui.updateParameterState"));
        let attachment =
            ParameterAttachment::new(&*engine, Arc::clone(&webview), BridgeConfig::new());

        let audio_engine = Arc::clone(&engine);
        std::thread::spawn(move || {
            if let Some(freq) = audio_engine.get("freq") {
                freq.set_user_value(440.0);
                freq.set_user_value(880.0);
            }
        })
        .join()
        .unwrap();

        assert_eq!(attachment.dispatch_pending(), 2);
        let updates = webview.updates();
        assert_eq!(updates[1].parameter, "freq");
        assert_relative_eq!(updates[1].value, 880.0);
    }

    #[test]
    fn test_set_value_command_is_not_echoed() {
        let engine = gain_engine();
        let (attachment, webview) = attach(&engine, BridgeConfig::new());

        let reply = webview.call(
            "updatePluginParameter",
            &[json!({ "parameter": "gain", "value": 0.75 })],
        );
        assert_eq!(reply, Value::Null);
        assert_relative_eq!(gain(&engine), 0.75);

        assert_eq!(attachment.dispatch_pending(), 0);
        assert!(webview.scripts().is_empty());
        assert_eq!(attachment.state(), PropagationState::Idle);
    }

    #[test]
    fn test_set_display_command_pushes_once() {
        let engine = gain_engine();
        let (attachment, webview) = attach(&engine, BridgeConfig::new());

        webview.call("setDisplayValue", &[json!("gain"), json!("75%")]);
        assert_relative_eq!(gain(&engine), 0.75);

        assert_eq!(attachment.dispatch_pending(), 1);
        let updates = webview.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].parameter, "gain");
        assert_relative_eq!(updates[0].value, 0.75);
    }

    #[test]
    fn test_display_round_trip_example() {
        let engine = gain_engine();
        let (attachment, webview) = attach(&engine, BridgeConfig::new());

        webview.call(
            "updatePluginParameter",
            &[json!({ "parameter": "gain", "value": 0.75 })],
        );
        assert_eq!(
            webview.call("getDisplayValue", &[json!("gain")]),
            json!({ "value": "75", "suffix": "%" })
        );
        assert_eq!(attachment.dispatch_pending(), 0);
    }

    #[test]
    fn test_get_parameters_command() {
        let engine = gain_engine();
        let (_attachment, webview) = attach(&engine, BridgeConfig::new());

        let reply = webview.call("getPluginParameters", &[]);
        assert_eq!(
            reply[0],
            json!({
                "uid": "gain",
                "name": "Gain",
                "value": 0.5,
                "defaultVal": 0.5,
                "range": { "min": 0.0, "max": 1.0, "step": 0.01 }
            })
        );
        assert_eq!(reply[1]["uid"], "freq");
    }

    #[test]
    fn test_overflow_resynchronizes_everything() {
        let engine = gain_engine();
        let (attachment, webview) = attach(&engine, BridgeConfig::new().with_queue_capacity(2));
        let gain_param = engine.get("gain").unwrap();

        for i in 1..=5 {
            gain_param.set_user_value(i as f64 / 10.0);
        }

        // One push per attached parameter with its current value
        assert_eq!(attachment.dispatch_pending(), 2);
        let updates = webview.updates();
        assert_eq!(updates[0].parameter, "gain");
        assert_relative_eq!(updates[0].value, 0.5);
        assert_eq!(updates[1].parameter, "freq");

        // Back to normal delivery
        gain_param.set_user_value(0.9);
        assert_eq!(attachment.dispatch_pending(), 1);
    }

    #[test]
    fn test_drop_detaches() {
        let engine = gain_engine();
        let (attachment, webview) = attach(&engine, BridgeConfig::new());
        assert!(engine.iter().all(|p| p.listener_count() == 1));

        drop(attachment);
        assert!(engine.iter().all(|p| p.listener_count() == 0));

        // Handlers outlive the bridge but no longer touch the engine
        webview.call(
            "updatePluginParameter",
            &[json!({ "parameter": "gain", "value": 0.1 })],
        );
        assert_relative_eq!(gain(&engine), 0.5);
        assert_eq!(webview.call("getPluginParameters", &[]), json!([]));
    }

    #[test]
    fn test_pending_pushes_dropped_after_detach() {
        let engine = gain_engine();
        let (attachment, webview) = attach(&engine, BridgeConfig::new());

        engine.get("gain").unwrap().set_user_value(0.9);
        attachment.remove_listeners();
        assert_eq!(attachment.dispatch_pending(), 0);
        assert!(webview.scripts().is_empty());
    }

    #[test]
    fn test_custom_update_function() {
        let engine = gain_engine();
        let config = BridgeConfig::new().with_update_function("window.synth.onParameter");
        let (attachment, webview) = attach(&engine, config);

        engine.get("gain").unwrap().set_user_value(0.25);
        attachment.dispatch_pending();
        assert_eq!(
            webview.scripts(),
            vec![r#"window.synth.onParameter({"parameter":"gain","value":0.25})"#]
        );
    }
}
