//! The command surface the UI calls.
//!
//! | Command | Arguments | Effect | Reply |
//! |---|---|---|---|
//! | [`GetParameters`](Command::GetParameters) | none | none | `[ParameterSpec]` |
//! | [`SetValue`](Command::SetValue) | `{parameter, value}` | set notifying host, echo suppressed | `null` |
//! | [`BeginGesture`](Command::BeginGesture) | `uid` | host gesture start | `null` |
//! | [`EndGesture`](Command::EndGesture) | `uid` | host gesture end | `null` |
//! | [`GetDisplayValue`](Command::GetDisplayValue) | `uid, preview?` | none | `{value, suffix}` |
//! | [`SetDisplayValue`](Command::SetDisplayValue) | `uid, text` | parse, set as user action, push back | `null` |
//!
//! Set-value and set-display differ on purpose. Set-value suppresses the
//! echo because the UI already holds the number it sent. Set-display pushes
//! the result back because the UI only knows the text it sent, not the
//! value the converter and the range turned it into.
//!
//! Unknown uids and undecodable arguments are silent no-ops with a `null`
//! reply. The UI may legitimately hold stale uids while an editor is being
//! torn down.

use std::sync::Arc;

use log::{debug, warn};
use paramlink_core::{Parameter, ParameterValue};
use serde_json::Value;

use crate::error::BridgeResult;
use crate::messages::{DisplayReply, ParameterSpec};
use crate::propagation::PushQueue;
use crate::registry::ParameterRegistry;
use crate::suppression::{EchoSuppressor, PropagationState};
use crate::webview::{number_of, Args};

/// A UI-invokable command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    GetParameters,
    SetValue,
    BeginGesture,
    EndGesture,
    GetDisplayValue,
    SetDisplayValue,
}

impl Command {
    /// Every command, in binding order.
    pub const ALL: [Command; 6] = [
        Command::GetParameters,
        Command::SetValue,
        Command::BeginGesture,
        Command::EndGesture,
        Command::GetDisplayValue,
        Command::SetDisplayValue,
    ];

    /// Name used in log and error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Command::GetParameters => "get-parameters",
            Command::SetValue => "set-value",
            Command::BeginGesture => "begin-gesture",
            Command::EndGesture => "end-gesture",
            Command::GetDisplayValue => "get-display-value",
            Command::SetDisplayValue => "set-display-value",
        }
    }
}

/// Command handlers over an attached registry.
#[derive(Debug)]
pub struct ParameterCommands {
    registry: ParameterRegistry,
    suppressor: Arc<EchoSuppressor>,
    queue: Arc<PushQueue>,
}

impl ParameterCommands {
    pub fn new(
        registry: ParameterRegistry,
        suppressor: Arc<EchoSuppressor>,
        queue: Arc<PushQueue>,
    ) -> Self {
        Self {
            registry,
            suppressor,
            queue,
        }
    }

    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    pub fn state(&self) -> PropagationState {
        self.suppressor.state()
    }

    /// Snapshot of every attached parameter, in engine order.
    pub fn parameter_spec(&self) -> Vec<ParameterSpec> {
        self.registry
            .iter()
            .map(|p| ParameterSpec::capture(p.as_ref()))
            .collect()
    }

    /// Set a value from the UI without echoing it back.
    ///
    /// Returns `false` if `uid` is unknown.
    pub fn set_value(&self, uid: &str, value: ParameterValue) -> bool {
        let Some(parameter) = self.lookup(uid) else {
            return false;
        };
        let _guard = self.suppressor.suppress();
        parameter.set_user_value_notifying_host(value);
        true
    }

    /// Start a host gesture. Returns `false` if `uid` is unknown.
    pub fn begin_gesture(&self, uid: &str) -> bool {
        match self.lookup(uid) {
            Some(parameter) => {
                parameter.begin_change_gesture();
                true
            }
            None => false,
        }
    }

    /// End a host gesture. Returns `false` if `uid` is unknown.
    pub fn end_gesture(&self, uid: &str) -> bool {
        match self.lookup(uid) {
            Some(parameter) => {
                parameter.end_change_gesture();
                true
            }
            None => false,
        }
    }

    /// Format `preview`, or the current value, with the parameter's converter.
    ///
    /// Never mutates the parameter.
    pub fn display_value(
        &self,
        uid: &str,
        preview: Option<ParameterValue>,
    ) -> Option<DisplayReply> {
        let parameter = self.lookup(uid)?;
        let value = preview.unwrap_or_else(|| parameter.user_value());
        Some(parameter.display_value_for(value).into())
    }

    /// Apply typed display text as a user action and push the result.
    ///
    /// The listener echo of the mutation is suppressed and replaced by one
    /// explicit push of the value the parameter ended up with. If the
    /// converter rejects the text nothing changes and nothing is pushed.
    /// Returns `true` if a value was applied.
    pub fn set_display_value(&self, uid: &str, text: &str) -> bool {
        let Some(parameter) = self.lookup(uid) else {
            return false;
        };
        let Some(value) = parameter.value_for_display(text) else {
            debug!("'{}' rejected display text {:?}", uid, text);
            return false;
        };

        {
            let _guard = self.suppressor.suppress();
            parameter.set_user_value_as_user_action(value);
        }
        self.queue.enqueue(parameter.id(), parameter.user_value());
        true
    }

    /// Decode `args`, run `command`, and encode the reply.
    ///
    /// Failures are logged and answered with `null`.
    pub fn dispatch(&self, command: Command, args: &[Value]) -> Value {
        match self.try_dispatch(command, Args::new(command.label(), args)) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("{}", e);
                Value::Null
            }
        }
    }

    fn try_dispatch(&self, command: Command, args: Args<'_>) -> BridgeResult<Value> {
        match command {
            Command::GetParameters => Ok(serde_json::to_value(self.parameter_spec())?),

            Command::SetValue => {
                let payload = args.object(0)?;
                let uid = payload
                    .get("parameter")
                    .and_then(Value::as_str)
                    .ok_or_else(|| args.invalid(0, "an object with a 'parameter' string"))?;
                let value = payload
                    .get("value")
                    .and_then(number_of)
                    .ok_or_else(|| args.invalid(0, "an object with a numeric 'value'"))?;
                self.set_value(uid, value);
                Ok(Value::Null)
            }

            Command::BeginGesture => {
                self.begin_gesture(args.string(0)?);
                Ok(Value::Null)
            }

            Command::EndGesture => {
                self.end_gesture(args.string(0)?);
                Ok(Value::Null)
            }

            Command::GetDisplayValue => {
                let uid = args.string(0)?;
                let preview = args.optional_number(1)?;
                match self.display_value(uid, preview) {
                    Some(reply) => Ok(serde_json::to_value(reply)?),
                    None => Ok(Value::Null),
                }
            }

            Command::SetDisplayValue => {
                let uid = args.string(0)?;
                let text = args.text(1)?;
                self.set_display_value(uid, &text);
                Ok(Value::Null)
            }
        }
    }

    fn lookup(&self, uid: &str) -> Option<&Arc<dyn Parameter>> {
        let parameter = self.registry.find(uid);
        if parameter.is_none() {
            debug!("Unknown parameter '{}'", uid);
        }
        parameter
    }
}
