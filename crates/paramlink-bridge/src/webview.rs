//! The WebView messaging seam.
//!
//! The bridge does not own a WebView. It talks to whatever embeds the UI
//! through [`WebView`]: named commands the page can call, and scripts the
//! native side evaluates in the page. Command arguments arrive as a
//! positional list of JSON values; [`Args`] decodes them.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

/// Handler for a bound command.
///
/// Receives the positional arguments of the call and returns the reply.
/// `Value::Null` is the empty reply.
pub type CommandHandler = Box<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Messaging surface of an embedded web UI.
pub trait WebView: Send + Sync {
    /// Make `handler` callable from the page under `name`.
    ///
    /// Binding a name twice replaces the earlier handler.
    fn bind(&self, name: &str, handler: CommandHandler);

    /// Evaluate `script` in the page. Called on the UI thread only.
    fn evaluate(&self, script: &str);
}

impl<W: WebView + ?Sized> WebView for Arc<W> {
    fn bind(&self, name: &str, handler: CommandHandler) {
        (**self).bind(name, handler)
    }

    fn evaluate(&self, script: &str) {
        (**self).evaluate(script)
    }
}

impl<W: WebView + ?Sized> WebView for Box<W> {
    fn bind(&self, name: &str, handler: CommandHandler) {
        (**self).bind(name, handler)
    }

    fn evaluate(&self, script: &str) {
        (**self).evaluate(script)
    }
}

/// Positional command arguments.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    command: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Wrap the arguments of `command`.
    pub fn new(command: &'static str, values: &'a [Value]) -> Self {
        Self { command, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument `index`, treating JSON `null` as absent.
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index).filter(|v| !v.is_null())
    }

    /// Required argument `index`.
    pub fn required(&self, index: usize) -> BridgeResult<&'a Value> {
        self.get(index).ok_or(BridgeError::MissingArgument {
            command: self.command,
            index,
        })
    }

    /// Required string argument.
    pub fn string(&self, index: usize) -> BridgeResult<&'a str> {
        self.required(index)?
            .as_str()
            .ok_or_else(|| self.invalid(index, "a string"))
    }

    /// Required text argument. Numbers are accepted and printed.
    pub fn text(&self, index: usize) -> BridgeResult<String> {
        match self.required(index)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(self.invalid(index, "text")),
        }
    }

    /// Optional numeric argument.
    pub fn optional_number(&self, index: usize) -> BridgeResult<Option<f64>> {
        match self.get(index) {
            None => Ok(None),
            Some(value) => number_of(value)
                .map(Some)
                .ok_or_else(|| self.invalid(index, "a number")),
        }
    }

    /// Required object argument.
    pub fn object(&self, index: usize) -> BridgeResult<&'a serde_json::Map<String, Value>> {
        self.required(index)?
            .as_object()
            .ok_or_else(|| self.invalid(index, "an object"))
    }

    /// Error for argument `index` not being `expected`.
    pub fn invalid(&self, index: usize, expected: &'static str) -> BridgeError {
        BridgeError::InvalidArgument {
            command: self.command,
            index,
            expected,
        }
    }
}

/// Read a number from a JSON number or a numeric string.
pub fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
