//! Bridge configuration.
//!
//! [`BridgeConfig`] names the commands bound on the WebView, the script
//! function pushes call, and the size of the push queue.
//!
//! # Example
//!
//! ```
//! use paramlink_bridge::{BridgeConfig, Command};
//!
//! pub static CONFIG: BridgeConfig = BridgeConfig::new()
//!     .with_prefix("plugin_")
//!     .with_update_function("window.synth.onParameter")
//!     .with_queue_capacity(256);
//!
//! assert_eq!(CONFIG.bound_name(Command::SetValue), "plugin_updatePluginParameter");
//! ```

use crate::commands::Command;

/// Static configuration of a parameter bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Prepended to every command name when binding.
    pub command_prefix: &'static str,

    /// Name of the get-spec command.
    pub get_parameters: &'static str,

    /// Name of the set-value command.
    pub set_value: &'static str,

    /// Name of the begin-gesture command.
    pub begin_gesture: &'static str,

    /// Name of the end-gesture command.
    pub end_gesture: &'static str,

    /// Name of the get-display command.
    pub get_display_value: &'static str,

    /// Name of the set-display command.
    pub set_display_value: &'static str,

    /// Script-level function called with each `{parameter, value}` push.
    pub update_function: &'static str,

    /// Capacity of the listener-to-UI push queue.
    ///
    /// When the UI thread falls this far behind, further notifications are
    /// dropped and the next pump resynchronizes every parameter instead.
    pub queue_capacity: usize,
}

impl BridgeConfig {
    /// Create the default configuration.
    pub const fn new() -> Self {
        Self {
            command_prefix: "",
            get_parameters: "getPluginParameters",
            set_value: "updatePluginParameter",
            begin_gesture: "startPluginParameterGesture",
            end_gesture: "endPluginParameterGesture",
            get_display_value: "getDisplayValue",
            set_display_value: "setDisplayValue",
            update_function: "window.ui.updateParameterState",
            queue_capacity: 1024,
        }
    }

    /// Set the command prefix.
    pub const fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.command_prefix = prefix;
        self
    }

    /// Rename a single command.
    pub const fn with_command_name(mut self, command: Command, name: &'static str) -> Self {
        match command {
            Command::GetParameters => self.get_parameters = name,
            Command::SetValue => self.set_value = name,
            Command::BeginGesture => self.begin_gesture = name,
            Command::EndGesture => self.end_gesture = name,
            Command::GetDisplayValue => self.get_display_value = name,
            Command::SetDisplayValue => self.set_display_value = name,
        }
        self
    }

    /// Set the script function pushes call.
    pub const fn with_update_function(mut self, function: &'static str) -> Self {
        self.update_function = function;
        self
    }

    /// Set the push queue capacity (at least 1).
    pub const fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Unprefixed name of `command`.
    pub const fn command_name(&self, command: Command) -> &'static str {
        match command {
            Command::GetParameters => self.get_parameters,
            Command::SetValue => self.set_value,
            Command::BeginGesture => self.begin_gesture,
            Command::EndGesture => self.end_gesture,
            Command::GetDisplayValue => self.get_display_value,
            Command::SetDisplayValue => self.set_display_value,
        }
    }

    /// Name `command` is bound under, prefix included.
    pub fn bound_name(&self, command: Command) -> String {
        format!("{}{}", self.command_prefix, self.command_name(command))
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
