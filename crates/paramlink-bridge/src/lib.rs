//! # paramlink-bridge
//!
//! Bidirectional parameter synchronization between an audio engine and a
//! WebView-hosted UI.
//!
//! ## Architecture
//!
//! ```text
//!   WebView page                                   Engine
//!  ──────────────                                 ────────
//!  getPluginParameters ─┐                    ┌──→ Parameter::set_* (host notified)
//!  updatePluginParameter│   ParameterCommands│
//!  start/end gesture    ├──→ (echo suppressed)┤
//!  get/setDisplayValue ─┘                    └──→ DisplayConverter
//!
//!  updateParameterState(...) ←── dispatch_pending ←── PushQueue ←── ChangeForwarder
//!        (UI thread)                                  (any thread, non-blocking)
//! ```
//!
//! [`ParameterAttachment`] ties the pieces together: it registers a
//! [`ChangeForwarder`] on every parameter, binds each [`Command`] on the
//! [`WebView`], and turns queued changes into script calls when the UI
//! thread calls [`dispatch_pending`](ParameterAttachment::dispatch_pending).
//!
//! Changes made by the UI through set-value are not echoed back. Changes made
//! through set-display are pushed back exactly once with the value the
//! parameter ended up with. Every other change is pushed once per
//! notification.

pub mod attachment;
pub mod commands;
pub mod config;
pub mod error;
pub mod messages;
pub mod propagation;
pub mod registry;
pub mod suppression;
pub mod webview;

#[cfg(test)]
mod testing;

pub use attachment::{Attachment, ParameterAttachment};
pub use commands::{Command, ParameterCommands};
pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
pub use messages::{update_script, DisplayReply, ParameterSpec, ParameterUpdate, RangeSpec};
pub use propagation::{ChangeForwarder, PendingPush, PushQueue};
pub use registry::ParameterRegistry;
pub use suppression::{EchoSuppressor, PropagationState, SuppressionGuard};
pub use webview::{number_of, Args, CommandHandler, WebView};
