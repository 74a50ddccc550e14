//! # paramlink
//!
//! Parameter synchronization between an audio engine and a WebView UI.
//!
//! ## Architecture
//!
//! ```text
//! Your engine (implements ParameterEngine, or uses ParameterSet)
//!        ↓
//! ParameterAttachment<W> (listeners + command bindings)
//!        ↓
//! Your WebView (implements WebView: bind + evaluate)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paramlink::prelude::*;
//!
//! let params = ParameterSet::new(vec![
//!     FloatParameter::new(
//!         ParameterInfo::new("gain", "Gain")
//!             .with_range(UserRange::new(0.0, 1.0, 0.01))
//!             .with_default(0.5),
//!     )
//!     .with_formatter(Formatter::Percent { precision: 0 }),
//! ])?;
//!
//! static BRIDGE: BridgeConfig = BridgeConfig::new().with_prefix("synth_");
//! let attachment = ParameterAttachment::new(&params, my_webview, BRIDGE);
//!
//! // From the editor's UI-thread timer:
//! attachment.dispatch_pending();
//! ```

// Re-export sub-crates
pub use paramlink_bridge as bridge;
pub use paramlink_core as core;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use paramlink::prelude::*;
/// ```
pub mod prelude {
    // Engine side
    pub use paramlink_core::{
        // Traits
        DisplayConverter, HostHandler, Parameter, ParameterEngine, ParameterListener,
        // Parameter types
        FloatParameter, ParameterInfo, ParameterSet, UserRange,
        // Display conversion
        DisplayValue, FnConverter, Formatter,
        // Ids and values
        ParameterId, ParameterValue,
        // Error types
        ParameterError, ParameterResult,
    };

    // Bridge side
    pub use paramlink_bridge::{
        Attachment, BridgeConfig, BridgeError, BridgeResult, Command, CommandHandler,
        ParameterAttachment, PropagationState, WebView,
    };
}
