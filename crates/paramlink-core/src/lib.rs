//! # paramlink-core
//!
//! Parameter engine abstractions for the paramlink WebView bridge.
//!
//! This crate defines what a bridge needs from an audio engine's parameter
//! model, plus a ready-made real-time-safe implementation:
//!
//! ## Traits
//!
//! - [`Parameter`] - a single engine parameter (value, range, gestures, display conversion)
//! - [`ParameterEngine`] - ordered enumeration and lookup of parameters
//! - [`ParameterListener`] - change observer, called on the thread that changed the value
//! - [`HostHandler`] - host edit notifications (automation recording)
//! - [`DisplayConverter`] - per-parameter value/text conversion
//!
//! ## Types
//!
//! - [`FloatParameter`] - atomic parameter with lock-free listeners
//! - [`ParameterSet`] - validated, ordered collection of `FloatParameter`s
//! - [`ParameterInfo`] - static parameter metadata
//! - [`UserRange`] - `{min, max, step}` with clamping and snapping
//! - [`DisplayValue`] - formatted value plus unit suffix
//! - [`Formatter`] - built-in unit formatters
//! - [`ParameterError`] - error types

pub mod error;
pub mod float_parameter;
pub mod parameter;
pub mod parameter_format;
pub mod parameter_info;
pub mod parameter_range;
pub mod parameter_set;
pub mod parameter_store;
pub mod types;

pub use error::{ParameterError, ParameterResult};
pub use float_parameter::FloatParameter;
pub use parameter::{same_listener, HostHandler, Parameter, ParameterListener};
pub use parameter_format::{DisplayConverter, DisplayValue, FnConverter, Formatter};
pub use parameter_info::ParameterInfo;
pub use parameter_range::UserRange;
pub use parameter_set::ParameterSet;
pub use parameter_store::ParameterEngine;
pub use types::{ParameterId, ParameterValue};

pub use paramlink_utils::fnv1a_32;
