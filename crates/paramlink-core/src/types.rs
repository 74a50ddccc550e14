//! Common types used throughout paramlink.

/// Numeric parameter identifier.
///
/// Derived from the parameter's string uid with
/// [`fnv1a_32`](paramlink_utils::fnv1a_32). Listener notifications carry this
/// id instead of the uid so they can cross threads without allocating.
pub type ParameterId = u32;

/// Parameter value in user space (the parameter's own units, inside its range).
pub type ParameterValue = f64;
