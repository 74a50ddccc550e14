//! Stable hashing of parameter uids.
//!
//! Listener callbacks run on the audio thread and cannot carry a `String`
//! across the push queue without allocating. Parameters therefore also
//! expose a numeric id, computed from the uid with [`fnv1a_32`], which the
//! bridge maps back to the uid on the UI thread.

/// Compute the FNV-1a 32-bit hash of a string.
///
/// Deterministic across platforms and compiler versions, allocation free,
/// and usable in `const` context.
///
/// # Examples
///
/// ```
/// use paramlink_utils::fnv1a_32;
///
/// let id = fnv1a_32("gain");
///
/// const GAIN_ID: u32 = fnv1a_32("gain");
/// assert_eq!(id, GAIN_ID);
/// ```
///
/// # Collisions
///
/// Two distinct uids may hash to the same value. `ParameterSet` rejects such
/// sets at construction, and the bridge registry keeps the first parameter
/// for a colliding id.
#[inline]
pub const fn fnv1a_32(s: &str) -> u32 {
    const FNV_OFFSET: u32 = 2166136261;
    const FNV_PRIME: u32 = 16777619;

    let bytes = s.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}
