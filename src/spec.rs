//! Serialization contract for spec entities.
//!
//! Every serializable entity projects itself into an ordered JSON mapping.
//! An attribute is included when it is present: `None`, empty strings (the
//! "no specific column" name sentinel), and empty lists are omitted;
//! booleans and numbers are always emitted, `false` and zero included;
//! nested entities recurse through their own projection. Transient inputs
//! (raw shorthand) and back-pointing handles are never serialized.

use serde_json::Value;

/// Recursive projection into the output spec mapping.
pub trait ToSpec {
    /// Serialize into a nested mapping.
    fn to_spec(&self) -> Value;
}
