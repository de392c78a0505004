//! Rendering contract for query components
//!
//! This module defines:
//! - Render: the capability every clause, aggregation, and option type
//!   implements to produce its nested mapping
//! - Insertion helpers enforcing the presence rules for optional fields
//!
//! ## Presence Rules
//!
//! A field that was never set must never appear in a rendered mapping.
//! Beyond that, scalar options follow the wire format's omit-empty
//! convention: a value equal to the empty sentinel for its type (zero
//! number, empty string, empty array) is skipped even when set. Boolean
//! options and fields whose zero is meaningful on the wire (pagination,
//! the random-score seed) are emitted whenever set.

use serde_json::{Map, Value};

/// Capability to render as a nested JSON-compatible mapping
///
/// Rendering is a pure function of the receiver's current field values:
/// it never mutates the receiver, performs no I/O, and observes no global
/// state. Rendering twice on an unmutated value yields deep-equal
/// mappings.
pub trait Render {
    /// Produce the mapping representation of this component
    fn render(&self) -> Map<String, Value>;
}

// ============================================================================
// Insertion Helpers
// ============================================================================

/// True when `value` is the wire format's empty sentinel for its type
///
/// Booleans and objects have no empty sentinel: `false` and `{}` are
/// meaningful wire values.
pub(crate) fn is_empty_sentinel(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(_) | Value::Object(_) => false,
    }
}

/// Insert `value` under `key` whenever the option is set
pub(crate) fn insert_set<V: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

/// Insert `value` under `key` when set and not the empty sentinel
pub(crate) fn insert_nonempty<V: Into<Value>>(
    map: &mut Map<String, Value>,
    key: &str,
    value: Option<V>,
) {
    if let Some(v) = value {
        let v = v.into();
        if !is_empty_sentinel(&v) {
            map.insert(key.to_string(), v);
        }
    }
}

/// Wrap `body` under a single key naming the clause kind
pub(crate) fn wrap(kind: &str, body: Map<String, Value>) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(kind.to_string(), Value::Object(body));
    map
}
