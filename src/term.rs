//! Term-level queries
//!
//! This module defines:
//! - TermQuery: exact-value match on a single field
//! - TermsQuery: match any value from a list on a single field
//! - ExistsQuery: match documents that contain a field
//!
//! Term-level queries are not analyzed; the value is compared against the
//! indexed term as-is.

use serde_json::{Map, Value};

use crate::render::{insert_nonempty, wrap, Render};

// ============================================================================
// TermQuery
// ============================================================================

/// Exact-value query on a single field
///
/// Renders as `{"term": {"<field>": {"value": <v>, ...}}}`, carrying only
/// the options that were explicitly set.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    field: String,
    value: Value,
    boost: Option<f64>,
    name: Option<String>,
}

impl TermQuery {
    /// Create a term query matching `value` exactly on `field`
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        TermQuery {
            field: field.into(),
            value: value.into(),
            boost: None,
            name: None,
        }
    }

    /// Set the boost value for the query
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Set the query name reported back in matched_queries
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Render for TermQuery {
    fn render(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("value".to_string(), self.value.clone());
        insert_nonempty(&mut params, "boost", self.boost);
        insert_nonempty(&mut params, "_name", self.name.clone());

        let mut inner = Map::new();
        inner.insert(self.field.clone(), Value::Object(params));
        wrap("term", inner)
    }
}

// ============================================================================
// TermsQuery
// ============================================================================

/// Query matching any of a list of exact values on a single field
///
/// Renders as `{"terms": {"<field>": [v, ...], "boost"?: b}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsQuery {
    field: String,
    values: Vec<Value>,
    boost: Option<f64>,
}

impl TermsQuery {
    /// Create a terms query on `field` with no values yet
    pub fn new(field: impl Into<String>) -> Self {
        TermsQuery {
            field: field.into(),
            values: Vec::new(),
            boost: None,
        }
    }

    /// Append one value to the list; repeat calls accumulate in order
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Append several values to the list, preserving iteration order
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Set the boost value for the query
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Render for TermsQuery {
    fn render(&self) -> Map<String, Value> {
        let mut inner = Map::new();
        inner.insert(self.field.clone(), Value::Array(self.values.clone()));
        insert_nonempty(&mut inner, "boost", self.boost);
        wrap("terms", inner)
    }
}

// ============================================================================
// ExistsQuery
// ============================================================================

/// Query matching documents that contain `field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsQuery {
    field: String,
}

impl ExistsQuery {
    /// Create an exists query for `field`
    pub fn new(field: impl Into<String>) -> Self {
        ExistsQuery {
            field: field.into(),
        }
    }
}

impl Render for ExistsQuery {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(self.field.clone()));
        wrap("exists", body)
    }
}
