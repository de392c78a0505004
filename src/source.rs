//! Source field filtering
//!
//! This module defines:
//! - SourceFilter: the `_source` inclusion/exclusion field lists

use serde_json::{Map, Value};

use crate::render::Render;

/// Field lists controlling which source fields a response returns
///
/// Renders only the lists that are non-empty; a fully empty filter is
/// skipped by the request aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFilter {
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl SourceFilter {
    /// Create an empty source filter
    pub fn new() -> Self {
        SourceFilter::default()
    }

    /// Append fields to return, preserving iteration order
    pub fn includes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Append fields to omit, preserving iteration order
    pub fn excludes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(fields.into_iter().map(Into::into));
        self
    }

    /// True when neither list has entries
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl Render for SourceFilter {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if !self.includes.is_empty() {
            body.insert(
                "includes".to_string(),
                Value::Array(self.includes.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.excludes.is_empty() {
            body.insert(
                "excludes".to_string(),
                Value::Array(self.excludes.iter().cloned().map(Value::String).collect()),
            );
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_filter() {
        let f = SourceFilter::new();
        assert!(f.is_empty());
        assert_eq!(Value::Object(f.render()), json!({}));
    }

    #[test]
    fn test_includes_only() {
        let f = SourceFilter::new().includes(["a", "b"]);
        assert!(!f.is_empty());
        assert_eq!(
            Value::Object(f.render()),
            json!({ "includes": ["a", "b"] })
        );
    }

    #[test]
    fn test_includes_and_excludes_accumulate() {
        let f = SourceFilter::new()
            .includes(["a"])
            .excludes(["x"])
            .includes(["b"]);
        assert_eq!(
            Value::Object(f.render()),
            json!({ "includes": ["a", "b"], "excludes": ["x"] })
        );
    }
}
