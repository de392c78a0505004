//! Result collapsing
//!
//! This module defines:
//! - Collapse: fold results on a field's value

use serde_json::{Map, Value};

use crate::render::Render;

/// Collapse search results on a field
///
/// Renders as `{"field": "<field>"}`; an empty field name renders an
/// empty mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapse {
    field: String,
}

impl Collapse {
    /// Create a collapse specification on `field`
    pub fn new(field: impl Into<String>) -> Self {
        Collapse {
            field: field.into(),
        }
    }
}

impl Render for Collapse {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if !self.field.is_empty() {
            body.insert("field".to_string(), Value::String(self.field.clone()));
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collapse_field() {
        let c = Collapse::new("variant_group.group_id");
        assert_eq!(
            Value::Object(c.render()),
            json!({ "field": "variant_group.group_id" })
        );
    }

    #[test]
    fn test_collapse_empty_field() {
        let c = Collapse::new("");
        assert_eq!(Value::Object(c.render()), json!({}));
    }
}
