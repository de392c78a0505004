//! Script definitions
//!
//! This module defines:
//! - Script: an inline or stored script with language and parameters
//!
//! A script renders its inner body only (`source`/`id`/`lang`/`params`);
//! containers add the surrounding `"script"` wrapper. The name keys the
//! entry in `script_fields` and is never rendered itself.

use serde_json::{Map, Value};

use crate::render::{insert_nonempty, Render};

/// Inline or stored script definition
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    name: String,
    source: Option<String>,
    id: Option<String>,
    lang: Option<String>,
    params: Map<String, Value>,
}

impl Script {
    /// Create a named script with no body yet
    pub fn new(name: impl Into<String>) -> Self {
        Script {
            name: name.into(),
            source: None,
            id: None,
            lang: None,
            params: Map::new(),
        }
    }

    /// The name keying this script in script_fields
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the inline script source
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the stored script identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the script language
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Add one named parameter; repeat calls accumulate
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl Render for Script {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        insert_nonempty(&mut body, "source", self.source.clone());
        insert_nonempty(&mut body, "id", self.id.clone());
        insert_nonempty(&mut body, "lang", self.lang.clone());
        if !self.params.is_empty() {
            body.insert("params".to_string(), Value::Object(self.params.clone()));
        }
        body
    }
}
