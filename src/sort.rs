//! Sort entries
//!
//! This module defines:
//! - Sort: one entry of a request's ordered sort specification
//! - FieldSort / ScriptSort: the structured entry kinds
//! - SortOrder / SortMode / ScriptSortType wire-token enums
//!
//! Sort entries do not implement the mapping contract: the raw variant
//! renders as a bare token (e.g. `"_score"`), so entries render to a
//! `Value` via [`Sort::to_value`]. The ordered list itself lives on the
//! request aggregator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::query::Query;
use crate::render::{insert_nonempty, Render};
use crate::script::Script;

// ============================================================================
// Wire Tokens
// ============================================================================

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    /// Wire token for this order
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::unknown_token("sort order", other)),
        }
    }
}

/// How multi-valued fields reduce to one sortable value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Lowest value
    Min,
    /// Highest value
    Max,
    /// Sum of all values
    Sum,
    /// Average of all values
    Avg,
    /// Median of all values
    Median,
}

impl SortMode {
    /// Wire token for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Min => "min",
            SortMode::Max => "max",
            SortMode::Sum => "sum",
            SortMode::Avg => "avg",
            SortMode::Median => "median",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(SortMode::Min),
            "max" => Ok(SortMode::Max),
            "sum" => Ok(SortMode::Sum),
            "avg" => Ok(SortMode::Avg),
            "median" => Ok(SortMode::Median),
            other => Err(Error::unknown_token("sort mode", other)),
        }
    }
}

/// Value type a script sort produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptSortType {
    /// Numeric script result
    Number,
    /// String script result
    String,
}

impl ScriptSortType {
    /// Wire token for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptSortType::Number => "number",
            ScriptSortType::String => "string",
        }
    }
}

impl fmt::Display for ScriptSortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScriptSortType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(ScriptSortType::Number),
            "string" => Ok(ScriptSortType::String),
            other => Err(Error::unknown_token("script sort type", other)),
        }
    }
}

// ============================================================================
// FieldSort
// ============================================================================

/// Sort on a document field
///
/// Renders as `{"<field>": {"order"?, "mode"?, "nested_path"?,
/// "nested_filter"?}}`. The nested filter is a full query clause and
/// renders through its own clause rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSort {
    field: String,
    order: Option<SortOrder>,
    mode: Option<SortMode>,
    nested_path: Option<String>,
    nested_filter: Option<Query>,
}

impl FieldSort {
    /// Create a sort on `field` with no options yet
    pub fn new(field: impl Into<String>) -> Self {
        FieldSort {
            field: field.into(),
            order: None,
            mode: None,
            nested_path: None,
            nested_filter: None,
        }
    }

    /// Set the sort direction
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the reduction mode for multi-valued fields
    pub fn mode(mut self, mode: SortMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the nested object path the sort field lives under
    pub fn nested_path(mut self, path: impl Into<String>) -> Self {
        self.nested_path = Some(path.into());
        self
    }

    /// Set the filter nested objects must match to contribute a value
    pub fn nested_filter(mut self, filter: impl Into<Query>) -> Self {
        self.nested_filter = Some(filter.into());
        self
    }

    fn to_value(&self) -> Value {
        let mut options = Map::new();
        insert_nonempty(&mut options, "order", self.order.map(|o| o.as_str()));
        insert_nonempty(&mut options, "mode", self.mode.map(|m| m.as_str()));
        insert_nonempty(&mut options, "nested_path", self.nested_path.clone());
        if let Some(filter) = &self.nested_filter {
            options.insert("nested_filter".to_string(), Value::Object(filter.render()));
        }

        let mut entry = Map::new();
        entry.insert(self.field.clone(), Value::Object(options));
        Value::Object(entry)
    }
}

// ============================================================================
// ScriptSort
// ============================================================================

/// Sort on a computed script value
///
/// Renders under the fixed `_script` key with the value type tag, the
/// script body, and the order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptSort {
    script: Script,
    sort_type: ScriptSortType,
    order: SortOrder,
}

impl ScriptSort {
    /// Create a script sort producing `sort_type` values, sorted `order`
    pub fn new(script: Script, sort_type: ScriptSortType, order: SortOrder) -> Self {
        ScriptSort {
            script,
            sort_type,
            order,
        }
    }

    fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            "type".to_string(),
            Value::String(self.sort_type.as_str().to_string()),
        );
        body.insert("script".to_string(), Value::Object(self.script.render()));
        body.insert(
            "order".to_string(),
            Value::String(self.order.as_str().to_string()),
        );

        let mut entry = Map::new();
        entry.insert("_script".to_string(), Value::Object(body));
        Value::Object(entry)
    }
}

// ============================================================================
// Sort
// ============================================================================

/// One entry of a request's ordered sort specification
#[derive(Debug, Clone, PartialEq)]
pub enum Sort {
    /// Sort on a document field
    Field(FieldSort),
    /// Sort on a computed script value
    Script(ScriptSort),
    /// Opaque pass-through entry, rendered as the bare token
    Raw(Value),
}

impl Sort {
    /// Render this entry to its wire value
    ///
    /// Field and script entries render as single-key mappings; a raw
    /// entry renders as its token unchanged.
    pub fn to_value(&self) -> Value {
        match self {
            Sort::Field(sort) => sort.to_value(),
            Sort::Script(sort) => sort.to_value(),
            Sort::Raw(token) => token.clone(),
        }
    }
}

impl From<FieldSort> for Sort {
    fn from(sort: FieldSort) -> Self {
        Sort::Field(sort)
    }
}

impl From<ScriptSort> for Sort {
    fn from(sort: ScriptSort) -> Self {
        Sort::Script(sort)
    }
}
