//! Top-level search request
//!
//! This module defines:
//! - SearchRequest: the outward-facing accumulator composing one query,
//!   aggregations, the ordered sort list, pagination and auxiliary
//!   options into one rendered mapping
//!
//! The request performs no validation: conflicting or semantically
//! invalid combinations pass through unexamined and are reported by the
//! search engine at request time.

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::trace;

use crate::aggregations::Aggregation;
use crate::collapse::Collapse;
use crate::query::Query;
use crate::render::{insert_set, Render};
use crate::script::Script;
use crate::sort::{FieldSort, ScriptSort, ScriptSortType, Sort, SortOrder};
use crate::source::SourceFilter;

/// Accumulator for one search request body
///
/// Built bottom-up through chained setters and rendered once; rendering
/// skips every component that is unset or empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    query: Option<Query>,
    aggs: Vec<Aggregation>,
    post_filter: Option<Query>,
    from: Option<u64>,
    size: Option<u64>,
    explain: Option<bool>,
    timeout: Option<Duration>,
    source: SourceFilter,
    sort: Vec<Sort>,
    script_fields: Vec<Script>,
    collapse: Option<Collapse>,
    search_after: Vec<Value>,
}

impl SearchRequest {
    /// Create an empty search request
    pub fn new() -> Self {
        SearchRequest::default()
    }

    /// Set the top-level query
    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Append a named aggregation; repeat calls accumulate
    pub fn agg(mut self, agg: impl Into<Aggregation>) -> Self {
        self.aggs.push(agg.into());
        self
    }

    /// Set the filter applied after aggregations are computed
    pub fn post_filter(mut self, filter: impl Into<Query>) -> Self {
        self.post_filter = Some(filter.into());
        self
    }

    /// Set the offset of the first hit to return; zero is a real offset
    pub fn from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the number of hits to return; zero is a real size
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set whether score explanations are returned with each hit
    pub fn explain(mut self, explain: bool) -> Self {
        self.explain = Some(explain);
        self
    }

    /// Set the time the engine may spend on the request (whole seconds)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Append source fields to return, preserving iteration order
    pub fn source_includes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = self.source.includes(fields);
        self
    }

    /// Append source fields to omit, preserving iteration order
    pub fn source_excludes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = self.source.excludes(fields);
        self
    }

    /// Append one sort entry; repeat calls accumulate in order
    pub fn sort(mut self, sort: impl Into<Sort>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Append a field sort on `field` with the given order
    pub fn sort_field(self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort(FieldSort::new(field).order(order))
    }

    /// Append a script sort entry
    pub fn sort_by_script(
        self,
        script: Script,
        sort_type: ScriptSortType,
        order: SortOrder,
    ) -> Self {
        self.sort(ScriptSort::new(script, sort_type, order))
    }

    /// Append an opaque sort token, rendered bare (e.g. `"_score"`)
    pub fn sort_raw(mut self, token: impl Into<Value>) -> Self {
        self.sort.push(Sort::Raw(token.into()));
        self
    }

    /// Drop every sort entry appended so far; a no-op when already empty
    pub fn clear_sort(mut self) -> Self {
        self.sort.clear();
        self
    }

    /// Append a named script field; repeat calls accumulate
    pub fn script_field(mut self, script: Script) -> Self {
        self.script_fields.push(script);
        self
    }

    /// Set the collapse specification
    pub fn collapse(mut self, collapse: Collapse) -> Self {
        self.collapse = Some(collapse);
        self
    }

    /// Append values resuming the search after a previous page
    pub fn search_after<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.search_after.extend(values.into_iter().map(Into::into));
        self
    }
}

impl Render for SearchRequest {
    fn render(&self) -> Map<String, Value> {
        trace!(
            sorts = self.sort.len(),
            aggs = self.aggs.len(),
            "rendering search request body"
        );

        let mut map = Map::new();

        if let Some(query) = &self.query {
            map.insert("query".to_string(), Value::Object(query.render()));
        }

        if !self.aggs.is_empty() {
            let mut aggs = Map::new();
            for agg in &self.aggs {
                aggs.insert(agg.name().to_string(), Value::Object(agg.render()));
            }
            map.insert("aggs".to_string(), Value::Object(aggs));
        }

        if let Some(filter) = &self.post_filter {
            map.insert("post_filter".to_string(), Value::Object(filter.render()));
        }

        insert_set(&mut map, "from", self.from);
        insert_set(&mut map, "size", self.size);
        insert_set(&mut map, "explain", self.explain);

        if let Some(timeout) = self.timeout {
            map.insert(
                "timeout".to_string(),
                Value::String(format!("{}s", timeout.as_secs())),
            );
        }

        if !self.sort.is_empty() {
            map.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(Sort::to_value).collect()),
            );
        }

        if !self.source.is_empty() {
            map.insert("_source".to_string(), Value::Object(self.source.render()));
        }

        if !self.script_fields.is_empty() {
            let mut fields = Map::new();
            for script in &self.script_fields {
                let mut wrapper = Map::new();
                wrapper.insert("script".to_string(), Value::Object(script.render()));
                fields.insert(script.name().to_string(), Value::Object(wrapper));
            }
            map.insert("script_fields".to_string(), Value::Object(fields));
        }

        if let Some(collapse) = &self.collapse {
            map.insert("collapse".to_string(), Value::Object(collapse.render()));
        }

        if !self.search_after.is_empty() {
            map.insert(
                "search_after".to_string(),
                Value::Array(self.search_after.clone()),
            );
        }

        map
    }
}
