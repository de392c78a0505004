//! Aggregation definitions
//!
//! This module defines:
//! - Aggregation: the closed set of aggregation kinds
//! - MetricAgg: single-field metric aggregations (sum, avg, ...)
//! - StringStatsAgg: string statistics with optional distribution
//! - TermsAgg: bucketing by term, with optional nested sub-aggregations
//! - CustomAgg: raw pass-through body
//!
//! Every aggregation carries the caller-assigned name that keys it in the
//! request's `aggs` mapping; rendering produces the body only, and the
//! request aggregator does the name keying.

use serde_json::{Map, Value};

use crate::render::{insert_nonempty, insert_set, wrap, Render};
use crate::sort::SortOrder;

// ============================================================================
// MetricAgg
// ============================================================================

/// Kind of a single-field metric aggregation, naming its wire key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Arithmetic mean
    Avg,
    /// Approximate distinct count
    Cardinality,
    /// Maximum value
    Max,
    /// Minimum value
    Min,
    /// Count, min, max, avg and sum in one pass
    Stats,
    /// Sum of values
    Sum,
    /// Count of extracted values
    ValueCount,
}

impl MetricKind {
    /// Wire key for this metric
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Avg => "avg",
            MetricKind::Cardinality => "cardinality",
            MetricKind::Max => "max",
            MetricKind::Min => "min",
            MetricKind::Stats => "stats",
            MetricKind::Sum => "sum",
            MetricKind::ValueCount => "value_count",
        }
    }
}

/// Single-field metric aggregation
///
/// Renders as `{"<kind>": {"field": f, "missing"?: m}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricAgg {
    name: String,
    kind: MetricKind,
    field: String,
    missing: Option<Value>,
}

impl MetricAgg {
    /// Create a metric aggregation of `kind` named `name` over `field`
    pub fn new(kind: MetricKind, name: impl Into<String>, field: impl Into<String>) -> Self {
        MetricAgg {
            name: name.into(),
            kind,
            field: field.into(),
            missing: None,
        }
    }

    /// Create an `avg` aggregation
    pub fn avg(name: impl Into<String>, field: impl Into<String>) -> Self {
        MetricAgg::new(MetricKind::Avg, name, field)
    }

    /// Create a `cardinality` aggregation
    pub fn cardinality(name: impl Into<String>, field: impl Into<String>) -> Self {
        MetricAgg::new(MetricKind::Cardinality, name, field)
    }

    /// Create a `max` aggregation
    pub fn max(name: impl Into<String>, field: impl Into<String>) -> Self {
        MetricAgg::new(MetricKind::Max, name, field)
    }

    /// Create a `min` aggregation
    pub fn min(name: impl Into<String>, field: impl Into<String>) -> Self {
        MetricAgg::new(MetricKind::Min, name, field)
    }

    /// Create a `stats` aggregation
    pub fn stats(name: impl Into<String>, field: impl Into<String>) -> Self {
        MetricAgg::new(MetricKind::Stats, name, field)
    }

    /// Create a `sum` aggregation
    pub fn sum(name: impl Into<String>, field: impl Into<String>) -> Self {
        MetricAgg::new(MetricKind::Sum, name, field)
    }

    /// Create a `value_count` aggregation
    pub fn value_count(name: impl Into<String>, field: impl Into<String>) -> Self {
        MetricAgg::new(MetricKind::ValueCount, name, field)
    }

    /// Set the value substituted for documents missing the field
    pub fn missing(mut self, missing: impl Into<Value>) -> Self {
        self.missing = Some(missing.into());
        self
    }
}

impl Render for MetricAgg {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(self.field.clone()));
        insert_set(&mut body, "missing", self.missing.clone());
        wrap(self.kind.as_str(), body)
    }
}

// ============================================================================
// StringStatsAgg
// ============================================================================

/// String statistics aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct StringStatsAgg {
    name: String,
    field: String,
    show_distribution: Option<bool>,
}

impl StringStatsAgg {
    /// Create a string_stats aggregation named `name` over `field`
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        StringStatsAgg {
            name: name.into(),
            field: field.into(),
            show_distribution: None,
        }
    }

    /// Set whether the character distribution is included
    pub fn show_distribution(mut self, show: bool) -> Self {
        self.show_distribution = Some(show);
        self
    }
}

impl Render for StringStatsAgg {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(self.field.clone()));
        insert_set(&mut body, "show_distribution", self.show_distribution);
        wrap("string_stats", body)
    }
}

// ============================================================================
// TermsAgg
// ============================================================================

/// Bucketing aggregation grouping documents by term
///
/// Order pairs and sub-aggregations accumulate and render in append
/// order; sub-aggregations render under a sibling `"aggs"` key.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsAgg {
    name: String,
    field: String,
    size: Option<u64>,
    order: Vec<(String, SortOrder)>,
    aggs: Vec<Aggregation>,
}

impl TermsAgg {
    /// Create a terms aggregation named `name` over `field`
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        TermsAgg {
            name: name.into(),
            field: field.into(),
            size: None,
            order: Vec::new(),
            aggs: Vec::new(),
        }
    }

    /// Set the number of buckets to return
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Append one bucket ordering criterion; repeat calls accumulate
    pub fn order(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order.push((field.into(), order));
        self
    }

    /// Append a nested sub-aggregation; repeat calls accumulate in order
    pub fn agg(mut self, agg: impl Into<Aggregation>) -> Self {
        self.aggs.push(agg.into());
        self
    }
}

impl Render for TermsAgg {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(self.field.clone()));
        insert_nonempty(&mut body, "size", self.size);
        if !self.order.is_empty() {
            let mut order = Map::new();
            for (field, dir) in &self.order {
                order.insert(field.clone(), Value::String(dir.as_str().to_string()));
            }
            body.insert("order".to_string(), Value::Object(order));
        }

        let mut map = wrap("terms", body);
        if !self.aggs.is_empty() {
            let mut nested = Map::new();
            for agg in &self.aggs {
                nested.insert(agg.name().to_string(), Value::Object(agg.render()));
            }
            map.insert("aggs".to_string(), Value::Object(nested));
        }
        map
    }
}

// ============================================================================
// CustomAgg
// ============================================================================

/// Raw pass-through aggregation body
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAgg {
    name: String,
    body: Value,
}

impl CustomAgg {
    /// Create a custom aggregation named `name` with a raw JSON body
    pub fn new(name: impl Into<String>, body: impl Into<Value>) -> Self {
        CustomAgg {
            name: name.into(),
            body: body.into(),
        }
    }

    /// The caller-assigned name keying this aggregation under `aggs`
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Render for CustomAgg {
    fn render(&self) -> Map<String, Value> {
        self.body.as_object().cloned().unwrap_or_default()
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// One named aggregation of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// Single-field metric
    Metric(MetricAgg),
    /// String statistics
    StringStats(StringStatsAgg),
    /// Term bucketing
    Terms(TermsAgg),
    /// Raw pass-through body
    Custom(CustomAgg),
}

impl Aggregation {
    /// The caller-assigned name keying this aggregation under `aggs`
    pub fn name(&self) -> &str {
        match self {
            Aggregation::Metric(agg) => &agg.name,
            Aggregation::StringStats(agg) => &agg.name,
            Aggregation::Terms(agg) => &agg.name,
            Aggregation::Custom(agg) => &agg.name,
        }
    }
}

impl Render for Aggregation {
    fn render(&self) -> Map<String, Value> {
        match self {
            Aggregation::Metric(agg) => agg.render(),
            Aggregation::StringStats(agg) => agg.render(),
            Aggregation::Terms(agg) => agg.render(),
            Aggregation::Custom(agg) => agg.render(),
        }
    }
}

impl From<MetricAgg> for Aggregation {
    fn from(agg: MetricAgg) -> Self {
        Aggregation::Metric(agg)
    }
}

impl From<StringStatsAgg> for Aggregation {
    fn from(agg: StringStatsAgg) -> Self {
        Aggregation::StringStats(agg)
    }
}

impl From<TermsAgg> for Aggregation {
    fn from(agg: TermsAgg) -> Self {
        Aggregation::Terms(agg)
    }
}

impl From<CustomAgg> for Aggregation {
    fn from(agg: CustomAgg) -> Self {
        Aggregation::Custom(agg)
    }
}
