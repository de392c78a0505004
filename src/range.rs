//! Range queries
//!
//! This module defines:
//! - RangeQuery: bound comparisons on a single field
//! - RangeRelation: relation tokens for range-typed fields
//!
//! Bound values are arbitrary JSON scalars; a bound set to `0` is a real
//! bound and renders as such.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::render::{insert_nonempty, insert_set, wrap, Render};

/// How a document's range field must relate to the queried range
///
/// Tokens are uppercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RangeRelation {
    /// The document range contains the query range
    Contains,
    /// The document range is within the query range
    Within,
    /// The ranges intersect
    Intersects,
}

impl RangeRelation {
    /// Wire token for this relation
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeRelation::Contains => "CONTAINS",
            RangeRelation::Within => "WITHIN",
            RangeRelation::Intersects => "INTERSECTS",
        }
    }
}

impl fmt::Display for RangeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RangeRelation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONTAINS" => Ok(RangeRelation::Contains),
            "WITHIN" => Ok(RangeRelation::Within),
            "INTERSECTS" => Ok(RangeRelation::Intersects),
            other => Err(Error::unknown_token("range relation", other)),
        }
    }
}

/// Bound-comparison query on a single field
///
/// Renders as `{"range": {"<field>": {"gt"?, "gte"?, "lt"?, "lte"?, ...}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    field: String,
    gt: Option<Value>,
    gte: Option<Value>,
    lt: Option<Value>,
    lte: Option<Value>,
    relation: Option<RangeRelation>,
    time_zone: Option<String>,
    format: Option<String>,
    boost: Option<f64>,
}

impl RangeQuery {
    /// Create a range query on `field` with no bounds yet
    pub fn new(field: impl Into<String>) -> Self {
        RangeQuery {
            field: field.into(),
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            relation: None,
            time_zone: None,
            format: None,
            boost: None,
        }
    }

    /// Set the exclusive lower bound
    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.gt = Some(value.into());
        self
    }

    /// Set the inclusive lower bound
    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.gte = Some(value.into());
        self
    }

    /// Set the exclusive upper bound
    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.lt = Some(value.into());
        self
    }

    /// Set the inclusive upper bound
    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.lte = Some(value.into());
        self
    }

    /// Set the relation used for range-typed fields
    pub fn relation(mut self, relation: RangeRelation) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Set the time zone used to convert date bounds to UTC
    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    /// Set the date format used to parse date bounds
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the boost value for the query
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Render for RangeQuery {
    fn render(&self) -> Map<String, Value> {
        let mut params = Map::new();
        insert_set(&mut params, "gt", self.gt.clone());
        insert_set(&mut params, "gte", self.gte.clone());
        insert_set(&mut params, "lt", self.lt.clone());
        insert_set(&mut params, "lte", self.lte.clone());
        insert_nonempty(&mut params, "relation", self.relation.map(|r| r.as_str()));
        insert_nonempty(&mut params, "time_zone", self.time_zone.clone());
        insert_nonempty(&mut params, "format", self.format.clone());
        insert_nonempty(&mut params, "boost", self.boost);

        let mut inner = Map::new();
        inner.insert(self.field.clone(), Value::Object(params));
        wrap("range", inner)
    }
}
