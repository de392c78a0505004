//! Query clause variants
//!
//! This module defines:
//! - Query: the closed set of clause kinds behind one render dispatch
//! - CustomQuery: raw pass-through for DSL features without a typed
//!   builder
//!
//! Builder APIs accept `impl Into<Query>` so callers pass concrete clause
//! builders directly; the `From` impls here do the wrapping.

use serde_json::{Map, Value};

use crate::compound::{BoolQuery, FunctionScoreQuery};
use crate::fulltext::{MatchAllQuery, MatchNoneQuery, MatchQuery};
use crate::multi_match::MultiMatchQuery;
use crate::range::RangeQuery;
use crate::render::Render;
use crate::term::{ExistsQuery, TermQuery, TermsQuery};

/// One query clause of any kind
///
/// A closed tagged union over every clause the builder surface knows;
/// each variant is a flat record with its own render operation, and
/// `Query` dispatches to it.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Exact-value term query
    Term(TermQuery),
    /// Multi-value terms query
    Terms(TermsQuery),
    /// Field-presence query
    Exists(ExistsQuery),
    /// Analyzed match query (match / match_phrase / match_phrase_prefix)
    Match(MatchQuery),
    /// Match-everything query
    MatchAll(MatchAllQuery),
    /// Match-nothing query
    MatchNone(MatchNoneQuery),
    /// Analyzed match across several fields
    MultiMatch(MultiMatchQuery),
    /// Bound-comparison query
    Range(RangeQuery),
    /// Boolean combinator
    Bool(BoolQuery),
    /// Function-score wrapper
    FunctionScore(FunctionScoreQuery),
    /// Raw pass-through clause
    Custom(CustomQuery),
}

impl Render for Query {
    fn render(&self) -> Map<String, Value> {
        match self {
            Query::Term(q) => q.render(),
            Query::Terms(q) => q.render(),
            Query::Exists(q) => q.render(),
            Query::Match(q) => q.render(),
            Query::MatchAll(q) => q.render(),
            Query::MatchNone(q) => q.render(),
            Query::MultiMatch(q) => q.render(),
            Query::Range(q) => q.render(),
            Query::Bool(q) => q.render(),
            Query::FunctionScore(q) => q.render(),
            Query::Custom(q) => q.render(),
        }
    }
}

impl From<TermQuery> for Query {
    fn from(q: TermQuery) -> Self {
        Query::Term(q)
    }
}

impl From<TermsQuery> for Query {
    fn from(q: TermsQuery) -> Self {
        Query::Terms(q)
    }
}

impl From<ExistsQuery> for Query {
    fn from(q: ExistsQuery) -> Self {
        Query::Exists(q)
    }
}

impl From<MatchQuery> for Query {
    fn from(q: MatchQuery) -> Self {
        Query::Match(q)
    }
}

impl From<MatchAllQuery> for Query {
    fn from(q: MatchAllQuery) -> Self {
        Query::MatchAll(q)
    }
}

impl From<MatchNoneQuery> for Query {
    fn from(q: MatchNoneQuery) -> Self {
        Query::MatchNone(q)
    }
}

impl From<MultiMatchQuery> for Query {
    fn from(q: MultiMatchQuery) -> Self {
        Query::MultiMatch(q)
    }
}

impl From<RangeQuery> for Query {
    fn from(q: RangeQuery) -> Self {
        Query::Range(q)
    }
}

impl From<BoolQuery> for Query {
    fn from(q: BoolQuery) -> Self {
        Query::Bool(q)
    }
}

impl From<FunctionScoreQuery> for Query {
    fn from(q: FunctionScoreQuery) -> Self {
        Query::FunctionScore(q)
    }
}

impl From<CustomQuery> for Query {
    fn from(q: CustomQuery) -> Self {
        Query::Custom(q)
    }
}

// ============================================================================
// CustomQuery
// ============================================================================

/// Raw pass-through clause
///
/// Escape hatch for DSL features the typed surface does not cover: the
/// body is rendered verbatim. A non-object body renders as an empty
/// mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomQuery {
    body: Value,
}

impl CustomQuery {
    /// Create a custom clause from a raw JSON object
    pub fn new(body: impl Into<Value>) -> Self {
        CustomQuery { body: body.into() }
    }
}

impl Render for CustomQuery {
    fn render(&self) -> Map<String, Value> {
        self.body.as_object().cloned().unwrap_or_default()
    }
}
