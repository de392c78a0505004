//! Compositional query builder for OpenSearch-style search engines
//!
//! This crate lets a caller assemble a tree of query, filter, sort,
//! scoring and aggregation clauses in-process and render it into the
//! nested key/value structure the engine's JSON query DSL expects.
//! It defines:
//! - Render: the capability every clause, aggregation and option type
//!   implements to produce its mapping
//! - Query: the closed set of clause kinds (term, match, multi_match,
//!   range, bool, function_score, ...)
//! - Aggregation: metric, string-stats, terms and custom aggregations
//! - Sort: field, script and raw sort entries
//! - SearchRequest: the top-level accumulator composing everything into
//!   one request body
//!
//! The crate never talks to a search engine: the rendered mapping is the
//! sole artifact, handed to whatever transport the caller uses. Rendering
//! is pure and idempotent, and a field that was never set never appears
//! in the output.
//!
//! # Example
//!
//! ```
//! use oquery::{BoolQuery, MatchQuery, Render, SearchRequest};
//!
//! let body = SearchRequest::new()
//!     .query(BoolQuery::new().must(MatchQuery::new("title").query("rust")))
//!     .size(10)
//!     .render();
//! assert!(body.contains_key("query"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregations;
pub mod collapse;
pub mod compound;
pub mod error;
pub mod fulltext;
pub mod multi_match;
pub mod query;
pub mod range;
pub mod render;
pub mod script;
pub mod search;
pub mod sort;
pub mod source;
pub mod term;

// Re-export the public surface at the crate root
pub use aggregations::{Aggregation, CustomAgg, MetricAgg, MetricKind, StringStatsAgg, TermsAgg};
pub use collapse::Collapse;
pub use compound::{
    BoolQuery, BoostMode, FieldValueFactorFunction, FieldValueFactorModifier,
    FunctionScoreQuery, RandomScoreFunction, ScoreFunction, ScoreMode,
};
pub use error::{Error, Result};
pub use fulltext::{MatchAllQuery, MatchNoneQuery, MatchOperator, MatchQuery, ZeroTerms};
pub use multi_match::{MultiMatchQuery, MultiMatchType};
pub use query::{CustomQuery, Query};
pub use range::{RangeQuery, RangeRelation};
pub use render::Render;
pub use script::Script;
pub use search::SearchRequest;
pub use sort::{FieldSort, ScriptSort, ScriptSortType, Sort, SortMode, SortOrder};
pub use source::SourceFilter;
pub use term::{ExistsQuery, TermQuery, TermsQuery};
