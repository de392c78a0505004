//! Compound queries
//!
//! This module defines:
//! - BoolQuery: the boolean combinator with must/filter/must_not/should
//!   role collections
//! - FunctionScoreQuery: wraps an inner query with a list of scoring
//!   functions
//! - ScoreFunction variants: RandomScoreFunction, FieldValueFactorFunction
//! - BoostMode / ScoreMode wire-token enums
//!
//! Role collections and function lists are ordered: repeat calls to an
//! append setter accumulate, and render order is append order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::query::Query;
use crate::render::{insert_nonempty, insert_set, wrap, Render};

// ============================================================================
// BoolQuery
// ============================================================================

/// Boolean compound query
///
/// Holds four ordered role collections. A role whose collection is empty
/// is omitted entirely from the rendered mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    must: Vec<Query>,
    filter: Vec<Query>,
    must_not: Vec<Query>,
    should: Vec<Query>,
    minimum_should_match: Option<i64>,
    boost: Option<f64>,
    name: Option<String>,
}

impl BoolQuery {
    /// Create an empty bool query
    pub fn new() -> Self {
        BoolQuery::default()
    }

    /// Append a clause to the `must` role; repeat calls accumulate in order
    pub fn must(mut self, query: impl Into<Query>) -> Self {
        self.must.push(query.into());
        self
    }

    /// Append a clause to the `filter` role; repeat calls accumulate in order
    pub fn filter(mut self, query: impl Into<Query>) -> Self {
        self.filter.push(query.into());
        self
    }

    /// Append a clause to the `must_not` role; repeat calls accumulate in order
    pub fn must_not(mut self, query: impl Into<Query>) -> Self {
        self.must_not.push(query.into());
        self
    }

    /// Append a clause to the `should` role; repeat calls accumulate in order
    pub fn should(mut self, query: impl Into<Query>) -> Self {
        self.should.push(query.into());
        self
    }

    /// Set the number of should clauses matched documents must satisfy
    pub fn minimum_should_match(mut self, count: i64) -> Self {
        self.minimum_should_match = Some(count);
        self
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

fn render_role(body: &mut Map<String, Value>, role: &str, queries: &[Query]) {
    if queries.is_empty() {
        return;
    }
    let rendered = queries
        .iter()
        .map(|q| Value::Object(q.render()))
        .collect::<Vec<_>>();
    body.insert(role.to_string(), Value::Array(rendered));
}

impl Render for BoolQuery {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        render_role(&mut body, "must", &self.must);
        render_role(&mut body, "filter", &self.filter);
        render_role(&mut body, "must_not", &self.must_not);
        render_role(&mut body, "should", &self.should);
        insert_nonempty(&mut body, "minimum_should_match", self.minimum_should_match);
        insert_nonempty(&mut body, "boost", self.boost);
        insert_nonempty(&mut body, "_name", self.name.clone());
        wrap("bool", body)
    }
}

// ============================================================================
// Score Modes
// ============================================================================

/// How the computed function score combines with the query score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostMode {
    /// Multiply query score and function score
    Multiply,
    /// Use only the function score
    Replace,
    /// Add query score and function score
    Sum,
    /// Average of query score and function score
    Avg,
    /// Maximum of query score and function score
    Max,
    /// Minimum of query score and function score
    Min,
}

impl BoostMode {
    /// Wire token for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            BoostMode::Multiply => "multiply",
            BoostMode::Replace => "replace",
            BoostMode::Sum => "sum",
            BoostMode::Avg => "avg",
            BoostMode::Max => "max",
            BoostMode::Min => "min",
        }
    }
}

impl fmt::Display for BoostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoostMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiply" => Ok(BoostMode::Multiply),
            "replace" => Ok(BoostMode::Replace),
            "sum" => Ok(BoostMode::Sum),
            "avg" => Ok(BoostMode::Avg),
            "max" => Ok(BoostMode::Max),
            "min" => Ok(BoostMode::Min),
            other => Err(Error::unknown_token("boost mode", other)),
        }
    }
}

/// How scores from multiple functions combine with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// Multiply the function scores
    Multiply,
    /// Use the first function with a match
    First,
    /// Add the function scores
    Sum,
    /// Average of the function scores
    Avg,
    /// Maximum function score
    Max,
    /// Minimum function score
    Min,
}

impl ScoreMode {
    /// Wire token for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Multiply => "multiply",
            ScoreMode::First => "first",
            ScoreMode::Sum => "sum",
            ScoreMode::Avg => "avg",
            ScoreMode::Max => "max",
            ScoreMode::Min => "min",
        }
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScoreMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiply" => Ok(ScoreMode::Multiply),
            "first" => Ok(ScoreMode::First),
            "sum" => Ok(ScoreMode::Sum),
            "avg" => Ok(ScoreMode::Avg),
            "max" => Ok(ScoreMode::Max),
            "min" => Ok(ScoreMode::Min),
            other => Err(Error::unknown_token("score mode", other)),
        }
    }
}

// ============================================================================
// Scoring Functions
// ============================================================================

/// Scoring function producing a pseudo-random score per document
///
/// The seed renders whenever set, including zero: a zero seed is a real
/// seed on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RandomScoreFunction {
    seed: Option<i64>,
    field: Option<String>,
}

impl RandomScoreFunction {
    /// Create a random_score function with no seed or field
    pub fn new() -> Self {
        RandomScoreFunction::default()
    }

    /// Set the seed for the random score
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the field the per-document random value derives from
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl Render for RandomScoreFunction {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        insert_set(&mut body, "seed", self.seed);
        insert_nonempty(&mut body, "field", self.field.clone());
        wrap("random_score", body)
    }
}

/// How a field value is transformed before it contributes to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValueFactorModifier {
    /// No transformation
    None,
    /// log(value)
    Log,
    /// log(1 + value)
    Log1p,
    /// log(2 + value)
    Log2p,
    /// ln(value)
    Ln,
    /// ln(1 + value)
    Ln1p,
    /// ln(2 + value)
    Ln2p,
    /// value squared
    Square,
    /// square root of value
    Sqrt,
    /// 1 / value
    Reciprocal,
}

impl FieldValueFactorModifier {
    /// Wire token for this modifier
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldValueFactorModifier::None => "none",
            FieldValueFactorModifier::Log => "log",
            FieldValueFactorModifier::Log1p => "log1p",
            FieldValueFactorModifier::Log2p => "log2p",
            FieldValueFactorModifier::Ln => "ln",
            FieldValueFactorModifier::Ln1p => "ln1p",
            FieldValueFactorModifier::Ln2p => "ln2p",
            FieldValueFactorModifier::Square => "square",
            FieldValueFactorModifier::Sqrt => "sqrt",
            FieldValueFactorModifier::Reciprocal => "reciprocal",
        }
    }
}

impl fmt::Display for FieldValueFactorModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldValueFactorModifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(FieldValueFactorModifier::None),
            "log" => Ok(FieldValueFactorModifier::Log),
            "log1p" => Ok(FieldValueFactorModifier::Log1p),
            "log2p" => Ok(FieldValueFactorModifier::Log2p),
            "ln" => Ok(FieldValueFactorModifier::Ln),
            "ln1p" => Ok(FieldValueFactorModifier::Ln1p),
            "ln2p" => Ok(FieldValueFactorModifier::Ln2p),
            "square" => Ok(FieldValueFactorModifier::Square),
            "sqrt" => Ok(FieldValueFactorModifier::Sqrt),
            "reciprocal" => Ok(FieldValueFactorModifier::Reciprocal),
            other => Err(Error::unknown_token("field value factor modifier", other)),
        }
    }
}

/// Scoring function deriving the score from a numeric field value
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValueFactorFunction {
    field: String,
    factor: Option<f64>,
    modifier: Option<FieldValueFactorModifier>,
    missing: Option<f64>,
}

impl FieldValueFactorFunction {
    /// Create a field_value_factor function reading `field`
    pub fn new(field: impl Into<String>) -> Self {
        FieldValueFactorFunction {
            field: field.into(),
            factor: None,
            modifier: None,
            missing: None,
        }
    }

    /// Set the multiplier applied to the field value
    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = Some(factor);
        self
    }

    /// Set the transformation applied to the field value
    pub fn modifier(mut self, modifier: FieldValueFactorModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Set the value used for documents missing the field
    pub fn missing(mut self, missing: f64) -> Self {
        self.missing = Some(missing);
        self
    }
}

impl Render for FieldValueFactorFunction {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("field".to_string(), Value::String(self.field.clone()));
        insert_nonempty(&mut body, "factor", self.factor);
        insert_nonempty(&mut body, "modifier", self.modifier.map(|m| m.as_str()));
        insert_nonempty(&mut body, "missing", self.missing);
        wrap("field_value_factor", body)
    }
}

/// One scoring function inside a function_score query
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreFunction {
    /// Pseudo-random per-document score
    Random(RandomScoreFunction),
    /// Score derived from a numeric field value
    FieldValueFactor(FieldValueFactorFunction),
}

impl Render for ScoreFunction {
    fn render(&self) -> Map<String, Value> {
        match self {
            ScoreFunction::Random(f) => f.render(),
            ScoreFunction::FieldValueFactor(f) => f.render(),
        }
    }
}

impl From<RandomScoreFunction> for ScoreFunction {
    fn from(f: RandomScoreFunction) -> Self {
        ScoreFunction::Random(f)
    }
}

impl From<FieldValueFactorFunction> for ScoreFunction {
    fn from(f: FieldValueFactorFunction) -> Self {
        ScoreFunction::FieldValueFactor(f)
    }
}

// ============================================================================
// FunctionScoreQuery
// ============================================================================

/// Compound query rescoring an inner query with a list of functions
///
/// The inner query renders under `"query"`, the functions in append order
/// under `"functions"`, and scalar modifiers only when set.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionScoreQuery {
    query: Option<Box<Query>>,
    functions: Vec<ScoreFunction>,
    boost_mode: Option<BoostMode>,
    score_mode: Option<ScoreMode>,
    max_boost: Option<f64>,
    min_score: Option<f64>,
    boost: Option<f64>,
}

impl FunctionScoreQuery {
    /// Create a function_score query wrapping `query`
    pub fn new(query: impl Into<Query>) -> Self {
        FunctionScoreQuery {
            query: Some(Box::new(query.into())),
            functions: Vec::new(),
            boost_mode: None,
            score_mode: None,
            max_boost: None,
            min_score: None,
            boost: None,
        }
    }

    /// Append a scoring function; repeat calls accumulate in order
    pub fn function(mut self, function: impl Into<ScoreFunction>) -> Self {
        self.functions.push(function.into());
        self
    }

    /// Set how the function score combines with the query score
    pub fn boost_mode(mut self, mode: BoostMode) -> Self {
        self.boost_mode = Some(mode);
        self
    }

    /// Set how scores from multiple functions combine
    pub fn score_mode(mut self, mode: ScoreMode) -> Self {
        self.score_mode = Some(mode);
        self
    }

    /// Set the ceiling for the combined function score
    pub fn max_boost(mut self, max_boost: f64) -> Self {
        self.max_boost = Some(max_boost);
        self
    }

    /// Set the score below which documents are excluded
    pub fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Set the boost value for the whole query
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Render for FunctionScoreQuery {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(query) = &self.query {
            body.insert("query".to_string(), Value::Object(query.render()));
        }
        if !self.functions.is_empty() {
            let functions = self
                .functions
                .iter()
                .map(|f| Value::Object(f.render()))
                .collect::<Vec<_>>();
            body.insert("functions".to_string(), Value::Array(functions));
        }
        insert_nonempty(&mut body, "boost_mode", self.boost_mode.map(|m| m.as_str()));
        insert_nonempty(&mut body, "score_mode", self.score_mode.map(|m| m.as_str()));
        insert_nonempty(&mut body, "max_boost", self.max_boost);
        insert_nonempty(&mut body, "min_score", self.min_score);
        insert_nonempty(&mut body, "boost", self.boost);
        wrap("function_score", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::RangeQuery;
    use crate::term::TermQuery;
    use serde_json::json;

    fn rendered(q: &impl Render) -> Value {
        Value::Object(q.render())
    }

    #[test]
    fn test_bool_empty_roles_are_omitted() {
        let q = BoolQuery::new();
        assert_eq!(rendered(&q), json!({ "bool": {} }));
    }

    #[test]
    fn test_bool_must_accumulates_in_order() {
        let q = BoolQuery::new()
            .must(TermQuery::new("a", 1))
            .must(TermQuery::new("b", 2));
        assert_eq!(
            rendered(&q),
            json!({
                "bool": {
                    "must": [
                        { "term": { "a": { "value": 1 } } },
                        { "term": { "b": { "value": 2 } } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_bool_all_roles() {
        let q = BoolQuery::new()
            .must(TermQuery::new("m", 1))
            .filter(RangeQuery::new("f").gte(10))
            .must_not(TermQuery::new("n", 2))
            .should(TermQuery::new("s", 3))
            .minimum_should_match(1)
            .name("roles");
        assert_eq!(
            rendered(&q),
            json!({
                "bool": {
                    "must": [{ "term": { "m": { "value": 1 } } }],
                    "filter": [{ "range": { "f": { "gte": 10 } } }],
                    "must_not": [{ "term": { "n": { "value": 2 } } }],
                    "should": [{ "term": { "s": { "value": 3 } } }],
                    "minimum_should_match": 1,
                    "_name": "roles"
                }
            })
        );
    }

    #[test]
    fn test_bool_with_boost() {
        let q = BoolQuery::new()
            .must(
                RangeQuery::new("date")
                    .gt("some time in the past")
                    .lte("now")
                    .boost(3.1),
            )
            .boost(3.1);
        assert_eq!(
            rendered(&q),
            json!({
                "bool": {
                    "must": [{
                        "range": {
                            "date": { "gt": "some time in the past", "lte": "now", "boost": 3.1 }
                        }
                    }],
                    "boost": 3.1
                }
            })
        );
    }

    #[test]
    fn test_nested_bool() {
        let q = BoolQuery::new().should(BoolQuery::new().must(TermQuery::new("x", true)));
        assert_eq!(
            rendered(&q),
            json!({
                "bool": {
                    "should": [{
                        "bool": { "must": [{ "term": { "x": { "value": true } } }] }
                    }]
                }
            })
        );
    }

    #[test]
    fn test_random_score_empty() {
        assert_eq!(
            rendered(&RandomScoreFunction::new()),
            json!({ "random_score": {} })
        );
    }

    #[test]
    fn test_random_score_zero_seed_renders() {
        // The seed carries presence: zero is a valid seed.
        assert_eq!(
            rendered(&RandomScoreFunction::new().seed(0)),
            json!({ "random_score": { "seed": 0 } })
        );
    }

    #[test]
    fn test_random_score_with_seed_and_field() {
        assert_eq!(
            rendered(&RandomScoreFunction::new().seed(42).field("_seq_no")),
            json!({ "random_score": { "seed": 42, "field": "_seq_no" } })
        );
    }

    #[test]
    fn test_field_value_factor() {
        let f = FieldValueFactorFunction::new("likes")
            .factor(1.2)
            .modifier(FieldValueFactorModifier::Sqrt)
            .missing(1.0);
        assert_eq!(
            rendered(&f),
            json!({
                "field_value_factor": {
                    "field": "likes",
                    "factor": 1.2,
                    "modifier": "sqrt",
                    "missing": 1.0
                }
            })
        );
    }

    #[test]
    fn test_function_score_minimal() {
        let q = FunctionScoreQuery::new(TermQuery::new("user", "kimchy"))
            .function(RandomScoreFunction::new());
        assert_eq!(
            rendered(&q),
            json!({
                "function_score": {
                    "query": { "term": { "user": { "value": "kimchy" } } },
                    "functions": [{ "random_score": {} }]
                }
            })
        );
    }

    #[test]
    fn test_function_score_functions_accumulate_in_order() {
        let q = FunctionScoreQuery::new(TermQuery::new("user", "kimchy"))
            .function(RandomScoreFunction::new())
            .function(RandomScoreFunction::new().seed(123));
        assert_eq!(
            rendered(&q),
            json!({
                "function_score": {
                    "query": { "term": { "user": { "value": "kimchy" } } },
                    "functions": [
                        { "random_score": {} },
                        { "random_score": { "seed": 123 } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_function_score_modifiers() {
        let q = FunctionScoreQuery::new(TermQuery::new("user", "kimchy"))
            .function(RandomScoreFunction::new())
            .boost_mode(BoostMode::Sum)
            .score_mode(ScoreMode::Max)
            .max_boost(10.0)
            .min_score(0.5)
            .boost(2.0);
        assert_eq!(
            rendered(&q),
            json!({
                "function_score": {
                    "query": { "term": { "user": { "value": "kimchy" } } },
                    "functions": [{ "random_score": {} }],
                    "boost_mode": "sum",
                    "score_mode": "max",
                    "max_boost": 10.0,
                    "min_score": 0.5,
                    "boost": 2.0
                }
            })
        );
    }

    #[test]
    fn test_mode_tokens_round_trip() {
        for m in [
            BoostMode::Multiply,
            BoostMode::Replace,
            BoostMode::Sum,
            BoostMode::Avg,
            BoostMode::Max,
            BoostMode::Min,
        ] {
            assert_eq!(m.as_str().parse::<BoostMode>().unwrap(), m);
        }
        for m in [
            ScoreMode::Multiply,
            ScoreMode::First,
            ScoreMode::Sum,
            ScoreMode::Avg,
            ScoreMode::Max,
            ScoreMode::Min,
        ] {
            assert_eq!(m.as_str().parse::<ScoreMode>().unwrap(), m);
        }
        for m in [
            FieldValueFactorModifier::None,
            FieldValueFactorModifier::Log,
            FieldValueFactorModifier::Log1p,
            FieldValueFactorModifier::Log2p,
            FieldValueFactorModifier::Ln,
            FieldValueFactorModifier::Ln1p,
            FieldValueFactorModifier::Ln2p,
            FieldValueFactorModifier::Square,
            FieldValueFactorModifier::Sqrt,
            FieldValueFactorModifier::Reciprocal,
        ] {
            assert_eq!(m.as_str().parse::<FieldValueFactorModifier>().unwrap(), m);
        }
    }
}
