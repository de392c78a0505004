//! Multi-field full-text queries
//!
//! This module defines:
//! - MultiMatchQuery: an analyzed match across several fields
//! - MultiMatchType: the per-field scoring strategy tokens

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::fulltext::{MatchOperator, ZeroTerms};
use crate::render::{insert_nonempty, insert_set, wrap, Render};

// ============================================================================
// MultiMatchType
// ============================================================================

/// Strategy for combining per-field scores in a multi_match query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMatchType {
    /// Score from the single best matching field
    BestFields,
    /// Combine scores from all matching fields
    MostFields,
    /// Analyze fields as one combined field
    CrossFields,
    /// Match the value as a phrase
    Phrase,
    /// Match the value as a phrase prefix
    PhrasePrefix,
    /// Match with a bool_prefix query per field
    BoolPrefix,
}

impl MultiMatchType {
    /// Wire token for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            MultiMatchType::BestFields => "best_fields",
            MultiMatchType::MostFields => "most_fields",
            MultiMatchType::CrossFields => "cross_fields",
            MultiMatchType::Phrase => "phrase",
            MultiMatchType::PhrasePrefix => "phrase_prefix",
            MultiMatchType::BoolPrefix => "bool_prefix",
        }
    }
}

impl fmt::Display for MultiMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MultiMatchType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best_fields" => Ok(MultiMatchType::BestFields),
            "most_fields" => Ok(MultiMatchType::MostFields),
            "cross_fields" => Ok(MultiMatchType::CrossFields),
            "phrase" => Ok(MultiMatchType::Phrase),
            "phrase_prefix" => Ok(MultiMatchType::PhrasePrefix),
            "bool_prefix" => Ok(MultiMatchType::BoolPrefix),
            other => Err(Error::unknown_token("multi_match type", other)),
        }
    }
}

// ============================================================================
// MultiMatchQuery
// ============================================================================

/// Analyzed full-text query across several fields
///
/// Renders under a single `"multi_match"` key. Fields accumulate across
/// calls and render in append order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiMatchQuery {
    query: Option<Value>,
    fields: Vec<String>,
    match_type: Option<MultiMatchType>,
    tie_breaker: Option<f64>,
    boost: Option<f64>,
    analyzer: Option<String>,
    auto_generate_synonyms_phrase_query: Option<bool>,
    fuzziness: Option<String>,
    max_expansions: Option<u64>,
    prefix_length: Option<u64>,
    fuzzy_transpositions: Option<bool>,
    fuzzy_rewrite: Option<String>,
    lenient: Option<bool>,
    operator: Option<MatchOperator>,
    minimum_should_match: Option<String>,
    zero_terms_query: Option<ZeroTerms>,
    slop: Option<u64>,
    name: Option<String>,
}

impl MultiMatchQuery {
    /// Create an empty multi_match query
    pub fn new() -> Self {
        MultiMatchQuery::default()
    }

    /// Set the value to find in the queried fields
    pub fn query(mut self, query: impl Into<Value>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Append one field to search; repeat calls accumulate in order
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Append several fields to search, preserving iteration order
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Set the per-field scoring strategy
    pub fn match_type(mut self, match_type: MultiMatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    /// Set the tie breaker factor between field scores
    pub fn tie_breaker(mut self, tie_breaker: f64) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }

    /// Set the boost value for the query
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Set the analyzer used to tokenize the query value
    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    /// Set whether match-phrase queries are auto-generated for synonyms
    pub fn auto_generate_synonyms_phrase_query(mut self, enabled: bool) -> Self {
        self.auto_generate_synonyms_phrase_query = Some(enabled);
        self
    }

    /// Set the maximum edit distance allowed for matching
    pub fn fuzziness(mut self, fuzziness: impl Into<String>) -> Self {
        self.fuzziness = Some(fuzziness.into());
        self
    }

    /// Set the maximum number of terms the query expands to
    pub fn max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Set the number of beginning characters left unchanged for fuzzy matching
    pub fn prefix_length(mut self, prefix_length: u64) -> Self {
        self.prefix_length = Some(prefix_length);
        self
    }

    /// Set whether fuzzy edits include transpositions of adjacent characters
    pub fn fuzzy_transpositions(mut self, enabled: bool) -> Self {
        self.fuzzy_transpositions = Some(enabled);
        self
    }

    /// Set the method used to rewrite the query
    pub fn fuzzy_rewrite(mut self, rewrite: impl Into<String>) -> Self {
        self.fuzzy_rewrite = Some(rewrite.into());
        self
    }

    /// Set whether format-based errors are ignored
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = Some(lenient);
        self
    }

    /// Set the boolean logic used to interpret the query value
    pub fn operator(mut self, operator: MatchOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Set the minimum number or percentage of clauses that must match
    pub fn minimum_should_match(mut self, minimum: impl Into<String>) -> Self {
        self.minimum_should_match = Some(minimum.into());
        self
    }

    /// Set the behavior when the analyzer removes all tokens
    pub fn zero_terms_query(mut self, policy: ZeroTerms) -> Self {
        self.zero_terms_query = Some(policy);
        self
    }

    /// Set the maximum number of positions allowed between matching tokens
    pub fn slop(mut self, slop: u64) -> Self {
        self.slop = Some(slop);
        self
    }

    /// Set the query name reported back in matched_queries
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Render for MultiMatchQuery {
    fn render(&self) -> Map<String, Value> {
        let mut params = Map::new();
        insert_set(&mut params, "query", self.query.clone());
        if !self.fields.is_empty() {
            params.insert(
                "fields".to_string(),
                Value::Array(self.fields.iter().cloned().map(Value::String).collect()),
            );
        }
        insert_nonempty(&mut params, "type", self.match_type.map(|t| t.as_str()));
        insert_nonempty(&mut params, "tie_breaker", self.tie_breaker);
        insert_nonempty(&mut params, "boost", self.boost);
        insert_nonempty(&mut params, "analyzer", self.analyzer.clone());
        insert_set(
            &mut params,
            "auto_generate_synonyms_phrase_query",
            self.auto_generate_synonyms_phrase_query,
        );
        insert_nonempty(&mut params, "fuzziness", self.fuzziness.clone());
        insert_nonempty(&mut params, "max_expansions", self.max_expansions);
        insert_nonempty(&mut params, "prefix_length", self.prefix_length);
        insert_set(&mut params, "fuzzy_transpositions", self.fuzzy_transpositions);
        insert_nonempty(&mut params, "fuzzy_rewrite", self.fuzzy_rewrite.clone());
        insert_set(&mut params, "lenient", self.lenient);
        insert_nonempty(&mut params, "operator", self.operator.map(|o| o.as_str()));
        insert_nonempty(
            &mut params,
            "minimum_should_match",
            self.minimum_should_match.clone(),
        );
        insert_nonempty(
            &mut params,
            "zero_terms_query",
            self.zero_terms_query.map(|z| z.as_str()),
        );
        insert_nonempty(&mut params, "slop", self.slop);
        insert_nonempty(&mut params, "_name", self.name.clone());

        wrap("multi_match", params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(q: &impl Render) -> Value {
        Value::Object(q.render())
    }

    #[test]
    fn test_multi_match_minimal() {
        let q = MultiMatchQuery::new().query("text").fields(["title", "body"]);
        assert_eq!(
            rendered(&q),
            json!({
                "multi_match": { "query": "text", "fields": ["title", "body"] }
            })
        );
    }

    #[test]
    fn test_multi_match_empty_renders_empty_body() {
        let q = MultiMatchQuery::new();
        assert_eq!(rendered(&q), json!({ "multi_match": {} }));
    }

    #[test]
    fn test_multi_match_fields_accumulate_in_order() {
        let q = MultiMatchQuery::new().field("a").fields(["b", "c"]).field("d");
        assert_eq!(
            rendered(&q),
            json!({ "multi_match": { "fields": ["a", "b", "c", "d"] } })
        );
    }

    #[test]
    fn test_multi_match_full_options() {
        let q = MultiMatchQuery::new()
            .query("text")
            .fields(["title", "body"])
            .match_type(MultiMatchType::MostFields)
            .tie_breaker(0.3)
            .operator(MatchOperator::Or)
            .zero_terms_query(ZeroTerms::None)
            .slop(1)
            .name("mm");
        assert_eq!(
            rendered(&q),
            json!({
                "multi_match": {
                    "query": "text",
                    "fields": ["title", "body"],
                    "type": "most_fields",
                    "tie_breaker": 0.3,
                    "operator": "or",
                    "zero_terms_query": "none",
                    "slop": 1,
                    "_name": "mm"
                }
            })
        );
    }

    #[test]
    fn test_multi_match_type_tokens_round_trip() {
        for t in [
            MultiMatchType::BestFields,
            MultiMatchType::MostFields,
            MultiMatchType::CrossFields,
            MultiMatchType::Phrase,
            MultiMatchType::PhrasePrefix,
            MultiMatchType::BoolPrefix,
        ] {
            assert_eq!(t.as_str().parse::<MultiMatchType>().unwrap(), t);
        }
        assert!("worst_fields".parse::<MultiMatchType>().is_err());
    }
}
