//! Full-text match queries
//!
//! This module defines:
//! - MatchQuery: analyzed match on a single field, in three flavors
//!   (`match`, `match_phrase`, `match_phrase_prefix`)
//! - MatchAllQuery / MatchNoneQuery: match everything / nothing
//! - MatchOperator and ZeroTerms wire-token enums, shared with the
//!   multi-match query

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::render::{insert_nonempty, insert_set, wrap, Render};

// ============================================================================
// Wire Tokens
// ============================================================================

/// Boolean logic used to interpret the text in a match query's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOperator {
    /// Any analyzed token may match
    Or,
    /// All analyzed tokens must match
    And,
}

impl MatchOperator {
    /// Wire token for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOperator::Or => "or",
            MatchOperator::And => "and",
        }
    }
}

impl fmt::Display for MatchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "or" => Ok(MatchOperator::Or),
            "and" => Ok(MatchOperator::And),
            other => Err(Error::unknown_token("match operator", other)),
        }
    }
}

/// Behavior when the analyzer removes all tokens from the query value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroTerms {
    /// Return no documents
    None,
    /// Return all documents
    All,
}

impl ZeroTerms {
    /// Wire token for this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            ZeroTerms::None => "none",
            ZeroTerms::All => "all",
        }
    }
}

impl fmt::Display for ZeroTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ZeroTerms {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ZeroTerms::None),
            "all" => Ok(ZeroTerms::All),
            other => Err(Error::unknown_token("zero terms policy", other)),
        }
    }
}

// ============================================================================
// MatchQuery
// ============================================================================

/// Flavor of a match query, naming its top-level wire key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    Match,
    MatchPhrase,
    MatchPhrasePrefix,
}

impl MatchKind {
    fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Match => "match",
            MatchKind::MatchPhrase => "match_phrase",
            MatchKind::MatchPhrasePrefix => "match_phrase_prefix",
        }
    }
}

/// Analyzed full-text query on a single field
///
/// One record backs the `match`, `match_phrase` and `match_phrase_prefix`
/// clause kinds; the constructor picks the kind. All parameters are
/// optional and only the set ones are rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    kind: MatchKind,
    field: String,
    query: Option<Value>,
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
    boost: Option<f64>,
    name: Option<String>,
}

impl MatchQuery {
    fn with_kind(kind: MatchKind, field: String) -> Self {
        MatchQuery {
            kind,
            field,
            query: None,
            analyzer: None,
            auto_generate_synonyms_phrase_query: None,
            fuzziness: None,
            max_expansions: None,
            prefix_length: None,
            fuzzy_transpositions: None,
            fuzzy_rewrite: None,
            lenient: None,
            operator: None,
            minimum_should_match: None,
            zero_terms_query: None,
            slop: None,
            boost: None,
            name: None,
        }
    }

    /// Create a `match` query on `field`
    pub fn new(field: impl Into<String>) -> Self {
        MatchQuery::with_kind(MatchKind::Match, field.into())
    }

    /// Create a `match_phrase` query on `field`
    pub fn phrase(field: impl Into<String>) -> Self {
        MatchQuery::with_kind(MatchKind::MatchPhrase, field.into())
    }

    /// Create a `match_phrase_prefix` query on `field`
    pub fn phrase_prefix(field: impl Into<String>) -> Self {
        MatchQuery::with_kind(MatchKind::MatchPhrasePrefix, field.into())
    }

    /// Set the value to find in the field
    pub fn query(mut self, query: impl Into<Value>) -> Self {
        self.query = Some(query.into());
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

impl Render for MatchQuery {
    fn render(&self) -> Map<String, Value> {
        let mut params = Map::new();
        insert_set(&mut params, "query", self.query.clone());
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
        insert_nonempty(&mut params, "boost", self.boost);
        insert_nonempty(&mut params, "_name", self.name.clone());

        let mut inner = Map::new();
        inner.insert(self.field.clone(), Value::Object(params));
        wrap(self.kind.as_str(), inner)
    }
}

// ============================================================================
// MatchAllQuery / MatchNoneQuery
// ============================================================================

/// Query matching every document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchAllQuery {
    boost: Option<f64>,
}

impl MatchAllQuery {
    /// Create a match_all query
    pub fn new() -> Self {
        MatchAllQuery::default()
    }

    /// Set the boost value assigned to every matched document
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Render for MatchAllQuery {
    fn render(&self) -> Map<String, Value> {
        let mut body = Map::new();
        insert_nonempty(&mut body, "boost", self.boost);
        wrap("match_all", body)
    }
}

/// Query matching no documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchNoneQuery;

impl MatchNoneQuery {
    /// Create a match_none query
    pub fn new() -> Self {
        MatchNoneQuery
    }
}

impl Render for MatchNoneQuery {
    fn render(&self) -> Map<String, Value> {
        wrap("match_none", Map::new())
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
    fn test_match_minimal() {
        let q = MatchQuery::new("title").query("search text");
        assert_eq!(
            rendered(&q),
            json!({ "match": { "title": { "query": "search text" } } })
        );
    }

    #[test]
    fn test_match_unset_query_is_absent() {
        let q = MatchQuery::new("title");
        assert_eq!(rendered(&q), json!({ "match": { "title": {} } }));
    }

    #[test]
    fn test_match_with_options() {
        let q = MatchQuery::new("author")
            .query("some guy")
            .analyzer("standard")
            .fuzziness("AUTO")
            .operator(MatchOperator::And)
            .zero_terms_query(ZeroTerms::All);
        assert_eq!(
            rendered(&q),
            json!({
                "match": {
                    "author": {
                        "query": "some guy",
                        "analyzer": "standard",
                        "fuzziness": "AUTO",
                        "operator": "and",
                        "zero_terms_query": "all"
                    }
                }
            })
        );
    }

    #[test]
    fn test_match_explicit_false_booleans_render() {
        // Booleans have no empty sentinel: false is a real wire value.
        let q = MatchQuery::new("title").query("q").lenient(false).fuzzy_transpositions(false);
        assert_eq!(
            rendered(&q),
            json!({
                "match": {
                    "title": {
                        "query": "q",
                        "lenient": false,
                        "fuzzy_transpositions": false
                    }
                }
            })
        );
    }

    #[test]
    fn test_match_phrase_kinds() {
        let q = MatchQuery::phrase("title").query("a phrase").slop(2);
        assert_eq!(
            rendered(&q),
            json!({ "match_phrase": { "title": { "query": "a phrase", "slop": 2 } } })
        );

        let q = MatchQuery::phrase_prefix("title").query("a pre");
        assert_eq!(
            rendered(&q),
            json!({ "match_phrase_prefix": { "title": { "query": "a pre" } } })
        );
    }

    #[test]
    fn test_match_all() {
        assert_eq!(rendered(&MatchAllQuery::new()), json!({ "match_all": {} }));
        assert_eq!(
            rendered(&MatchAllQuery::new().boost(1.2)),
            json!({ "match_all": { "boost": 1.2 } })
        );
    }

    #[test]
    fn test_match_none() {
        assert_eq!(rendered(&MatchNoneQuery::new()), json!({ "match_none": {} }));
    }

    #[test]
    fn test_operator_tokens_round_trip() {
        for op in [MatchOperator::Or, MatchOperator::And] {
            assert_eq!(op.as_str().parse::<MatchOperator>().unwrap(), op);
        }
        assert!("xor".parse::<MatchOperator>().is_err());
    }

    #[test]
    fn test_zero_terms_tokens_round_trip() {
        for z in [ZeroTerms::None, ZeroTerms::All] {
            assert_eq!(z.as_str().parse::<ZeroTerms>().unwrap(), z);
        }
        assert!("some".parse::<ZeroTerms>().is_err());
    }
}
