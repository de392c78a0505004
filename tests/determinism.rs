//! Determinism and presence tests
//!
//! Validates the core contract of the rendering layer:
//! - rendering is idempotent and never mutates the rendered entity
//! - a field that was never set leaves no key in the output
//! - append-style setters preserve call order in rendered sequences

use std::time::Duration;

use oquery::{
    BoolQuery, FieldSort, MatchQuery, MetricAgg, MultiMatchQuery, RandomScoreFunction, RangeQuery,
    Render, Script, SearchRequest, SortOrder, TermQuery,
};
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Test Helpers
// ============================================================================

fn complex_request() -> SearchRequest {
    SearchRequest::new()
        .query(
            BoolQuery::new()
                .must(RangeQuery::new("date").gt("2020").lte("now"))
                .should(MatchQuery::new("title").query("rust"))
                .boost(1.5),
        )
        .agg(MetricAgg::sum("total", "score"))
        .sort(FieldSort::new("date").order(SortOrder::Desc))
        .size(10)
        .timeout(Duration::from_secs(5))
        .script_field(Script::new("twice").source("doc['n'].value * 2"))
}

// ============================================================================
// Idempotence Tests
// ============================================================================

/// Rendering twice without intervening mutation yields deep-equal mappings
#[test]
fn test_render_is_idempotent() {
    let req = complex_request();
    assert_eq!(req.render(), req.render());
}

/// Rendering does not mutate the rendered entity
#[test]
fn test_render_does_not_mutate() {
    let req = complex_request();
    let before = req.clone();
    let _ = req.render();
    assert_eq!(req, before);
}

/// Repeated renders of a shared tree agree across many calls
#[test]
fn test_render_is_stable_across_many_calls() {
    let req = complex_request();
    let first = req.render();
    for _ in 0..10 {
        assert_eq!(req.render(), first);
    }
}

// ============================================================================
// Presence Tests
// ============================================================================

/// Never-set optional fields leave no key anywhere in the output
#[test]
fn test_unset_fields_leave_no_keys() {
    let body = Value::Object(
        SearchRequest::new()
            .query(BoolQuery::new().must(TermQuery::new("user", "kimchy")))
            .render(),
    );
    assert_eq!(
        body,
        json!({
            "query": {
                "bool": { "must": [{ "term": { "user": { "value": "kimchy" } } }] }
            }
        })
    );
}

/// Zero-valued numeric options render as if unset
#[test]
fn test_zero_numeric_options_are_omitted() {
    let q = Value::Object(
        BoolQuery::new()
            .must(TermQuery::new("f", "v").boost(0.0))
            .minimum_should_match(0)
            .boost(0.0)
            .render(),
    );
    assert_eq!(
        q,
        json!({ "bool": { "must": [{ "term": { "f": { "value": "v" } } }] } })
    );

    let mm = Value::Object(MultiMatchQuery::new().query("q").tie_breaker(0.0).render());
    assert_eq!(mm, json!({ "multi_match": { "query": "q" } }));
}

/// Presence-carrying options render their zero values
#[test]
fn test_presence_carrying_options_render_zero() {
    let f = Value::Object(RandomScoreFunction::new().seed(0).render());
    assert_eq!(f, json!({ "random_score": { "seed": 0 } }));

    let req = Value::Object(SearchRequest::new().from(0).explain(false).render());
    assert_eq!(req, json!({ "from": 0, "explain": false }));

    let m = Value::Object(MatchQuery::new("t").query("q").lenient(false).render());
    assert_eq!(
        m,
        json!({ "match": { "t": { "query": "q", "lenient": false } } })
    );
}

// ============================================================================
// Accumulation Order Tests
// ============================================================================

/// Role collections preserve append order across repeated calls
#[test]
fn test_bool_roles_preserve_append_order() {
    let q = Value::Object(
        BoolQuery::new()
            .must(TermQuery::new("a", 1))
            .should(TermQuery::new("x", 1))
            .must(TermQuery::new("b", 2))
            .should(TermQuery::new("y", 2))
            .render(),
    );
    assert_eq!(
        q,
        json!({
            "bool": {
                "must": [
                    { "term": { "a": { "value": 1 } } },
                    { "term": { "b": { "value": 2 } } }
                ],
                "should": [
                    { "term": { "x": { "value": 1 } } },
                    { "term": { "y": { "value": 2 } } }
                ]
            }
        })
    );
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Sort entries of any kind render in exactly the order appended
    #[test]
    fn prop_sort_append_preserves_order(
        entries in proptest::collection::vec(("[a-z]{1,8}", any::<bool>()), 1..8)
    ) {
        let mut req = SearchRequest::new();
        let mut expected = Vec::new();
        for (field, raw) in &entries {
            if *raw {
                req = req.sort_raw(field.clone());
                expected.push(json!(field));
            } else {
                let entry = FieldSort::new(field.clone()).order(SortOrder::Asc);
                req = req.sort(entry.clone());
                expected.push(oquery::Sort::from(entry).to_value());
            }
        }
        let body = req.render();
        prop_assert_eq!(body.get("sort").cloned(), Some(Value::Array(expected)));
    }

    /// Must clauses render in exactly the order appended
    #[test]
    fn prop_must_append_preserves_order(
        fields in proptest::collection::vec("[a-z]{1,8}", 1..8)
    ) {
        let mut q = BoolQuery::new();
        let mut expected = Vec::new();
        for (i, field) in fields.iter().enumerate() {
            let term = TermQuery::new(field.clone(), i as i64);
            q = q.must(term.clone());
            expected.push(Value::Object(term.render()));
        }
        let body = q.render();
        let bool_body = body.get("bool").and_then(Value::as_object).unwrap();
        prop_assert_eq!(bool_body.get("must").cloned(), Some(Value::Array(expected)));
    }

    /// Rendering randomized requests is idempotent
    #[test]
    fn prop_render_is_idempotent(
        size in proptest::option::of(0u64..100),
        from in proptest::option::of(0u64..100),
        explain in proptest::option::of(any::<bool>()),
        field in "[a-z]{1,8}",
    ) {
        let mut req = SearchRequest::new().query(TermQuery::new(field, "v"));
        if let Some(size) = size {
            req = req.size(size);
        }
        if let Some(from) = from {
            req = req.from(from);
        }
        if let Some(explain) = explain {
            req = req.explain(explain);
        }
        prop_assert_eq!(req.render(), req.render());
    }

    /// Clearing the sort list always removes the sort key
    #[test]
    fn prop_clear_sort_removes_key(
        fields in proptest::collection::vec("[a-z]{1,8}", 0..6)
    ) {
        let mut req = SearchRequest::new();
        for field in &fields {
            req = req.sort(FieldSort::new(field).order(SortOrder::Desc));
        }
        let req = req.clear_sort();
        prop_assert!(!req.render().contains_key("sort"));
    }
}
