// tests/evaluator_tests.rs

use rowfilter::{FilterExpression, Record, Value, build, evaluate};
use rstest::rstest;
use serde_json::json;
use std::{borrow::Cow, cell::RefCell, collections::HashMap};

fn filter(input: &str) -> FilterExpression {
    build(input).unwrap_or_else(|e| panic!("failed to build {input:?}: {e}"))
}

fn json_object(pairs: Vec<(&str, Value)>) -> Value {
    let mut map = HashMap::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v);
    }
    Value::Object(map)
}

// ============================================================================
// Ordering
// ============================================================================

#[rstest]
#[case("field<=1", 0, true)]
#[case("field<=1", 1, true)]
#[case("field<=1", 2, false)]
#[case("field>=1", 0, false)]
#[case("field>=1", 1, true)]
#[case("field>=1", 2, true)]
#[case("field<1", 0, true)]
#[case("field<1", 1, false)]
#[case("field>1", 1, false)]
#[case("field>1", 2, true)]
fn test_numeric_ordering(#[case] input: &str, #[case] value: i64, #[case] expected: bool) {
    let record = json!({ "field": value });
    assert_eq!(filter(input).matches(&record), expected);
}

#[test]
fn test_ordering_is_numeric_not_lexicographic() {
    // "10" < "9" as strings, but not as numbers
    assert!(filter("n>9").matches(&json!({"n": 10})));
    assert!(filter("n>9").matches(&json!({"n": "10"})));
    assert!(filter("price<=10.5").matches(&json!({"price": 10.25})));
}

#[test]
fn test_ordering_falls_back_to_strings() {
    assert!(filter("name<bob").matches(&json!({"name": "alice"})));
    assert!(!filter("name<bob").matches(&json!({"name": "carol"})));
    // Only one side is numeric
    assert!(filter("code>10").matches(&json!({"code": "9x"})));
}

// ============================================================================
// Equality and null handling
// ============================================================================

#[test]
fn test_compare_null() {
    let record = json!({"field2": null, "field3": "null"});

    assert!(filter("field2==").matches(&record));
    assert!(!filter("field2!=").matches(&record));
    assert!(filter("field3==null").matches(&record));
    assert!(!filter("field2==null").matches(&record));
}

#[test]
fn test_missing_field_compares_as_empty() {
    let record = json!({"present": "x"});
    assert!(filter("absent==").matches(&record));
    assert!(filter("absent!=x").matches(&record));
    assert!(!filter("absent==x").matches(&record));
}

#[test]
fn test_numbers_compare_by_their_text() {
    let record = json!({"int": 0, "float": 1.5, "flag": true});
    assert!(filter("int==0").matches(&record));
    assert!(filter("float==1.5").matches(&record));
    assert!(filter("flag==true").matches(&record));
    assert!(!filter("int==0.0").matches(&record));
}

#[rstest]
#[case("field1==test", true)]
#[case("field2==test", false)]
#[case("field3==test", false)]
#[case("field4==test", false)]
#[case("field1!=test", false)]
#[case("field2!=test", true)]
#[case("field3!=test", true)]
#[case("field4!=test", true)]
fn test_compare_string(#[case] input: &str, #[case] expected: bool) {
    let record = json!({
        "field1": "test",
        "field2": "testing",
        "field3": "sometest",
        "field4": "sometesting",
    });
    assert_eq!(filter(input).matches(&record), expected);
}

// ============================================================================
// Wildcards
// ============================================================================

#[rstest]
#[case("field1~~test", true)]
#[case("field2~~test", false)]
#[case("field3~~test", false)]
#[case("field4~~test", false)]
#[case("field2~~%test", false)]
#[case("field2~~test%", true)]
#[case("field2~~%test%", true)]
#[case("field3~~test%", false)]
#[case("field3~~%test", true)]
#[case("field3~~%test%", true)]
#[case("field4~~test%", false)]
#[case("field4~~%test", false)]
#[case("field4~~%test%", true)]
fn test_like(#[case] input: &str, #[case] expected: bool) {
    let record = json!({
        "field1": "test",
        "field2": "testing",
        "field3": "sometest",
        "field4": "sometesting",
    });
    assert_eq!(filter(input).matches(&record), expected);
}

#[rstest]
#[case("field1!~test", false)]
#[case("field2!~test", true)]
#[case("field2!~%test", true)]
#[case("field2!~test%", false)]
#[case("field2!~%test%", false)]
#[case("field3!~test%", true)]
#[case("field3!~%test", false)]
#[case("field4!~test%", true)]
#[case("field4!~~%test", true)]
#[case("field4!~%test%", false)]
fn test_not_like(#[case] input: &str, #[case] expected: bool) {
    let record = json!({
        "field1": "test",
        "field2": "testing",
        "field3": "sometest",
        "field4": "sometesting",
    });
    assert_eq!(filter(input).matches(&record), expected);
}

#[test]
fn test_like_inner_wildcard() {
    let test = json!({"field": "test"});
    let terrorist = json!({"field": "terrorist"});

    assert!(filter("field~~te%st").matches(&test));
    assert!(filter("field~~te%st").matches(&terrorist));
    assert!(!filter("field!~te%st").matches(&test));
    assert!(!filter("field!~te%st").matches(&terrorist));
}

#[test]
fn test_like_repeated_wildcards() {
    let record = json!({"field": "testtesttest"});
    assert!(filter("field~~%st%st").matches(&record));
    assert!(filter("field~~te%te%").matches(&record));
}

#[test]
fn test_like_treats_regex_characters_literally() {
    let record = json!({"file": "report.(final).csv"});
    assert!(filter("file~~%.(final).csv").matches(&record));
    assert!(!filter("file~~report_final%").matches(&record));
}

#[test]
fn test_not_like_on_missing_field() {
    // A missing field compares as the empty string
    let record = json!({});
    assert!(filter("field!~a%").matches(&record));
    assert!(filter("field~~%").matches(&record));
}

// ============================================================================
// Logical combinations
// ============================================================================

#[test]
fn test_compare_multi_and() {
    let expr = filter("field1==0&field2!=0");
    assert!(expr.matches(&json!({"field1": 0, "field2": 1})));
    assert!(!expr.matches(&json!({"field1": 0, "field2": 0})));
}

#[test]
fn test_compare_multi_or() {
    let expr = filter("field1==0|field2!=0");
    assert!(expr.matches(&json!({"field1": 0, "field2": 1})));
    assert!(expr.matches(&json!({"field1": 0, "field2": 0})));
    assert!(!expr.matches(&json!({"field1": 1, "field2": 0})));
}

#[rstest]
#[case("a==b&c==d|e==f")]
#[case("e==f|a==b&c==d")]
fn test_compound_precedence(#[case] input: &str) {
    let expr = filter(input);
    assert!(expr.matches(&json!({"a": "b", "c": "d", "e": "nope"})));
    assert!(!expr.matches(&json!({"a": "b", "c": "nope", "e": "nope"})));
    assert!(expr.matches(&json!({"a": "b", "c": "nope", "e": "f"})));
}

#[rstest]
#[case("g==h|e==f|a==b&c==d")]
#[case("a==b&c==d|g==h|e==f")]
fn test_compound_complex_or(#[case] input: &str) {
    let expr = filter(input);
    assert!(expr.matches(&json!({"a": "b", "c": "d", "e": "nope", "g": "nope"})));
    assert!(!expr.matches(&json!({"a": "b", "c": "nope", "e": "nope", "g": "nope"})));
    assert!(expr.matches(&json!({"a": "b", "c": "nope", "e": "f", "g": "nope"})));
    assert!(expr.matches(&json!({"a": "nope", "c": "nope", "e": "nope", "g": "h"})));
}

#[test]
fn test_compound_complex_and() {
    let expr = filter("g==h|e==f&c==d&a==b");
    assert!(expr.matches(&json!({"a": "b", "c": "d", "e": "f", "g": "nope"})));
    assert!(!expr.matches(&json!({"a": "b", "c": "nope", "e": "nope", "g": "nope"})));
    assert!(!expr.matches(&json!({"a": "b", "c": "nope", "e": "f", "g": "nope"})));
    assert!(expr.matches(&json!({"a": "nope", "c": "nope", "e": "nope", "g": "h"})));
}

#[test]
fn test_compound_complex_and_reverse() {
    let expr = filter("c==d&a==b&g==h|e==f");
    assert!(expr.matches(&json!({"a": "b", "c": "d", "e": "f", "g": "nope"})));
    assert!(!expr.matches(&json!({"a": "b", "c": "nope", "e": "nope", "g": "nope"})));
    assert!(expr.matches(&json!({"a": "b", "c": "nope", "e": "f", "g": "nope"})));
    assert!(!expr.matches(&json!({"a": "b", "c": "d", "e": "nope", "g": "nope"})));
    assert!(!expr.matches(&json!({"a": "nope", "c": "nope", "e": "nope", "g": "h"})));
}

// ============================================================================
// Short-circuit evaluation
// ============================================================================

/// Flat record that remembers which fields were looked up.
struct Tracked {
    text: Option<String>,
    fields: HashMap<String, Tracked>,
    visited: RefCell<Vec<String>>,
}

impl Tracked {
    fn leaf(text: &str) -> Self {
        Tracked {
            text: Some(text.to_string()),
            fields: HashMap::new(),
            visited: RefCell::new(Vec::new()),
        }
    }

    fn record(pairs: &[(&str, &str)]) -> Self {
        Tracked {
            text: None,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Tracked::leaf(v)))
                .collect(),
            visited: RefCell::new(Vec::new()),
        }
    }

    fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Record for Tracked {
    fn child(&self, segment: &str) -> Option<&Self> {
        self.visited.borrow_mut().push(segment.to_string());
        self.fields.get(segment)
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        self.text.as_deref().map(Cow::Borrowed)
    }
}

#[test]
fn test_and_skips_right_when_left_fails() {
    let record = Tracked::record(&[("a", "0"), ("b", "1")]);
    assert!(!filter("a==1&b==1").matches(&record));
    assert_eq!(record.visited(), vec!["a"]);
}

#[test]
fn test_or_skips_right_when_left_holds() {
    let record = Tracked::record(&[("a", "1"), ("b", "1")]);
    assert!(filter("a==1|b==1").matches(&record));
    assert_eq!(record.visited(), vec!["a"]);
}

#[test]
fn test_right_side_evaluated_when_needed() {
    let record = Tracked::record(&[("a", "1"), ("b", "1")]);
    assert!(filter("a==1&b==1").matches(&record));
    assert_eq!(record.visited(), vec!["a", "b"]);

    let record = Tracked::record(&[("a", "0"), ("b", "1")]);
    assert!(filter("a==1|b==1").matches(&record));
    assert_eq!(record.visited(), vec!["a", "b"]);
}

#[test]
fn test_or_stops_at_first_true_branch() {
    let record = Tracked::record(&[("a", "0"), ("b", "1"), ("c", "1"), ("d", "1")]);
    // (a & b) | c | d: a fails so b is skipped, c holds so d is skipped
    assert!(filter("a==1&b==1|c==1|d==1").matches(&record));
    assert_eq!(record.visited(), vec!["a", "c"]);
}

// ============================================================================
// Records and paths
// ============================================================================

#[test]
fn test_nested_paths() {
    let record = json!({
        "user": {"name": "Ada", "roles": ["admin", "dev"]},
        "meta": {"score": 42},
    });
    assert!(filter("user.name==Ada&meta.score>=40").matches(&record));
    assert!(filter("user.roles.0==admin").matches(&record));
    assert!(filter("user.roles.5==").matches(&record));
}

#[test]
fn test_custom_separator() {
    let record = json!({"user": {"name": "Ada"}});
    let expr = filter("user/name==Ada");
    assert!(expr.matches_with(&record, '/'));
    assert!(!expr.matches(&record));
}

#[test]
fn test_integral_floats_match_in_both_record_kinds() {
    let json = json!({"a": 1.0, "b": 2.5});
    let value = Value::from(json.clone());
    for input in ["a==1", "a>=1", "b==2.5", "a!=1.0"] {
        let expr = filter(input);
        assert_eq!(expr.matches(&json), expr.matches(&value), "{input}");
    }
    assert!(filter("a==1").matches(&json));
    assert!(filter("a==1").matches(&value));
}

#[test]
fn test_digit_separators_compare_as_strings() {
    // "1_000" is not a number, so this is a string comparison: "1" < "9"
    assert!(!filter("n>999").matches(&json!({"n": "1_000"})));
    assert!(filter("n>999").matches(&json!({"n": "1000"})));
}

#[test]
fn test_value_records() {
    let record = json_object(vec![
        ("status", Value::from("active")),
        ("age", Value::Integer(36)),
        ("ratio", Value::Float(0.5)),
        ("address", json_object(vec![("city", Value::from("Prague"))])),
        ("nickname", Value::Null),
    ]);

    assert!(filter("status==active&age>30").matches(&record));
    assert!(filter("ratio<1&address.city~~Pr%").matches(&record));
    assert!(filter("nickname==").matches(&record));
}

#[test]
fn test_filter_records() {
    let records = vec![
        json!({"id": 1, "status": "active"}),
        json!({"id": 2, "status": "archived"}),
        json!({"id": 3, "status": "active"}),
    ];
    let expr = filter("status==active");
    let ids: Vec<_> = expr
        .filter_records(&records)
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_evaluate_is_repeatable() {
    let expr = filter("a==0&b!=0");
    let record = json!({"a": 0, "b": 1});
    assert_eq!(evaluate(&expr, &record), evaluate(&expr, &record));
    assert!(evaluate(&expr, &record));
}

#[test]
fn test_shared_across_threads() {
    let expr = std::sync::Arc::new(filter("n>=5"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let expr = std::sync::Arc::clone(&expr);
            std::thread::spawn(move || expr.matches(&json!({"n": i * 2})))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![false, false, false, true]);
}
