//! Structural diff of two JSON documents.
//!
//! Walks both values together and records every location that was added,
//! removed or changed, addressed by [`JsonPath`]. Objects are compared key
//! by key and arrays index by index; a location whose shape differs between
//! the two sides (for example `null` versus `{}`) is a single change.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::{DiffError, DiffResult, Side};
use crate::json_path::JsonPath;

/// Options for [`diff_json_semantic`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonDiffOptions {
    /// Compare arrays holding only primitives as multisets, ignoring order.
    pub arrays_order_insensitive: bool,
}

/// A location whose value differs between the two documents.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JsonChange {
    pub path: JsonPath,
    pub before: Value,
    pub after: Value,
}

/// The result of comparing two JSON documents.
///
/// Each list is sorted by path, and a path appears in at most one list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct JsonDiff {
    pub added: Vec<JsonPath>,
    pub removed: Vec<JsonPath>,
    pub changed: Vec<JsonChange>,
}

impl JsonDiff {
    /// Returns `true` if the documents are equivalent.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of recorded locations.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// Number of paths present only on the right.
    pub fn additions(&self) -> usize {
        self.added.len()
    }

    /// Number of paths present only on the left.
    pub fn removals(&self) -> usize {
        self.removed.len()
    }

    /// Number of paths whose value changed.
    pub fn modifications(&self) -> usize {
        self.changed.len()
    }
}

/// Two decoded JSON documents ready to be compared.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonPair {
    pub left: Value,
    pub right: Value,
}

/// Decode both sides of a comparison.
///
/// The left side is decoded first; the first failure is returned and no
/// partial pair is produced.
pub fn parse_json_pair(left_text: &str, right_text: &str) -> DiffResult<JsonPair> {
    let left = parse_side(Side::Left, left_text)?;
    let right = parse_side(Side::Right, right_text)?;
    Ok(JsonPair { left, right })
}

fn parse_side(side: Side, text: &str) -> DiffResult<Value> {
    serde_json::from_str(text).map_err(|e| {
        debug!(%side, line = e.line(), column = e.column(), "rejected JSON input");
        DiffError::invalid_json(side, &e)
    })
}

/// Compare two JSON values and collect added, removed and changed paths.
pub fn diff_json_semantic(left: &Value, right: &Value, options: &JsonDiffOptions) -> JsonDiff {
    let mut diff = JsonDiff::default();
    diff_values(left, right, &JsonPath::root(), options, &mut diff);

    diff.added.sort();
    diff.removed.sort();
    diff.changed.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        changed = diff.changed.len(),
        "json diff computed"
    );

    diff
}

fn diff_values(
    left: &Value,
    right: &Value,
    path: &JsonPath,
    options: &JsonDiffOptions,
    out: &mut JsonDiff,
) {
    match (left, right) {
        (Value::Array(l), Value::Array(r)) => {
            if options.arrays_order_insensitive && primitive_multisets_equal(l, r) {
                return;
            }
            for index in 0..l.len().max(r.len()) {
                let next = path.index(index);
                match (l.get(index), r.get(index)) {
                    (Some(a), Some(b)) => diff_values(a, b, &next, options, out),
                    (Some(_), None) => out.removed.push(next),
                    (None, Some(_)) => out.added.push(next),
                    (None, None) => {}
                }
            }
        }
        (Value::Object(l), Value::Object(r)) => {
            for (key, a) in l {
                let next = path.key(key);
                match r.get(key) {
                    Some(b) => diff_values(a, b, &next, options, out),
                    None => out.removed.push(next),
                }
            }
            for key in r.keys() {
                if !l.contains_key(key) {
                    out.added.push(path.key(key));
                }
            }
        }
        _ => {
            if !leaves_equal(left, right) {
                out.changed.push(JsonChange {
                    path: path.clone(),
                    before: left.clone(),
                    after: right.clone(),
                });
            }
        }
    }
}

/// Equality for locations that are not a matching pair of containers.
///
/// Unlike multiset keys, `-0` and `0` are distinct here.
fn leaves_equal(left: &Value, right: &Value) -> bool {
    match (Primitive::of(left), Primitive::of(right)) {
        (Some(a), Some(b)) => a == b && is_negative_zero(left) == is_negative_zero(right),
        _ => false,
    }
}

fn is_negative_zero(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|f| f == 0.0 && f.is_sign_negative())
}

/// Multiset equality; `false` whenever either array holds a container.
fn primitive_multisets_equal(left: &[Value], right: &[Value]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let Some(left) = left.iter().map(Primitive::of).collect::<Option<Vec<_>>>() else {
        return false;
    };
    let Some(right) = right.iter().map(Primitive::of).collect::<Option<Vec<_>>>() else {
        return false;
    };

    let mut counts: HashMap<Primitive<'_>, usize> = HashMap::new();
    for value in left {
        *counts.entry(value).or_insert(0) += 1;
    }
    for value in right {
        match counts.get_mut(&value) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }
    counts.values().all(|&count| count == 0)
}

/// Hashable identity of a JSON primitive.
///
/// Numbers are keyed by numeric value, so `1` and `1.0` are the same
/// primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Primitive<'a> {
    Null,
    Bool(bool),
    Int(i128),
    Float(u64),
    Str(&'a str),
}

impl<'a> Primitive<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(Primitive::Null),
            Value::Bool(b) => Some(Primitive::Bool(*b)),
            Value::Number(n) => Some(Primitive::number(n)),
            Value::String(s) => Some(Primitive::Str(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return Primitive::Int(i128::from(i));
        }
        if let Some(u) = n.as_u64() {
            return Primitive::Int(i128::from(u));
        }
        let f = n.as_f64().unwrap_or(f64::NAN);
        // Integral floats inside the u64/i64 span share the integer key.
        if f.fract() == 0.0 && f >= -9.223_372_036_854_776e18 && f < 1.844_674_407_370_955_2e19 {
            Primitive::Int(f as i128)
        } else {
            Primitive::Float(f.to_bits())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn diff(left: Value, right: Value) -> JsonDiff {
        diff_json_semantic(&left, &right, &JsonDiffOptions::default())
    }

    fn unordered(left: Value, right: Value) -> JsonDiff {
        diff_json_semantic(
            &left,
            &right,
            &JsonDiffOptions {
                arrays_order_insensitive: true,
            },
        )
    }

    fn strs(paths: &[JsonPath]) -> Vec<&str> {
        paths.iter().map(JsonPath::as_str).collect()
    }

    #[test]
    fn tracks_added_removed_and_changed() {
        let pair = parse_json_pair(r#"{"a":1,"b":2}"#, r#"{"a":3,"c":2}"#).unwrap();
        let result = diff_json_semantic(&pair.left, &pair.right, &JsonDiffOptions::default());

        assert_eq!(
            result.changed,
            vec![JsonChange {
                path: JsonPath::root().key("a"),
                before: json!(1),
                after: json!(3),
            }]
        );
        assert_eq!(strs(&result.removed), vec!["$.b"]);
        assert_eq!(strs(&result.added), vec!["$.c"]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn identical_documents_empty_diff() {
        let doc = json!({"a": [1, {"b": null}], "c": "x"});
        assert!(diff(doc.clone(), doc).is_empty());
    }

    #[test]
    fn empty_containers_are_equal() {
        assert!(diff(json!({}), json!({})).is_empty());
        assert!(diff(json!([]), json!([])).is_empty());
    }

    #[test]
    fn null_versus_object_is_one_change() {
        let result = diff(json!({"x": null}), json!({"x": {}}));
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].path, "$.x");
        assert_eq!(result.changed[0].before, json!(null));
        assert_eq!(result.changed[0].after, json!({}));
    }

    #[test]
    fn array_versus_object_is_one_change() {
        let result = diff(json!({"x": [1]}), json!({"x": {"0": 1}}));
        assert_eq!(result.len(), 1);
        assert_eq!(result.changed[0].path, "$.x");
    }

    #[test]
    fn root_primitive_change() {
        let result = diff(json!(1), json!("1"));
        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].path, "$");
    }

    #[test]
    fn removed_subtree_is_not_descended() {
        let result = diff(json!({"a": {"b": {"c": 1}}}), json!({}));
        assert_eq!(strs(&result.removed), vec!["$.a"]);
        assert!(result.changed.is_empty());
    }

    #[test]
    fn array_length_changes() {
        let longer = diff(json!([1, 2]), json!([1, 2, 3, 4]));
        assert_eq!(strs(&longer.added), vec!["$[2]", "$[3]"]);

        let shorter = diff(json!([1, 2, 3]), json!([1]));
        assert_eq!(strs(&shorter.removed), vec!["$[1]", "$[2]"]);
    }

    #[test]
    fn nested_paths_and_quoted_keys() {
        let result = diff(
            json!({"items": [{"display name": "a"}]}),
            json!({"items": [{"display name": "b"}]}),
        );
        assert_eq!(result.changed[0].path, r#"$.items[0]["display name"]"#);
    }

    #[test]
    fn order_sensitive_by_default() {
        let result = diff(json!({"tags": ["a", "b"]}), json!({"tags": ["b", "a"]}));
        assert_eq!(result.changed.len(), 2);
    }

    #[test]
    fn order_insensitive_primitive_arrays() {
        assert!(unordered(json!({"tags": ["a", "b"]}), json!({"tags": ["b", "a"]})).is_empty());
        assert!(unordered(json!({"a": [1, 2, 2]}), json!({"a": [2, 1, 2]})).is_empty());
    }

    #[test]
    fn multiset_respects_duplicate_counts() {
        let result = unordered(json!({"a": [1, 1, 2]}), json!({"a": [1, 2, 2]}));
        assert!(!result.changed.is_empty());
        assert!(result.changed.iter().all(|c| c.path.as_str().starts_with("$.a")));
    }

    #[test]
    fn order_insensitive_ignores_arrays_with_containers() {
        let result = unordered(json!([{"a": 1}, 2]), json!([2, {"a": 1}]));
        assert_eq!(result.changed.len(), 2);
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(diff(json!(1), json!(1.0)).is_empty());
        assert!(unordered(json!([1.0, 2]), json!([2, 1])).is_empty());
        assert_eq!(diff(json!(1.5), json!(1)).changed.len(), 1);
    }

    #[test]
    fn negative_zero_is_a_change() {
        let pair = parse_json_pair(r#"{"a":-0}"#, r#"{"a":0}"#).unwrap();
        let result = diff_json_semantic(&pair.left, &pair.right, &JsonDiffOptions::default());
        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].path, "$.a");

        let same = parse_json_pair("-0", "-0.0").unwrap();
        assert!(diff(same.left, same.right).is_empty());
    }

    #[test]
    fn negative_zero_matches_zero_in_multisets() {
        let pair = parse_json_pair("[-0, 1]", "[1, 0]").unwrap();
        assert!(unordered(pair.left, pair.right).is_empty());
    }

    #[test]
    fn primitive_kinds_never_coerce() {
        assert_eq!(diff(json!(0), json!(false)).changed.len(), 1);
        assert_eq!(diff(json!(null), json!(false)).changed.len(), 1);
        assert_eq!(diff(json!(""), json!(null)).changed.len(), 1);
    }

    #[test]
    fn output_is_sorted() {
        let result = diff(
            json!({"z": 1, "b": 1, "m": [1, 2]}),
            json!({"a": 1, "y": 2, "m": [1]}),
        );
        assert_eq!(strs(&result.added), vec!["$.a", "$.y"]);
        assert_eq!(strs(&result.removed), vec!["$.b", "$.m[1]", "$.z"]);
    }

    #[test]
    fn parse_failure_reports_side_and_position() {
        let err = parse_json_pair("{}", "{\n  \"a\": }").unwrap_err();
        match err {
            DiffError::InvalidJson {
                side, line, column, ..
            } => {
                assert_eq!(side, Side::Right);
                assert_eq!(line, 2);
                assert!(column >= 1);
            }
        }
    }

    #[test]
    fn parse_failure_on_left_wins() {
        let err = parse_json_pair("nope", "also nope").unwrap_err();
        assert_eq!(err.side(), Side::Left);
    }

    #[test]
    fn result_serializes_with_plain_paths() {
        let result = diff(json!({"a": 1}), json!({"a": 2, "b": true}));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "added": ["$.b"],
                "removed": [],
                "changed": [{"path": "$.a", "before": 1, "after": 2}]
            })
        );
    }
}
