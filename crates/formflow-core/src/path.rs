//! Dotted-path addressing inside nested JSON values.
//!
//! A path such as `"a.b.2.c"` is split on `.`; a segment made entirely of
//! ASCII digits may address an array index. The empty path addresses the
//! root itself.
//!
//! The copy-returning functions ([`set_value`], [`delete_path`]) never touch
//! their input. The `_mut` variants edit in place and exist for callers that
//! already own a private copy.

use serde_json::{Map, Value};

/// How far past the end of an array an index may reach before the key is
/// treated as an object key instead.
pub const MAX_INDEX_GAP: usize = 1024;

/// True when the segment is non-empty and all ASCII digits.
pub fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn parse_index(segment: &str) -> Option<usize> {
    if is_index_segment(segment) {
        segment.parse().ok()
    } else {
        None
    }
}

fn child<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(key),
        Value::Array(items) => parse_index(key).and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(key),
        Value::Array(items) => parse_index(key).and_then(|i| items.get_mut(i)),
        _ => None,
    }
}

/// Read the value at `path`.
///
/// Returns `None` when any segment is missing or an intermediate node is not
/// a container (including `null`). An explicit `null` leaf is `Some(Null)`.
pub fn get_value<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, child)
}

pub fn get_value_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, child_mut)
}

pub fn has_path(root: &Value, path: &str) -> bool {
    get_value(root, path).is_some()
}

/// Return a copy of `root` with `value` written at `path`.
///
/// Missing intermediate containers are created: an array when the segment
/// that addresses into them is all digits, an object otherwise.
pub fn set_value(root: &Value, path: &str, value: Value) -> Value {
    let mut out = root.clone();
    set_value_mut(&mut out, path, value);
    out
}

/// In-place form of [`set_value`].
pub fn set_value_mut(root: &mut Value, path: &str, value: Value) {
    let mut current = root;
    if !path.is_empty() {
        for key in path.split('.') {
            current = entry(current, key);
        }
    }
    *current = value;
}

/// Slot for `key` inside `node`, reshaping `node` into a container if needed.
///
/// - scalars and `null` become an empty array (index key) or object
/// - an array addressed by a non-index key is promoted to an object keyed by
///   index strings so no element is lost
/// - an index past the end pads the array with `null`, up to
///   [`MAX_INDEX_GAP`] slots; a larger index is an object key
fn entry<'a>(node: &'a mut Value, key: &str) -> &'a mut Value {
    let len = node.as_array().map_or(0, Vec::len);
    let index = parse_index(key).filter(|&i| i <= len.saturating_add(MAX_INDEX_GAP));
    if !node.is_object() && !node.is_array() {
        *node = match index {
            Some(_) => Value::Array(Vec::new()),
            None => Value::Object(Map::new()),
        };
    } else if node.is_array() && index.is_none() {
        *node = promote(node.take());
    }

    match node {
        Value::Array(items) => {
            let index = index.unwrap_or(items.len());
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        Value::Object(map) => map.entry(key.to_string()).or_insert(Value::Null),
        _ => unreachable!("node was reshaped into a container"),
    }
}

fn promote(items: Value) -> Value {
    let Value::Array(items) = items else {
        return items;
    };
    let map = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (i.to_string(), item))
        .collect();
    Value::Object(map)
}

/// Return a copy of `root` with the final segment of `path` removed.
///
/// Objects lose the key; arrays have the index spliced out. A missing parent
/// or out-of-range index leaves the copy identical to `root`.
pub fn delete_path(root: &Value, path: &str) -> Value {
    let mut out = root.clone();
    delete_path_mut(&mut out, path);
    out
}

/// In-place form of [`delete_path`]; returns the removed value.
pub fn delete_path_mut(root: &mut Value, path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }
    let parent = get_value_mut(root, get_parent_path(path))?;
    let key = get_field_name(path);
    match parent {
        Value::Object(map) => map.remove(key),
        Value::Array(items) => {
            let index = parse_index(key)?;
            (index < items.len()).then(|| items.remove(index))
        }
        _ => None,
    }
}

/// Everything before the last `.`, or `""` for a single segment.
pub fn get_parent_path(path: &str) -> &str {
    path.rsplit_once('.').map_or("", |(parent, _)| parent)
}

/// The last segment of `path`.
pub fn get_field_name(path: &str) -> &str {
    path.rsplit_once('.').map_or(path, |(_, name)| name)
}

/// Join non-empty parts with `.`.
pub fn join_path<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn get_value_walks_objects_and_arrays() {
        let root = json!({"a": {"b": [10, {"c": "deep"}]}});
        assert_eq!(get_value(&root, "a.b.0"), Some(&json!(10)));
        assert_eq!(get_value(&root, "a.b.1.c"), Some(&json!("deep")));
        assert_eq!(get_value(&root, ""), Some(&root));
        assert_eq!(get_value(&root, "a.x.y"), None);
        assert_eq!(get_value(&root, "a.b.9"), None);
    }

    #[test]
    fn null_intermediate_is_undefined_but_null_leaf_is_present() {
        let root = json!({"a": null});
        assert_eq!(get_value(&root, "a"), Some(&Value::Null));
        assert_eq!(get_value(&root, "a.b"), None);
        assert!(has_path(&root, "a"));
        assert!(!has_path(&root, "a.b"));
    }

    #[test]
    fn single_segment_set() {
        let root = json!({"a": 1});
        assert_eq!(set_value(&root, "b", json!(2)), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn creates_missing_containers_by_next_segment() {
        let root = json!({});
        let out = set_value(&root, "list.0.name", json!("x"));
        assert_eq!(out, json!({"list": [{"name": "x"}]}));

        let out = set_value(&root, "settings.mode", json!(true));
        assert_eq!(out, json!({"settings": {"mode": true}}));
        assert_eq!(root, json!({}));
    }

    #[test]
    fn empty_path_replaces_root() {
        assert_eq!(set_value(&json!({"a": 1}), "", json!([1])), json!([1]));
    }

    #[test]
    fn index_past_end_pads_with_null() {
        let out = set_value(&json!({"a": [1]}), "a.3", json!(4));
        assert_eq!(out, json!({"a": [1, null, null, 4]}));
    }

    #[test]
    fn huge_index_becomes_object_key() {
        let root = json!({"list": [1]});
        let out = set_value(&root, "list.18446744073709551615", json!(2));
        assert_eq!(out, json!({"list": {"0": 1, "18446744073709551615": 2}}));
        assert_eq!(get_value(&out, "list.18446744073709551615"), Some(&json!(2)));

        let out = set_value(&root, "list.4000000000", json!("x"));
        assert_eq!(out, json!({"list": {"0": 1, "4000000000": "x"}}));
        assert_eq!(get_value(&out, "list.4000000000"), Some(&json!("x")));
    }

    #[test]
    fn padding_is_bounded_by_gap() {
        let out = set_value(&json!([]), &MAX_INDEX_GAP.to_string(), json!(true));
        assert_eq!(out.as_array().map(Vec::len), Some(MAX_INDEX_GAP + 1));

        let key = (MAX_INDEX_GAP + 1).to_string();
        let out = set_value(&json!(null), &key, json!(true));
        assert_eq!(out.get(&key), Some(&json!(true)));
        assert!(out.is_object());
    }

    #[test]
    fn named_key_promotes_array() {
        let out = set_value(&json!({"a": [1, 2]}), "a.extra", json!(true));
        assert_eq!(out, json!({"a": {"0": 1, "1": 2, "extra": true}}));
    }

    #[test]
    fn scalar_intermediate_is_replaced() {
        let out = set_value(&json!({"a": 5}), "a.b", json!(1));
        assert_eq!(out, json!({"a": {"b": 1}}));
    }

    #[test]
    fn set_leaves_input_untouched() {
        let root = json!({"a": {"b": 1}, "sibling": {"x": [1, 2]}});
        let before = root.clone();
        let out = set_value(&root, "a.b", json!(2));
        assert_eq!(root, before);
        assert_eq!(out["sibling"], before["sibling"]);
    }

    #[test]
    fn delete_object_key_and_array_index() {
        let root = json!({"a": {"b": 1, "c": 2}, "list": [1, 2, 3]});
        assert_eq!(
            delete_path(&root, "a.b"),
            json!({"a": {"c": 2}, "list": [1, 2, 3]})
        );
        assert_eq!(
            delete_path(&root, "list.1"),
            json!({"a": {"b": 1, "c": 2}, "list": [1, 3]})
        );
        assert_eq!(delete_path(&root, "list"), json!({"a": {"b": 1, "c": 2}}));
    }

    #[test]
    fn delete_with_missing_parent_is_noop() {
        let root = json!({"a": 1});
        assert_eq!(delete_path(&root, "x.y.z"), root);
        assert_eq!(delete_path(&root, "a.b"), root);
        let mut owned = root.clone();
        assert_eq!(delete_path_mut(&mut owned, "list.7"), None);
    }

    #[test]
    fn string_helpers() {
        assert_eq!(get_parent_path("a.b.c"), "a.b");
        assert_eq!(get_parent_path("a"), "");
        assert_eq!(get_field_name("a.b.c"), "c");
        assert_eq!(get_field_name("a"), "a");
        assert_eq!(join_path(["a", "", "b", "2"]), "a.b.2");
        assert_eq!(join_path(Vec::<String>::new()), "");
    }

    #[test]
    fn index_segment_detection() {
        assert!(is_index_segment("0"));
        assert!(is_index_segment("42"));
        assert!(!is_index_segment(""));
        assert!(!is_index_segment("+1"));
        assert!(!is_index_segment("a1"));
    }
}
