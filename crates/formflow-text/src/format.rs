//! Field-name and value rendering shared by the encoder and narration.

use formflow_core::path::{get_field_name, get_parent_path, is_index_segment};
use serde_json::Value;

/// Human label for the last segment of `path`.
///
/// camelCase boundaries become spaces and the first letter is capitalized.
/// Underscores are left alone, so `mood_atmosphere` renders as
/// `Mood_atmosphere`.
pub fn format_field_name(path: &str) -> String {
    let name = get_field_name(path);
    let mut spaced = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a value for prose. `None` stands for an absent value.
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "empty".to_string(),
        Some(Value::Bool(true)) => "enabled".to_string(),
        Some(Value::Bool(false)) => "disabled".to_string(),
        Some(Value::String(s)) => format!("\"{s}\""),
        Some(Value::Array(items)) => format!("[{} items]", items.len()),
        Some(Value::Object(_)) => "{...}".to_string(),
        Some(Value::Number(n)) => n.to_string(),
    }
}

/// Split an element path into its array path and index.
///
/// `("objects.2", Some(2))` and `("objects", Some(2))` both give
/// `("objects", Some(2))`; `("objects.2", None)` reads the index from the
/// trailing segment.
pub(crate) fn element_of(path: &str, index: Option<usize>) -> (&str, Option<usize>) {
    let last = get_field_name(path);
    let trailing = if is_index_segment(last) {
        last.parse::<usize>().ok()
    } else {
        None
    };
    match (index, trailing) {
        (Some(index), Some(trailing)) if index == trailing => (get_parent_path(path), Some(index)),
        (Some(index), _) => (path, Some(index)),
        (None, Some(trailing)) => (get_parent_path(path), Some(trailing)),
        (None, None) => (path, None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_names() {
        assert_eq!(format_field_name("backgroundSetting"), "Background Setting");
        assert_eq!(format_field_name("lighting.shadowSoftness"), "Shadow Softness");
        assert_eq!(format_field_name("mood_atmosphere"), "Mood_atmosphere");
        assert_eq!(format_field_name("URL"), "U R L");
        assert_eq!(format_field_name(""), "");
    }

    #[test]
    fn values() {
        assert_eq!(format_value(None), "empty");
        assert_eq!(format_value(Some(&Value::Null)), "empty");
        assert_eq!(format_value(Some(&json!(true))), "enabled");
        assert_eq!(format_value(Some(&json!(false))), "disabled");
        assert_eq!(format_value(Some(&json!("forest"))), "\"forest\"");
        assert_eq!(format_value(Some(&json!([1, 2, 3]))), "[3 items]");
        assert_eq!(format_value(Some(&json!({"a": 1}))), "{...}");
        assert_eq!(format_value(Some(&json!(2.5))), "2.5");
    }

    #[test]
    fn element_paths() {
        assert_eq!(element_of("objects.2", Some(2)), ("objects", Some(2)));
        assert_eq!(element_of("objects", Some(2)), ("objects", Some(2)));
        assert_eq!(element_of("objects.2", None), ("objects", Some(2)));
        assert_eq!(element_of("objects", None), ("objects", None));
        assert_eq!(element_of("grid.1", Some(4)), ("grid.1", Some(4)));
    }
}
