//! Machine events to prose.

use formflow_model::{FieldSchema, FieldType, Interaction, InteractionKind, Schema};
use serde_json::Value;

use crate::format::{element_of, format_field_name, format_value};

/// Describe one interaction as a sentence.
pub fn encode_interaction(interaction: &Interaction) -> String {
    let path = interaction.path.as_str();
    let field = format_field_name(path);
    let value = interaction.value.as_ref();
    match interaction.kind {
        InteractionKind::Change => {
            change_sentence(&field, interaction.previous_value.as_ref(), value)
        }
        InteractionKind::Focus => format!("Focused on {field}"),
        InteractionKind::Blur => format!("Left {field}"),
        InteractionKind::Submit => "Submitted form".to_string(),
        InteractionKind::Reset => "Reset form to initial values".to_string(),
        InteractionKind::ArrayPush => match value {
            Some(value) => format!("Added {} to {field}", format_value(Some(value))),
            None => format!("Added item to {field}"),
        },
        InteractionKind::ArrayPop => format!("Removed last item from {field}"),
        InteractionKind::ArrayInsert => {
            let item = value.map_or_else(|| "item".to_string(), |v| format_value(Some(v)));
            format!("Inserted {item} into {}", element_phrase(path, interaction.index()))
        }
        InteractionKind::ArrayRemove => {
            format!("Removed item from {}", element_phrase(path, interaction.index()))
        }
    }
}

/// `"Objects at objects[2]"`, or just `"Objects"` without an index.
fn element_phrase(path: &str, index: Option<usize>) -> String {
    let (array_path, index) = element_of(path, index);
    let field = format_field_name(array_path);
    match index {
        Some(index) => format!("{field} at {array_path}[{index}]"),
        None => field,
    }
}

fn change_sentence(field: &str, previous: Option<&Value>, value: Option<&Value>) -> String {
    match previous {
        None => format!("Set {field} to {}", format_value(value)),
        Some(previous) => format!(
            "Changed {field} from {} to {}",
            format_value(Some(previous)),
            format_value(value)
        ),
    }
}

/// Join several encoded interactions: `"A, B and C"`.
pub fn encode_interactions(interactions: &[Interaction]) -> String {
    let sentences: Vec<String> = interactions.iter().map(encode_interaction).collect();
    match sentences.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

/// Describe `data` field by field in schema declaration order.
///
/// Object fields list their properties one level deep, indented; array fields
/// report an item count; everything else reports its formatted value.
pub fn encode_state(data: &Value, schema: &Schema) -> String {
    let mut lines = Vec::new();
    for (key, field) in schema.iter() {
        describe_field(&mut lines, key, field, data.get(key), 0);
    }
    lines.join("\n")
}

fn describe_field(
    lines: &mut Vec<String>,
    key: &str,
    field: &FieldSchema,
    value: Option<&Value>,
    depth: usize,
) {
    let indent = "  ".repeat(depth);
    let label = field
        .label
        .clone()
        .unwrap_or_else(|| format_field_name(key));
    match field.field_type {
        FieldType::Object if depth == 0 && !field.properties.is_empty() => {
            lines.push(format!("{indent}{label}:"));
            for (child_key, child) in field.properties.iter() {
                let child_value = value.and_then(|v| v.get(child_key));
                describe_field(lines, child_key, child, child_value, depth + 1);
            }
        }
        FieldType::Array => {
            let count = value.and_then(Value::as_array).map_or(0, Vec::len);
            lines.push(format!("{indent}{label}: {count} items"));
        }
        _ => lines.push(format!("{indent}{label}: {}", format_value(value))),
    }
}

/// Describe the change at `path` between two values; empty when equal.
pub fn describe_delta(before: Option<&Value>, after: Option<&Value>, path: &str) -> String {
    if before == after {
        return String::new();
    }
    let field = format_field_name(path);
    match (before, after) {
        (Some(b), Some(a)) if is_composite(b) && is_composite(a) => format!("Updated {field}"),
        _ => format!(
            "Changed {field} from {} to {}",
            format_value(before),
            format_value(after)
        ),
    }
}

fn is_composite(value: &Value) -> bool {
    value.is_object() || value.is_array()
}
