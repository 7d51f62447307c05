//! Describe dispatched actions in prose.
//!
//! Actions that correspond to a UI event are converted to an [`Interaction`]
//! and rendered by the encoder, so a decoded sentence and its narration use
//! the same wording. The rest get a fixed sentence.

use formflow_core::path::get_value;
use formflow_model::{Action, Interaction, InteractionKind};
use serde_json::Value;

use crate::encoder::encode_interaction;
use crate::format::format_field_name;

/// The interaction an action stands for, given the data it was applied to.
///
/// Returns `None` for actions with no interaction counterpart (undo, redo,
/// wholesale replacement, error bookkeeping, moves and unknown actions).
pub fn interaction_for(action: &Action, before: &Value) -> Option<Interaction> {
    let interaction = match action {
        Action::SetField { path, value } => {
            let change = Interaction::change(path.as_str(), value.clone());
            match get_value(before, path) {
                Some(previous) => change.with_previous(previous.clone()),
                None => change,
            }
        }
        Action::Reset => Interaction::new(InteractionKind::Reset, ""),
        Action::TouchField { path } => Interaction::new(InteractionKind::Blur, path.as_str()),
        Action::ArrayPush { path, value } => {
            Interaction::new(InteractionKind::ArrayPush, path.as_str()).with_value(value.clone())
        }
        Action::ArrayPop { path } => {
            let pop = Interaction::new(InteractionKind::ArrayPop, path.as_str());
            match last_item(before, path) {
                Some(last) => pop.with_previous(last.clone()),
                None => pop,
            }
        }
        Action::ArrayInsert { path, index, value } => {
            Interaction::new(InteractionKind::ArrayInsert, path.as_str())
                .with_value(value.clone())
                .with_index(*index)
        }
        Action::ArrayRemove { path, index } => {
            let remove =
                Interaction::new(InteractionKind::ArrayRemove, path.as_str()).with_index(*index);
            match item_at(before, path, *index) {
                Some(item) => remove.with_previous(item.clone()),
                None => remove,
            }
        }
        Action::SetData { .. }
        | Action::Undo
        | Action::Redo
        | Action::SetError { .. }
        | Action::ClearError { .. }
        | Action::ArrayMove { .. }
        | Action::Unknown => return None,
    };
    Some(interaction)
}

/// One sentence describing `action` as applied to `before`.
pub fn describe_action(action: &Action, before: &Value) -> String {
    if let Some(interaction) = interaction_for(action, before) {
        return encode_interaction(&interaction);
    }
    match action {
        Action::Undo => "Undid last change".to_string(),
        Action::Redo => "Redid last change".to_string(),
        Action::SetData { .. } => "Replaced all data".to_string(),
        Action::SetError { path, error } => {
            format!("Flagged {}: {error}", format_field_name(path))
        }
        Action::ClearError { path } => format!("Cleared error on {}", format_field_name(path)),
        Action::ArrayMove { path, from, to } => format!(
            "Moved item in {} from {path}[{from}] to {path}[{to}]",
            format_field_name(path)
        ),
        _ => "Ignored unknown action".to_string(),
    }
}

fn last_item<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    get_value(root, path)?.as_array()?.last()
}

fn item_at<'a>(root: &'a Value, path: &str, index: usize) -> Option<&'a Value> {
    get_value(root, path)?.as_array()?.get(index)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn before() -> Value {
        json!({"background": "city", "objects": ["tree", "rock"], "lighting": {"shadows": 1}})
    }

    #[test]
    fn set_field_carries_previous_value() {
        let action = Action::set_field("lighting.shadows", 3);
        let interaction = interaction_for(&action, &before()).unwrap();
        assert_eq!(interaction.kind, InteractionKind::Change);
        assert_eq!(interaction.previous_value, Some(json!(1)));
        assert_eq!(
            describe_action(&action, &before()),
            "Changed Shadows from 1 to 3"
        );
    }

    #[test]
    fn set_field_on_new_path() {
        let action = Action::set_field("title", "Dusk");
        assert_eq!(describe_action(&action, &before()), r#"Set Title to "Dusk""#);
    }

    #[test]
    fn array_actions() {
        assert_eq!(
            describe_action(&Action::array_push("objects", "bush"), &before()),
            r#"Added "bush" to Objects"#
        );
        let pop = interaction_for(&Action::array_pop("objects"), &before()).unwrap();
        assert_eq!(pop.previous_value, Some(json!("rock")));
        assert_eq!(
            describe_action(&Action::array_pop("objects"), &before()),
            "Removed last item from Objects"
        );
        let remove = Action::ArrayRemove {
            path: "objects".into(),
            index: 0,
        };
        assert_eq!(
            interaction_for(&remove, &before()).unwrap().previous_value,
            Some(json!("tree"))
        );
        assert_eq!(
            describe_action(&remove, &before()),
            "Removed item from Objects at objects[0]"
        );
        let insert = Action::ArrayInsert {
            path: "objects".into(),
            index: 1,
            value: json!("bush"),
        };
        assert_eq!(
            describe_action(&insert, &before()),
            r#"Inserted "bush" into Objects at objects[1]"#
        );
    }

    #[test]
    fn fixed_sentences() {
        let data = before();
        assert_eq!(describe_action(&Action::Undo, &data), "Undid last change");
        assert_eq!(describe_action(&Action::Redo, &data), "Redid last change");
        assert_eq!(
            describe_action(&Action::SetData { data: json!({}) }, &data),
            "Replaced all data"
        );
        assert_eq!(
            describe_action(
                &Action::SetError {
                    path: "user.emailAddress".into(),
                    error: "required".into()
                },
                &data
            ),
            "Flagged Email Address: required"
        );
        assert_eq!(
            describe_action(
                &Action::ClearError {
                    path: "title".into()
                },
                &data
            ),
            "Cleared error on Title"
        );
        assert_eq!(
            describe_action(
                &Action::ArrayMove {
                    path: "objects".into(),
                    from: 0,
                    to: 1
                },
                &data
            ),
            "Moved item in Objects from objects[0] to objects[1]"
        );
        assert_eq!(
            describe_action(&Action::Unknown, &data),
            "Ignored unknown action"
        );
        assert_eq!(describe_action(&Action::Reset, &data), "Reset form to initial values");
        assert_eq!(
            describe_action(
                &Action::TouchField {
                    path: "title".into()
                },
                &data
            ),
            "Left Title"
        );
        assert!(interaction_for(&Action::Undo, &data).is_none());
    }
}
