//! Text-to-state-to-text loop and encoder/decoder agreement.

use formflow_core::{FormConfig, FormMachine};
use formflow_model::{Action, FieldSchema, FieldType, Interaction, InteractionKind, Schema};
use formflow_text::decoder::STOPWORDS;
use formflow_text::verbs::PRIORITY;
use formflow_text::{decode, describe_action, encode_interaction, encode_state};
use proptest::prelude::*;
use serde_json::{Value, json};

fn is_plain_identifier(word: &str) -> bool {
    !STOPWORDS.contains(&word) && !PRIORITY.iter().any(|verb| verb.words().contains(&word))
}

fn scene_schema() -> Schema {
    let lighting = Schema::new()
        .with_field("shadows", FieldSchema::new(FieldType::Number))
        .with_field("softLight", FieldSchema::new(FieldType::Boolean));
    Schema::new()
        .with_field("background", FieldSchema::new(FieldType::String))
        .with_field("lighting", FieldSchema::object(lighting))
        .with_field("objects", FieldSchema::new(FieldType::Array))
}

#[test]
fn state_description_snapshot() {
    let data = json!({
        "background": "forest",
        "lighting": {"shadows": 3, "softLight": true},
        "objects": ["tree", "rock"]
    });
    insta::assert_snapshot!(encode_state(&data, &scene_schema()), @r#"
    Background: "forest"
    Lighting:
      Shadows: 3
      Soft Light: enabled
    Objects: 2 items
    "#);
}

#[test]
fn missing_values_render_as_empty() {
    let data = json!({"lighting": {}});
    insta::assert_snapshot!(encode_state(&data, &scene_schema()), @r"
    Background: empty
    Lighting:
      Shadows: empty
      Soft Light: empty
    Objects: 0 items
    ");
}

#[test]
fn decoded_action_wire_shape() {
    let action = decode("Set background to forest").unwrap();
    insta::assert_json_snapshot!(action, @r#"
    {
      "type": "SET_FIELD",
      "payload": {
        "path": "background",
        "value": "forest"
      }
    }
    "#);
}

#[test]
fn instructions_drive_a_machine() {
    let mut machine = FormMachine::new(FormConfig::new(json!({
        "background": "city",
        "hdr": false,
        "objects": ["tree", "rock"]
    })));

    let mut narration = Vec::new();
    for instruction in [
        "Set background to forest",
        "enable hdr",
        "add bush to objects",
        "remove the last item from objects",
        "remove the first item from objects",
    ] {
        let action = decode(instruction).unwrap();
        let before = machine.data().clone();
        assert!(machine.dispatch(&action), "{instruction}");
        narration.push(describe_action(&action, &before));
    }

    assert_eq!(
        machine.data(),
        &json!({"background": "forest", "hdr": true, "objects": ["rock"]})
    );
    assert_eq!(
        narration,
        [
            r#"Changed Background from "city" to "forest""#,
            "Changed Hdr from disabled to enabled",
            r#"Added "bush" to Objects"#,
            "Removed last item from Objects",
            "Removed item from Objects at objects[0]",
        ]
    );

    assert!(machine.dispatch(&decode("reset the saturation field").unwrap()));
    assert_eq!(machine.value("background"), Some(&json!("city")));
    assert!(machine.is_dirty());
}

#[test]
fn encoded_array_events_decode_back() {
    let cases = [
        (
            Interaction::new(InteractionKind::ArrayPush, "objects").with_value(json!("tree")),
            Action::array_push("objects", "tree"),
        ),
        (
            Interaction::new(InteractionKind::ArrayPop, "objects"),
            Action::array_pop("objects"),
        ),
        (
            Interaction::new(InteractionKind::ArrayInsert, "objects").with_index(2),
            Action::ArrayInsert {
                path: "objects".into(),
                index: 2,
                value: Value::Null,
            },
        ),
        (
            Interaction::new(InteractionKind::ArrayRemove, "objects").with_index(0),
            Action::ArrayRemove {
                path: "objects".into(),
                index: 0,
            },
        ),
        (
            Interaction::new(InteractionKind::Reset, ""),
            Action::Reset,
        ),
    ];
    for (interaction, expected) in cases {
        let sentence = encode_interaction(&interaction);
        assert_eq!(decode(&sentence), Some(expected), "{sentence}");
    }
}

proptest! {
    #[test]
    fn encoded_string_change_decodes_to_same_field(
        path in "[a-z][a-z_]{0,10}",
        value in "[a-z0-9]{1,10}",
    ) {
        prop_assume!(is_plain_identifier(&path));
        let sentence = encode_interaction(&Interaction::change(path.as_str(), value.as_str()));
        prop_assert_eq!(decode(&sentence), Some(Action::set_field(path, value)));
    }

    #[test]
    fn encoded_number_change_decodes_to_same_field(
        path in "[a-z][a-z_]{0,10}",
        value in -10_000i64..10_000,
    ) {
        prop_assume!(is_plain_identifier(&path));
        let sentence = encode_interaction(&Interaction::change(path.as_str(), value));
        prop_assert_eq!(decode(&sentence), Some(Action::set_field(path, value)));
    }
}
