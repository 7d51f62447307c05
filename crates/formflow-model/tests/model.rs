//! Tests for formflow-model types.

use chrono::{TimeZone, Utc};
use formflow_model::{
    Action, FieldType, FormState, History, Interaction, InteractionKind, ModelError, Schema,
};
use serde_json::json;

#[test]
fn form_state_serializes_camel_case() {
    let mut state = FormState::new(json!({"title": "Dusk"}));
    state.errors.insert("title".into(), "too short".into());
    state.touched.insert("title".into(), true);

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["initialData"], json!({"title": "Dusk"}));
    assert_eq!(value["errors"]["title"], json!("too short"));
    assert_eq!(value["history"], json!({"past": [], "future": []}));

    let back: FormState = serde_json::from_value(value).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.error("title"), Some("too short"));
    assert!(back.is_touched("title"));
    assert!(!back.is_touched("subtitle"));
}

#[test]
fn history_walks_back_and_forth() {
    let mut history = History::new();
    history.record(json!(1), 3);
    history.record(json!(2), 3);

    assert_eq!(history.step_back(json!(3), 3), Some(json!(2)));
    assert_eq!(history.step_back(json!(2), 3), Some(json!(1)));
    assert_eq!(history.step_back(json!(1), 3), None);
    assert_eq!(history.future, [json!(2), json!(3)]);

    assert_eq!(history.step_forward(json!(1), 3), Some(json!(2)));
    history.record(json!(2), 3);
    assert!(!history.can_redo());
    assert_eq!(history.past, [json!(1), json!(2)]);
}

#[test]
fn history_limit_applies_to_both_stacks() {
    let mut history = History::new();
    for n in 0..5 {
        history.record(json!(n), 2);
    }
    assert_eq!(history.past, [json!(3), json!(4)]);

    history.future.extend([json!(10), json!(11)]);
    history.step_back(json!(9), 2);
    assert_eq!(history.future, [json!(9), json!(10)]);
}

#[test]
fn interaction_with_explicit_timestamp() {
    let interaction = Interaction::from_json(
        r#"{"type": "blur", "path": "title", "timestamp": "2026-03-01T12:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(interaction.kind, InteractionKind::Blur);
    assert_eq!(
        interaction.timestamp,
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    );

    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let built = Interaction::change("title", "Dusk").with_previous("Dawn").at(at);
    let value = serde_json::to_value(&built).unwrap();
    assert_eq!(value["previousValue"], json!("Dawn"));
    assert_eq!(value["timestamp"], json!("2026-01-02T03:04:05Z"));
}

#[test]
fn boundary_errors() {
    let error = Action::list_from_json("[{").unwrap_err();
    assert!(matches!(error, ModelError::Json(_)));
    assert!(error.to_string().starts_with("json error:"));

    let error = Schema::from_json(
        r#"{"scene": {"type": "object", "properties": {"tags": {"type": "array", "properties": {"x": {"type": "string"}}}}}}"#,
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid schema field 'scene.tags': only object fields may declare properties"
    );
}

#[test]
fn nested_schema_lookup() {
    let schema = Schema::from_json(
        r#"{"lighting": {"type": "object", "label": "Lights", "properties": {"shadows": {"type": "number"}}}}"#,
    )
    .unwrap();
    let lighting = schema.get("lighting").unwrap();
    assert_eq!(lighting.label.as_deref(), Some("Lights"));
    assert_eq!(
        lighting.properties.get("shadows").map(|field| field.field_type),
        Some(FieldType::Number)
    );
}
