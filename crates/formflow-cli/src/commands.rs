use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, info, info_span, warn};

use formflow_core::path::join_path;
use formflow_core::{FormConfig, FormMachine, ValidationErrors};
use formflow_model::{Action, FieldType, Schema};
use formflow_text::{decode, decode_to_intents, describe_action, encode_state};

use crate::cli::{ApplyArgs, DescribeArgs, ParseArgs};
use crate::types::{ApplyResult, ParseResult, Step, StepOutcome};

pub fn run_apply(args: &ApplyArgs) -> Result<ApplyResult> {
    let data = match &args.data {
        Some(path) => load_json(path)?,
        None => Value::Object(Map::new()),
    };
    let schema = args.schema.as_deref().map(load_schema).transpose()?;
    let instructions = collect_instructions(args)?;

    let mut config = FormConfig::new(data);
    if let Some(limit) = args.max_history {
        config = config.with_max_history(limit);
    }
    let mut machine = FormMachine::new(config);

    let span = info_span!("apply", instructions = instructions.len());
    let _guard = span.enter();

    let mut steps = Vec::with_capacity(instructions.len());
    for instruction in instructions {
        let outcome = apply_instruction(&mut machine, &instruction);
        if outcome == StepOutcome::NotUnderstood {
            warn!(%instruction, "instruction not understood");
        }
        steps.push(Step {
            instruction,
            outcome,
        });
    }

    let final_state = match &schema {
        Some(schema) => {
            let check: &dyn Fn(&Value) -> ValidationErrors =
                &|data: &Value| type_errors(schema, data);
            let flagged = machine.validate(Some(check));
            debug!(flagged = flagged.len(), "validated against schema");
            encode_state(machine.data(), schema)
        }
        None => serde_json::to_string_pretty(machine.data()).context("render final state")?,
    };

    let state_json = if args.json {
        Some(serde_json::to_string_pretty(machine.state()).context("render state json")?)
    } else {
        None
    };

    let history = &machine.state().history;
    let result = ApplyResult {
        steps,
        final_state,
        undo_depth: history.past.len(),
        redo_depth: history.future.len(),
        dirty: machine.is_dirty(),
        errors: machine.errors().clone(),
        state_json,
    };
    info!(
        steps = result.steps.len(),
        not_understood = result.not_understood(),
        "apply complete"
    );
    Ok(result)
}

pub fn run_describe(args: &DescribeArgs) -> Result<String> {
    let data = load_json(&args.data)?;
    let schema = load_schema(&args.schema)?;
    Ok(encode_state(&data, &schema))
}

pub fn run_parse(args: &ParseArgs) -> ParseResult {
    let text = args.text.join(" ");
    ParseResult {
        action: instruction_action(&text),
        intents: decode_to_intents(&text),
        text,
    }
}

/// `undo` and `redo` are taken literally; anything else goes through the
/// decoder.
pub fn instruction_action(instruction: &str) -> Option<Action> {
    match instruction.trim().to_lowercase().as_str() {
        "undo" => Some(Action::Undo),
        "redo" => Some(Action::Redo),
        _ => decode(instruction),
    }
}

pub fn apply_instruction(machine: &mut FormMachine, instruction: &str) -> StepOutcome {
    let Some(action) = instruction_action(instruction) else {
        return StepOutcome::NotUnderstood;
    };
    let before = machine.data().clone();
    if machine.dispatch(&action) {
        let narration = describe_action(&action, &before);
        StepOutcome::Applied { action, narration }
    } else {
        StepOutcome::Unchanged { action }
    }
}

/// Fields whose value does not match the declared type, keyed by path.
///
/// Missing and null values are not flagged.
pub fn type_errors(schema: &Schema, data: &Value) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    collect_type_errors(schema, data, "", &mut errors);
    errors
}

fn collect_type_errors(schema: &Schema, data: &Value, prefix: &str, errors: &mut ValidationErrors) {
    for (key, field) in schema.iter() {
        let Some(value) = data.get(key).filter(|value| !value.is_null()) else {
            continue;
        };
        let path = join_path([prefix, key]);
        if !matches_type(field.field_type, value) {
            errors.insert(path, format!("expected {}", type_name(field.field_type)));
        } else if field.field_type == FieldType::Object {
            collect_type_errors(&field.properties, value, &path, errors);
        }
    }
}

fn matches_type(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::String => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Object => value.is_object(),
        FieldType::Array => value.is_array(),
    }
}

fn type_name(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "a string",
        FieldType::Number => "a number",
        FieldType::Boolean => "a boolean",
        FieldType::Object => "an object",
        FieldType::Array => "an array",
    }
}

fn collect_instructions(args: &ApplyArgs) -> Result<Vec<String>> {
    let mut instructions = Vec::new();
    if let Some(path) = &args.script {
        let script = fs::read_to_string(path)
            .with_context(|| format!("read script {}", path.display()))?;
        instructions.extend(script_lines(&script));
    }
    instructions.extend(args.instructions.iter().cloned());
    Ok(instructions)
}

fn script_lines(script: &str) -> impl Iterator<Item = String> + '_ {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

fn load_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

fn load_schema(path: &Path) -> Result<Schema> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Schema::from_json(&text).with_context(|| format!("parse schema {}", path.display()))
}
