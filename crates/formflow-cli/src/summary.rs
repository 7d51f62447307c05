use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use formflow_text::TextIntent;

use crate::types::{ApplyResult, ParseResult, StepOutcome};

pub fn print_apply(result: &ApplyResult) {
    if let Some(json) = &result.state_json {
        println!("{json}");
    } else {
        print_apply_tables(result);
    }
    let missed = result.not_understood();
    if missed > 0 {
        eprintln!("{missed} instruction(s) not understood");
    }
}

fn print_apply_tables(result: &ApplyResult) {
    if !result.steps.is_empty() {
        println!("{}", steps_table(result));
    }
    println!();
    println!("Final state:");
    println!("{}", result.final_state);
    println!();
    println!("{}", state_table(result));
    if let Some(errors) = errors_table(result) {
        println!();
        println!("Errors:");
        println!("{errors}");
    }
}

pub fn print_parse(result: &ParseResult) {
    println!("Input: {}", result.text);
    match &result.action {
        Some(action) => match serde_json::to_string_pretty(action) {
            Ok(json) => println!("{json}"),
            Err(error) => eprintln!("error: {error}"),
        },
        None => println!("No action"),
    }
    if !result.intents.is_empty() {
        println!();
        println!("{}", intents_table(&result.intents));
    }
}

pub fn steps_table(result: &ApplyResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Instruction"),
        header_cell("Action"),
        header_cell("Result"),
    ]);
    apply_steps_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (number, step) in result.steps.iter().enumerate() {
        let action_cell = match step.outcome.action() {
            Some(action) => Cell::new(action.kind()).fg(Color::Blue),
            None => dim_cell("-"),
        };
        let result_cell = match &step.outcome {
            StepOutcome::Applied { narration, .. } => Cell::new(narration),
            StepOutcome::Unchanged { .. } => dim_cell("no change"),
            StepOutcome::NotUnderstood => Cell::new("not understood")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        };
        table.add_row(vec![
            dim_cell(number + 1),
            Cell::new(&step.instruction),
            action_cell,
            result_cell,
        ]);
    }
    table
}

pub fn state_table(result: &ApplyResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Undo"),
        header_cell("Redo"),
        header_cell("Dirty"),
        header_cell("Errors"),
        header_cell("Not understood"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        count_cell(result.undo_depth, Color::Green),
        count_cell(result.redo_depth, Color::Green),
        if result.dirty {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            dim_cell("no")
        },
        count_cell(result.errors.len(), Color::Red),
        count_cell(result.not_understood(), Color::Red),
    ]);
    table
}

fn errors_table(result: &ApplyResult) -> Option<Table> {
    if result.errors.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Message")]);
    apply_table_style(&mut table);
    for (path, message) in &result.errors {
        table.add_row(vec![
            Cell::new(path).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(message).fg(Color::Red),
        ]);
    }
    Some(table)
}

pub fn intents_table(intents: &[TextIntent]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Verb"),
        header_cell("Target"),
        header_cell("Value"),
        header_cell("Index"),
        header_cell("Action"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for intent in intents {
        let verb = match intent.verb {
            Some(verb) => Cell::new(verb.as_str()),
            None => dim_cell("-"),
        };
        let value = match &intent.value {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        };
        let index = match (intent.index, intent.at_end) {
            (_, true) => Cell::new("end"),
            (Some(index), false) => Cell::new(index),
            (None, false) => dim_cell("-"),
        };
        let action = match intent.to_action() {
            Some(action) => Cell::new(action.kind()).fg(Color::Blue),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            verb,
            Cell::new(&intent.target).add_attribute(Attribute::Bold),
            value,
            index,
            action,
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_steps_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
