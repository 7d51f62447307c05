use std::collections::BTreeMap;

use formflow_model::Action;
use formflow_text::TextIntent;

/// What happened to one instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The action changed the state; `narration` describes the change.
    Applied { action: Action, narration: String },
    /// The action was understood but left the state as it was.
    Unchanged { action: Action },
    NotUnderstood,
}

impl StepOutcome {
    pub fn action(&self) -> Option<&Action> {
        match self {
            Self::Applied { action, .. } | Self::Unchanged { action } => Some(action),
            Self::NotUnderstood => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub instruction: String,
    pub outcome: StepOutcome,
}

#[derive(Debug)]
pub struct ApplyResult {
    pub steps: Vec<Step>,
    /// Final state rendered as prose (with a schema) or pretty JSON.
    pub final_state: String,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub dirty: bool,
    pub errors: BTreeMap<String, String>,
    /// Serialized `FormState`, set when `--json` was requested.
    pub state_json: Option<String>,
}

impl ApplyResult {
    pub fn not_understood(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.outcome == StepOutcome::NotUnderstood)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.not_understood() > 0
    }
}

#[derive(Debug)]
pub struct ParseResult {
    pub text: String,
    pub action: Option<Action>,
    pub intents: Vec<TextIntent>,
}
