//! Construction-time configuration for a [`crate::FormMachine`].

use std::collections::BTreeMap;
use std::fmt;

use formflow_model::DEFAULT_MAX_HISTORY;
use serde_json::Value;

/// Validation output: message keyed by path.
pub type ValidationErrors = BTreeMap<String, String>;

/// Validation callback run against the current data.
pub type ValidationFn = Box<dyn Fn(&Value) -> ValidationErrors>;

/// Callback invoked with the current data after every dispatch.
pub type ChangeFn = Box<dyn Fn(&Value)>;

/// Configuration for one editing session.
pub struct FormConfig {
    /// Starting data, also the target of `RESET`.
    pub initial_data: Value,
    pub validation: Option<ValidationFn>,
    pub on_change: Option<ChangeFn>,
    /// Bound for both undo and redo stacks.
    pub max_history: usize,
}

impl FormConfig {
    pub fn new(initial_data: Value) -> Self {
        Self {
            initial_data,
            validation: None,
            on_change: None,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }

    #[must_use]
    pub fn with_validation(
        mut self,
        validation: impl Fn(&Value) -> ValidationErrors + 'static,
    ) -> Self {
        self.validation = Some(Box::new(validation));
        self
    }

    #[must_use]
    pub fn with_on_change(mut self, on_change: impl Fn(&Value) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    #[must_use]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }
}

impl fmt::Debug for FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("initial_data", &self.initial_data)
            .field("validation", &self.validation.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("max_history", &self.max_history)
            .finish()
    }
}
