//! Form state and undo/redo history.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default bound for both history stacks.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Prior and undone data snapshots.
///
/// `past` is ordered oldest to newest (most recent at the back); `future` is
/// ordered newest to oldest (most recent at the front). Both stacks are
/// bounded by the limit passed to each operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub past: VecDeque<Value>,
    pub future: VecDeque<Value>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation snapshot of a fresh edit.
    ///
    /// Drops the oldest snapshots beyond `limit` and clears `future`, since a
    /// new edit starts a new branch.
    pub fn record(&mut self, snapshot: Value, limit: usize) {
        self.past.push_back(snapshot);
        trim_front(&mut self.past, limit);
        self.future.clear();
    }

    /// Pop the most recent past snapshot, parking `current` on `future`.
    ///
    /// Returns `None` (and leaves both stacks untouched) when `past` is empty.
    pub fn step_back(&mut self, current: Value, limit: usize) -> Option<Value> {
        let previous = self.past.pop_back()?;
        self.future.push_front(current);
        self.future.truncate(limit);
        Some(previous)
    }

    /// Take the most recent future snapshot, parking `current` on `past`.
    ///
    /// Returns `None` (and leaves both stacks untouched) when `future` is empty.
    pub fn step_forward(&mut self, current: Value, limit: usize) -> Option<Value> {
        let next = self.future.pop_front()?;
        self.past.push_back(current);
        trim_front(&mut self.past, limit);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

fn trim_front(stack: &mut VecDeque<Value>, limit: usize) {
    while stack.len() > limit {
        stack.pop_front();
    }
}

/// The single source of truth for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// Current structured value.
    pub data: Value,
    /// Snapshot captured at construction, restored by `RESET`.
    pub initial_data: Value,
    /// Validation messages keyed by path.
    pub errors: BTreeMap<String, String>,
    /// Paths the user has interacted with.
    pub touched: BTreeMap<String, bool>,
    /// True once any data-mutating action has been applied.
    pub dirty: bool,
    pub history: History,
}

impl FormState {
    pub fn new(initial_data: Value) -> Self {
        Self {
            data: initial_data.clone(),
            initial_data,
            errors: BTreeMap::new(),
            touched: BTreeMap::new(),
            dirty: false,
            history: History::new(),
        }
    }

    pub fn error(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn is_touched(&self, path: &str) -> bool {
        self.touched.get(path).copied().unwrap_or(false)
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn record_trims_oldest_and_clears_future() {
        let mut history = History::new();
        history.future.push_back(json!("redo"));
        for i in 0..5 {
            history.record(json!(i), 3);
        }
        assert_eq!(history.past, VecDeque::from(vec![json!(2), json!(3), json!(4)]));
        assert!(history.future.is_empty());
    }

    #[test]
    fn step_back_on_empty_past_is_none() {
        let mut history = History::new();
        assert_eq!(history.step_back(json!(1), 50), None);
        assert!(history.future.is_empty());
    }

    #[test]
    fn step_back_then_forward_restores_current() {
        let mut history = History::new();
        history.record(json!("a"), 50);

        let previous = history.step_back(json!("b"), 50);
        assert_eq!(previous, Some(json!("a")));
        assert_eq!(history.future.front(), Some(&json!("b")));

        let next = history.step_forward(json!("a"), 50);
        assert_eq!(next, Some(json!("b")));
        assert_eq!(history.past.back(), Some(&json!("a")));
        assert!(history.future.is_empty());
    }

    #[test]
    fn future_is_truncated_from_the_oldest_end() {
        let mut history = History::new();
        for i in 0..4 {
            history.record(json!(i), 10);
        }
        let mut current = json!(4);
        for _ in 0..4 {
            current = history.step_back(current, 2).unwrap();
        }
        // newest-first: 1 was parked last, 2 before it; 3 and 4 fell off
        assert_eq!(history.future, VecDeque::from(vec![json!(1), json!(2)]));
    }

    #[test]
    fn new_state_is_clean() {
        let state = FormState::new(json!({"a": 1}));
        assert_eq!(state.data, state.initial_data);
        assert!(!state.dirty);
        assert!(!state.history.can_undo());
        assert!(!state.is_touched("a"));
        assert_eq!(state.error("a"), None);
    }

    #[test]
    fn state_serializes_camel_case() {
        let state = FormState::new(json!({}));
        let value = serde_json::to_value(&state).expect("serialize state");
        assert!(value.get("initialData").is_some());
        assert!(value["history"]["past"].as_array().unwrap().is_empty());
    }
}
