//! Pure state transitions.
//!
//! Every successful data mutation (except `SET_DATA`) records the
//! pre-mutation data on `history.past` and clears `history.future`, so
//! `UNDO` restores exactly the prior snapshot whichever action produced it.
//! Conditions that cannot apply (undo with no past, pop on an empty array,
//! out-of-range indices, array ops on non-arrays) leave the state untouched.

use std::sync::Arc;

use formflow_model::{Action, DEFAULT_MAX_HISTORY, FormState};
use serde_json::Value;
use tracing::trace;

use crate::path::{get_value, set_value_mut};

/// Applies [`Action`]s to [`FormState`]s with a fixed history bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reducer {
    max_history: usize,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

/// Reduce with the default history bound.
pub fn reduce(state: &Arc<FormState>, action: &Action) -> Arc<FormState> {
    Reducer::default().reduce(state, action)
}

impl Reducer {
    pub fn new(max_history: usize) -> Self {
        Self { max_history }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Compute the next state.
    ///
    /// A no-op returns a clone of the same `Arc`, so `Arc::ptr_eq` tells
    /// callers whether anything changed.
    pub fn reduce(&self, state: &Arc<FormState>, action: &Action) -> Arc<FormState> {
        match self.apply(state, action) {
            Some(next) => Arc::new(next),
            None => Arc::clone(state),
        }
    }

    /// Compute the next state, or `None` when the action is a no-op.
    pub fn apply(&self, state: &FormState, action: &Action) -> Option<FormState> {
        match action {
            Action::SetField { path, value } => {
                let mut data = state.data.clone();
                set_value_mut(&mut data, path, value.clone());
                Some(self.record(state, data))
            }
            Action::SetData { data } => {
                let mut next = state.clone();
                next.data = data.clone();
                next.dirty = true;
                Some(next)
            }
            Action::Reset => {
                let mut next = self.record(state, state.initial_data.clone());
                next.errors.clear();
                next.touched.clear();
                Some(next)
            }
            Action::Undo => {
                if !state.history.can_undo() {
                    trace!("undo with empty past");
                    return None;
                }
                let mut next = state.clone();
                let current = next.data.take();
                next.data = next.history.step_back(current, self.max_history)?;
                Some(next)
            }
            Action::Redo => {
                if !state.history.can_redo() {
                    trace!("redo with empty future");
                    return None;
                }
                let mut next = state.clone();
                let current = next.data.take();
                next.data = next.history.step_forward(current, self.max_history)?;
                Some(next)
            }
            Action::TouchField { path } => {
                let mut next = state.clone();
                next.touched.insert(path.clone(), true);
                Some(next)
            }
            Action::SetError { path, error } => {
                let mut next = state.clone();
                next.errors.insert(path.clone(), error.clone());
                Some(next)
            }
            Action::ClearError { path } => {
                let mut next = state.clone();
                next.errors.remove(path);
                Some(next)
            }
            Action::ArrayPush { path, value } => {
                let mut items = match get_value(&state.data, path) {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => items.clone(),
                    Some(_) => {
                        trace!(path = %path, "push target is not an array");
                        return None;
                    }
                };
                items.push(value.clone());
                Some(self.replace_array(state, path, items))
            }
            Action::ArrayPop { path } => {
                let mut items = existing_array(state, path)?;
                if items.pop().is_none() {
                    trace!(path = %path, "pop on empty array");
                    return None;
                }
                Some(self.replace_array(state, path, items))
            }
            Action::ArrayInsert { path, index, value } => {
                let mut items = existing_array(state, path)?;
                let index = (*index).min(items.len());
                items.insert(index, value.clone());
                Some(self.replace_array(state, path, items))
            }
            Action::ArrayRemove { path, index } => {
                let mut items = existing_array(state, path)?;
                if *index >= items.len() {
                    trace!(path = %path, index, len = items.len(), "remove index out of bounds");
                    return None;
                }
                items.remove(*index);
                Some(self.replace_array(state, path, items))
            }
            Action::ArrayMove { path, from, to } => {
                let mut items = existing_array(state, path)?;
                if *from >= items.len() || *to >= items.len() {
                    trace!(path = %path, from, to, len = items.len(), "move index out of bounds");
                    return None;
                }
                let item = items.remove(*from);
                items.insert(*to, item);
                Some(self.replace_array(state, path, items))
            }
            Action::Unknown => None,
        }
    }

    fn replace_array(&self, state: &FormState, path: &str, items: Vec<Value>) -> FormState {
        let mut data = state.data.clone();
        set_value_mut(&mut data, path, Value::Array(items));
        self.record(state, data)
    }

    /// Swap in `data`, pushing the old data onto `past` and marking dirty.
    fn record(&self, state: &FormState, data: Value) -> FormState {
        let mut next = state.clone();
        let previous = std::mem::replace(&mut next.data, data);
        next.history.record(previous, self.max_history);
        next.dirty = true;
        next
    }
}

fn existing_array(state: &FormState, path: &str) -> Option<Vec<Value>> {
    match get_value(&state.data, path) {
        Some(Value::Array(items)) => Some(items.clone()),
        _ => {
            trace!(path = %path, "target is not an array");
            None
        }
    }
}
