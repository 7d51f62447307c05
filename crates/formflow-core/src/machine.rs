//! Stateful wrapper owning one [`FormState`].
//!
//! All work is synchronous: [`FormMachine::dispatch`] reduces, stores the new
//! state, notifies every subscriber once and then calls `on_change`.
//! Notification iterates over a snapshot of the listener list, so a listener
//! may unsubscribe itself (or others) while being notified.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use formflow_model::{Action, FieldError, FormState};
use serde_json::Value;
use tracing::debug;

use crate::config::{ChangeFn, FormConfig, ValidationErrors, ValidationFn};
use crate::path::get_value;
use crate::reducer::Reducer;

type Listener = Rc<dyn Fn(&FormState)>;
type ListenerList = RefCell<Vec<(u64, Listener)>>;

pub struct FormMachine {
    state: Arc<FormState>,
    reducer: Reducer,
    validation: Option<ValidationFn>,
    on_change: Option<ChangeFn>,
    listeners: Rc<ListenerList>,
    next_listener_id: u64,
}

/// Handle returned by [`FormMachine::subscribe`].
///
/// Calling [`Unsubscribe::unsubscribe`] more than once, or after the machine
/// is dropped, does nothing.
#[derive(Clone)]
pub struct Unsubscribe {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl Unsubscribe {
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}

impl FormMachine {
    pub fn new(config: FormConfig) -> Self {
        let FormConfig {
            initial_data,
            validation,
            on_change,
            max_history,
        } = config;
        Self {
            state: Arc::new(FormState::new(initial_data)),
            reducer: Reducer::new(max_history),
            validation,
            on_change,
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: 0,
        }
    }

    /// Shared snapshot of the current state.
    pub fn snapshot(&self) -> Arc<FormState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn data(&self) -> &Value {
        &self.state.data
    }

    pub fn value(&self, path: &str) -> Option<&Value> {
        get_value(&self.state.data, path)
    }

    /// Register a listener called with the new state after every dispatch.
    pub fn subscribe(&mut self, listener: impl Fn(&FormState) + 'static) -> Unsubscribe {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        Unsubscribe {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Apply `action`; returns whether the state was replaced.
    ///
    /// Subscribers and `on_change` run even when the action was a no-op.
    pub fn dispatch(&mut self, action: &Action) -> bool {
        let next = self.reducer.reduce(&self.state, action);
        let changed = !Arc::ptr_eq(&next, &self.state);
        debug!(action = action.kind(), path = action.path(), changed, "dispatch");
        self.state = next;
        self.notify();
        if let Some(on_change) = &self.on_change {
            on_change(&self.state.data);
        }
        changed
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&self.state);
        }
    }

    pub fn set_field(&mut self, path: &str, value: Value) -> bool {
        self.dispatch(&Action::SetField {
            path: path.to_string(),
            value,
        })
    }

    pub fn set_data(&mut self, data: Value) -> bool {
        self.dispatch(&Action::SetData { data })
    }

    pub fn reset(&mut self) -> bool {
        self.dispatch(&Action::Reset)
    }

    pub fn undo(&mut self) -> bool {
        self.dispatch(&Action::Undo)
    }

    pub fn redo(&mut self) -> bool {
        self.dispatch(&Action::Redo)
    }

    pub fn touch_field(&mut self, path: &str) -> bool {
        self.dispatch(&Action::TouchField {
            path: path.to_string(),
        })
    }

    pub fn set_error(&mut self, path: &str, error: &str) -> bool {
        self.dispatch(&Action::SetError {
            path: path.to_string(),
            error: error.to_string(),
        })
    }

    pub fn clear_error(&mut self, path: &str) -> bool {
        self.dispatch(&Action::ClearError {
            path: path.to_string(),
        })
    }

    pub fn push_item(&mut self, path: &str, value: Value) -> bool {
        self.dispatch(&Action::ArrayPush {
            path: path.to_string(),
            value,
        })
    }

    pub fn pop_item(&mut self, path: &str) -> bool {
        self.dispatch(&Action::ArrayPop {
            path: path.to_string(),
        })
    }

    pub fn insert_item(&mut self, path: &str, index: usize, value: Value) -> bool {
        self.dispatch(&Action::ArrayInsert {
            path: path.to_string(),
            index,
            value,
        })
    }

    pub fn remove_item(&mut self, path: &str, index: usize) -> bool {
        self.dispatch(&Action::ArrayRemove {
            path: path.to_string(),
            index,
        })
    }

    pub fn move_item(&mut self, path: &str, from: usize, to: usize) -> bool {
        self.dispatch(&Action::ArrayMove {
            path: path.to_string(),
            from,
            to,
        })
    }

    /// Run `custom` (or the configured validation) and record every reported
    /// error through `SET_ERROR`.
    ///
    /// Errors already in the map for paths that are no longer reported stay
    /// there until cleared explicitly.
    pub fn validate(
        &mut self,
        custom: Option<&dyn Fn(&Value) -> ValidationErrors>,
    ) -> Vec<FieldError> {
        let reported = match (custom, &self.validation) {
            (Some(custom), _) => custom(&self.state.data),
            (None, Some(validation)) => validation(&self.state.data),
            (None, None) => ValidationErrors::new(),
        };
        let errors: Vec<FieldError> = reported
            .into_iter()
            .map(|(path, message)| FieldError::new(path, message))
            .collect();
        debug!(count = errors.len(), "validate");
        for error in &errors {
            self.set_error(&error.path, &error.message);
        }
        errors
    }

    pub fn can_undo(&self) -> bool {
        self.state.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.history.can_redo()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.state.errors
    }

    pub fn touched(&self) -> &BTreeMap<String, bool> {
        &self.state.touched
    }

    pub fn max_history(&self) -> usize {
        self.reducer.max_history()
    }
}

impl fmt::Debug for FormMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormMachine")
            .field("state", &self.state)
            .field("reducer", &self.reducer)
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
