//! The closed set of mutation requests understood by the reducer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A serializable mutation request.
///
/// Serialized form is `{"type": "SET_FIELD", "payload": {...}}`; the unit
/// variants omit `payload`. Any unrecognized `type` deserializes to
/// [`Action::Unknown`], which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetField {
        path: String,
        value: Value,
    },
    /// Wholesale replacement. Not recorded in history.
    SetData {
        data: Value,
    },
    Reset,
    Undo,
    Redo,
    TouchField {
        path: String,
    },
    SetError {
        path: String,
        error: String,
    },
    ClearError {
        path: String,
    },
    ArrayPush {
        path: String,
        value: Value,
    },
    ArrayPop {
        path: String,
    },
    ArrayInsert {
        path: String,
        index: usize,
        value: Value,
    },
    ArrayRemove {
        path: String,
        index: usize,
    },
    ArrayMove {
        path: String,
        from: usize,
        to: usize,
    },
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn set_field(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::SetField {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn array_push(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayPush {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn array_pop(path: impl Into<String>) -> Self {
        Self::ArrayPop { path: path.into() }
    }

    /// Wire name of the action, e.g. `"SET_FIELD"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetField { .. } => "SET_FIELD",
            Self::SetData { .. } => "SET_DATA",
            Self::Reset => "RESET",
            Self::Undo => "UNDO",
            Self::Redo => "REDO",
            Self::TouchField { .. } => "TOUCH_FIELD",
            Self::SetError { .. } => "SET_ERROR",
            Self::ClearError { .. } => "CLEAR_ERROR",
            Self::ArrayPush { .. } => "ARRAY_PUSH",
            Self::ArrayPop { .. } => "ARRAY_POP",
            Self::ArrayInsert { .. } => "ARRAY_INSERT",
            Self::ArrayRemove { .. } => "ARRAY_REMOVE",
            Self::ArrayMove { .. } => "ARRAY_MOVE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// The path this action addresses, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::SetField { path, .. }
            | Self::TouchField { path }
            | Self::SetError { path, .. }
            | Self::ClearError { path }
            | Self::ArrayPush { path, .. }
            | Self::ArrayPop { path }
            | Self::ArrayInsert { path, .. }
            | Self::ArrayRemove { path, .. }
            | Self::ArrayMove { path, .. } => Some(path),
            Self::SetData { .. } | Self::Reset | Self::Undo | Self::Redo | Self::Unknown => None,
        }
    }

    /// True for actions that push a history snapshot when they succeed.
    pub fn is_recorded(&self) -> bool {
        matches!(
            self,
            Self::SetField { .. }
                | Self::Reset
                | Self::ArrayPush { .. }
                | Self::ArrayPop { .. }
                | Self::ArrayInsert { .. }
                | Self::ArrayRemove { .. }
                | Self::ArrayMove { .. }
        )
    }

    /// Parse a JSON array of actions.
    pub fn list_from_json(input: &str) -> crate::Result<Vec<Action>> {
        Ok(serde_json::from_str(input)?)
    }
}
