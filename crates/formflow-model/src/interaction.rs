//! Observed UI events used as input to the text encoder.
//!
//! Interactions are ephemeral: they are never stored in [`crate::FormState`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Change,
    Focus,
    Blur,
    Submit,
    Reset,
    ArrayPush,
    ArrayPop,
    ArrayInsert,
    ArrayRemove,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::ArrayPush => "array_push",
            Self::ArrayPop => "array_pop",
            Self::ArrayInsert => "array_insert",
            Self::ArrayRemove => "array_remove",
        }
    }
}

/// Extra context attached to an interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionMetadata {
    /// Array index for insert/remove events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One observed UI event.
///
/// `value` and `previous_value` distinguish "absent" (`None`) from an
/// explicit JSON `null` (`Some(Value::Null)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(default)]
    pub path: String,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_value: Option<Value>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<InteractionMetadata>,
}

/// Maps a present field (even `null`) to `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Interaction {
    pub fn new(kind: InteractionKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            value: None,
            previous_value: None,
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    /// A `change` event with no previous value.
    pub fn change(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(InteractionKind::Change, path).with_value(value)
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_previous(mut self, previous: impl Into<Value>) -> Self {
        self.previous_value = Some(previous.into());
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.metadata.get_or_insert_with(InteractionMetadata::default).index = Some(index);
        self
    }

    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn index(&self) -> Option<usize> {
        self.metadata.as_ref().and_then(|m| m.index)
    }

    pub fn from_json(input: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
