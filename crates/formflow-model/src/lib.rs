//! Data model for the formflow structured-state engine.
//!
//! This crate holds the plain data shared by every other formflow crate:
//!
//! - [`FormState`] and its bounded [`History`] of data snapshots
//! - the closed [`Action`] taxonomy of mutation requests
//! - [`Interaction`] records that feed the text encoder
//! - the display [`Schema`] used when describing a whole state
//!
//! Structured values are [`serde_json::Value`] trees. None of the types here
//! carry behavior beyond small accessors; mutation lives in `formflow-core`.

pub mod action;
pub mod error;
pub mod interaction;
pub mod schema;
pub mod state;

pub use action::Action;
pub use error::{ModelError, Result};
pub use interaction::{Interaction, InteractionKind, InteractionMetadata};
pub use schema::{FieldSchema, FieldType, Schema};
pub use state::{DEFAULT_MAX_HISTORY, FieldError, FormState, History};

/// Re-exported so downstream crates agree on the value type.
pub use serde_json::Value;
