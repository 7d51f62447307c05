//! Two-way translation between formflow events and plain English.
//!
//! - [`encoder`] turns [`Interaction`](formflow_model::Interaction)s and
//!   whole states into sentences.
//! - [`decoder`] turns free-text instructions into
//!   [`Action`](formflow_model::Action)s or lightweight [`TextIntent`]s.
//! - [`narrate`] bridges the two: it describes a dispatched action.
//!
//! ```
//! use formflow_model::{Action, Interaction};
//! use formflow_text::{decode, encode_interaction};
//! use serde_json::json;
//!
//! let sentence = encode_interaction(&Interaction::change("background", json!("forest")));
//! assert_eq!(sentence, r#"Set Background to "forest""#);
//! assert_eq!(decode(&sentence), Some(Action::set_field("background", "forest")));
//! ```
//!
//! Everything here is stateless and never fails: text that cannot be
//! understood decodes to `None` or an empty list.

pub mod decoder;
pub mod encoder;
pub mod format;
pub mod narrate;
pub mod verbs;

pub use decoder::{TextIntent, decode, decode_all, decode_to_intents};
pub use encoder::{describe_delta, encode_interaction, encode_interactions, encode_state};
pub use format::{format_field_name, format_value};
pub use narrate::{describe_action, interaction_for};
pub use verbs::Verb;
