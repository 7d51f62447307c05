//! Structured-state engine: path addressing, a pure reducer and the
//! [`FormMachine`] that owns one [`FormState`](formflow_model::FormState).
//!
//! ```
//! use formflow_core::{FormConfig, FormMachine};
//! use serde_json::json;
//!
//! let mut machine = FormMachine::new(FormConfig::new(json!({"lighting": {"shadows": 1}})));
//! machine.set_field("lighting.shadows", json!(3));
//! assert_eq!(machine.value("lighting.shadows"), Some(&json!(3)));
//!
//! machine.undo();
//! assert_eq!(machine.value("lighting.shadows"), Some(&json!(1)));
//! assert!(machine.can_redo());
//! ```

pub mod config;
pub mod machine;
pub mod path;
pub mod reducer;

pub use config::{ChangeFn, FormConfig, ValidationErrors, ValidationFn};
pub use machine::{FormMachine, Unsubscribe};
pub use reducer::{Reducer, reduce};
