use thiserror::Error;

/// Errors raised while reading model values from their serialized form.
///
/// The engine itself never fails; these only surface at the boundary where
/// schemas, actions or interactions are parsed.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid schema field '{field}': {message}")]
    InvalidSchema { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
