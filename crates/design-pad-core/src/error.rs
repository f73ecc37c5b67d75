//! Error types for editor operations.

use thiserror::Error;

use crate::history::HistoryError;
use crate::object::ObjectId;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while editing a design.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Object not found in the scene.
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// A property was applied to an object kind it does not belong to.
    #[error("Property `{property}` does not apply to {kind} objects")]
    PropertyMismatch {
        property: &'static str,
        kind: &'static str,
    },

    /// A numeric value was out of range or not finite.
    #[error("Invalid value for `{property}`: {value}")]
    InvalidValue { property: &'static str, value: f32 },

    /// Sizing needs an intrinsic size the object kind does not have.
    #[error("{0} objects have no intrinsic size")]
    NoIntrinsicSize(&'static str),

    /// Scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Undo history failed to commit, restore or persist.
    #[error(transparent)]
    History(#[from] HistoryError),
}
