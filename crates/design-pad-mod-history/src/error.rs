//! Error types for history operations.

use thiserror::Error;

/// Boxed error coming from a scene implementation or the storage layer.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by commit, undo, redo and persistence.
///
/// Undo at the start of the log or redo at its tail are not errors; those
/// calls are no-ops.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The scene could not be captured; nothing was committed.
    #[error("failed to capture scene snapshot: {0}")]
    Serialization(#[source] BoxedError),

    /// A snapshot could not be restored; the scene was left untouched.
    #[error("failed to restore snapshot at index {index}: {source}")]
    Restore {
        index: usize,
        #[source]
        source: BoxedError,
    },

    /// Reading or writing persisted history failed.
    #[error("history persistence failed: {0}")]
    Persistence(#[source] BoxedError),
}

impl HistoryError {
    pub(crate) fn serialization(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Serialization(Box::new(err))
    }

    pub(crate) fn restore(
        index: usize,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Restore {
            index,
            source: Box::new(err),
        }
    }
}

impl From<anyhow::Error> for HistoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Persistence(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_restore_error_mentions_index() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad json");
        let err = HistoryError::restore(3, io);
        assert_eq!(
            err.to_string(),
            "failed to restore snapshot at index 3: bad json"
        );
    }

    #[test]
    fn test_persistence_error_keeps_context() {
        let res: anyhow::Result<()> = Err(anyhow::anyhow!("disk full"));
        let err: HistoryError = res.context("Failed to flush history").unwrap_err().into();
        assert!(matches!(err, HistoryError::Persistence(_)));
        assert!(err.to_string().contains("Failed to flush history"));
    }
}
