/// Snapshot type and the contract a scene must fulfil to be tracked.
use serde::{Deserialize, Serialize};

/// Serialized capture of an entire scene at one instant.
///
/// The content is opaque to the history system. Two snapshots are equal
/// when their content is equal, regardless of when they were captured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    content: String,
}

impl Snapshot {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Size of the serialized content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl From<String> for Snapshot {
    fn from(content: String) -> Self {
        Self { content }
    }
}

/// A scene whose full state can be captured and restored.
///
/// `restore` must be all-or-nothing: when it returns an error the scene
/// is left exactly as it was before the call.
pub trait SceneState {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Serializes the current scene contents.
    fn capture(&self) -> Result<Snapshot, Self::Error>;

    /// Replaces the current scene contents with the snapshot's.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}
