/// Undo/redo history built on full-scene snapshots.
///
/// Provides a `HistoryManager` that keeps a linear log of serialized scene
/// states and a cursor into it. The log can optionally be persisted to an
/// embedded key-value store (redb) so a design session's history survives
/// restarts.
pub mod config;
pub mod error;
pub mod manager;
pub mod persistence;
pub mod snapshot;

pub use config::HistoryConfig;
pub use error::HistoryError;
pub use manager::HistoryManager;
pub use persistence::PersistenceLayer;
pub use snapshot::{SceneState, Snapshot};
