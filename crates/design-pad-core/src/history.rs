// Re-exports from design-pad-mod-history.
// Core callers reach the snapshot history through this module.
pub use design_pad_mod_history::{
    HistoryConfig, HistoryError, HistoryManager, PersistenceLayer, SceneState, Snapshot,
};
