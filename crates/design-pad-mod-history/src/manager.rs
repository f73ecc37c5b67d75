/// Snapshot-based undo/redo manager.
///
/// Every commit appends a full serialized scene to a linear log. Undo and
/// redo move a cursor through the log and restore the scene from the entry
/// under it. Committing after an undo drops the abandoned redo branch.
use std::sync::Arc;

use anyhow::Context;

use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::persistence::PersistenceLayer;
use crate::snapshot::{SceneState, Snapshot};

/// Manages the snapshot timeline of a single design session.
///
/// Invariant: when the log is non-empty, `cursor < log.len()` and
/// `log[cursor]` is the state currently shown in the scene.
pub struct HistoryManager {
    /// Snapshot timeline, oldest first.
    log: Vec<Snapshot>,
    /// Index of the current snapshot. Zero while the log is empty.
    cursor: usize,
    /// Session identifier used as the persistence key.
    session_id: String,
    /// Configuration parameters.
    config: HistoryConfig,
    /// Optional disk persistence (None = in-memory only).
    persistence: Option<Arc<PersistenceLayer>>,
    /// Whether the log or cursor changed since the last flush.
    dirty: bool,
}

impl std::fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("session_id", &self.session_id)
            .field("len", &self.log.len())
            .field("cursor", &self.cursor)
            .field("persistent", &self.persistence.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl HistoryManager {
    /// Creates a new manager with an empty log.
    ///
    /// Pass `persistence: None` for in-memory-only mode.
    pub fn new(
        session_id: String,
        config: HistoryConfig,
        persistence: Option<Arc<PersistenceLayer>>,
    ) -> Self {
        Self {
            log: Vec::new(),
            cursor: 0,
            session_id,
            config,
            persistence,
            dirty: false,
        }
    }

    /// Creates an in-memory-only manager with default config.
    pub fn in_memory() -> Self {
        Self::new(String::from("scratch"), HistoryConfig::default(), None)
    }

    /// Loads a stored log for `session_id`, or creates an empty manager.
    ///
    /// A stored cursor that points past the stored log is clamped to the
    /// last snapshot. The scene is not restored here; callers decide
    /// whether to apply [`current`](Self::current) to their scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the persistence layer fails to read.
    pub fn load_or_new(
        session_id: String,
        config: HistoryConfig,
        persistence: Option<Arc<PersistenceLayer>>,
    ) -> Result<Self, HistoryError> {
        let mut manager = Self::new(session_id, config, persistence);

        let stored = match &manager.persistence {
            Some(pl) => pl
                .read_log(&manager.session_id)
                .context("Failed to load history from disk")?,
            None => None,
        };

        if let Some((log, cursor)) = stored {
            if !log.is_empty() {
                manager.cursor = cursor.min(log.len() - 1);
                manager.log = log;
                manager.enforce_depth();
            }
        }

        tracing::debug!(
            "Loaded history for {}: {} snapshots, cursor {}",
            manager.session_id,
            manager.log.len(),
            manager.cursor
        );
        Ok(manager)
    }

    /// Returns the session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Captures the scene and appends it as the new current snapshot.
    ///
    /// The scene is captured before the log is touched, so a capture
    /// failure leaves log and cursor unchanged. On success every snapshot
    /// after the cursor is discarded first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Serialization`] if the scene cannot be
    /// captured. The edit stays applied to the scene but is not recorded.
    pub fn commit<S: SceneState>(&mut self, scene: &S) -> Result<(), HistoryError> {
        let snapshot = scene.capture().map_err(HistoryError::serialization)?;

        if !self.log.is_empty() && self.cursor < self.log.len() - 1 {
            let pruned = self.log.len() - 1 - self.cursor;
            self.log.truncate(self.cursor + 1);
            tracing::debug!("Pruned {pruned} redo snapshots");
        }

        self.log.push(snapshot);
        self.cursor = self.log.len() - 1;
        self.enforce_depth();
        self.dirty = true;
        tracing::debug!("Committed snapshot {} of {}", self.cursor, self.log.len());
        Ok(())
    }

    /// Steps back one snapshot and restores the scene from it.
    ///
    /// Returns `Ok(false)` without touching anything when already at the
    /// first snapshot or when the log is empty.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Restore`] if the scene rejects the snapshot.
    /// Cursor, log and scene are then unchanged.
    pub fn undo<S: SceneState>(&mut self, scene: &mut S) -> Result<bool, HistoryError> {
        if !self.can_undo() {
            return Ok(false);
        }
        self.move_to(self.cursor - 1, scene)?;
        Ok(true)
    }

    /// Steps forward one snapshot and restores the scene from it.
    ///
    /// Returns `Ok(false)` without touching anything when already at the
    /// last snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Restore`] if the scene rejects the snapshot.
    /// Cursor, log and scene are then unchanged.
    pub fn redo<S: SceneState>(&mut self, scene: &mut S) -> Result<bool, HistoryError> {
        if !self.can_redo() {
            return Ok(false);
        }
        self.move_to(self.cursor + 1, scene)?;
        Ok(true)
    }

    /// Whether there is an earlier snapshot to go back to.
    pub fn can_undo(&self) -> bool {
        !self.log.is_empty() && self.cursor > 0
    }

    /// Whether there is a later snapshot to go forward to.
    pub fn can_redo(&self) -> bool {
        !self.log.is_empty() && self.cursor < self.log.len() - 1
    }

    /// Index of the current snapshot (zero for an empty log).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// The snapshot under the cursor, if any.
    pub fn current(&self) -> Option<&Snapshot> {
        self.log.get(self.cursor)
    }

    /// Read-only view of the whole timeline.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.log
    }

    /// Clears all history from disk and memory.
    ///
    /// Disk goes first; the in-memory log is kept when that fails.
    ///
    /// # Errors
    ///
    /// Returns an error if disk cleanup fails.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        if let Some(pl) = &self.persistence {
            pl.delete_session(&self.session_id)
                .context("Failed to clear history from disk")?;
        }

        self.log.clear();
        self.cursor = 0;
        self.dirty = false;
        Ok(())
    }

    /// Writes the log and cursor to disk.
    ///
    /// No-op if the manager is in-memory-only or nothing has changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the disk write fails.
    pub fn flush(&mut self) -> Result<(), HistoryError> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(pl) = &self.persistence {
            pl.write_log(&self.session_id, &self.log, self.cursor)
                .context("Failed to flush history to disk")?;
            self.dirty = false;
        }
        Ok(())
    }

    /// Deletes all persisted history for this session.
    ///
    /// # Errors
    ///
    /// Returns an error if disk cleanup fails.
    pub fn delete_history(&mut self) -> Result<(), HistoryError> {
        self.clear()
    }

    /// Restores `index` into the scene and moves the cursor there on success.
    fn move_to<S: SceneState>(&mut self, index: usize, scene: &mut S) -> Result<(), HistoryError> {
        let snapshot = &self.log[index];
        scene
            .restore(snapshot)
            .map_err(|e| HistoryError::restore(index, e))?;
        tracing::debug!("Moved history cursor {} -> {index}", self.cursor);
        self.cursor = index;
        self.dirty = true;
        Ok(())
    }

    /// Evicts the oldest snapshots beyond the configured depth.
    fn enforce_depth(&mut self) {
        if !self.config.over_capacity(self.log.len()) {
            return;
        }
        let excess = self.log.len() - self.config.max_history_depth;
        self.log.drain(..excess);
        self.cursor = self.cursor.saturating_sub(excess);
        tracing::debug!("Evicted {excess} oldest snapshots");
    }
}
