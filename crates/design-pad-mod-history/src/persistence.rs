/// Disk persistence layer backed by redb.
///
/// Uses a single redb database file with two tables:
/// - `snapshots`: bincode-serialized `Snapshot` entries keyed by `(session_id, index)`
/// - `meta`: per-session cursor and log length keyed by `session_id`
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::snapshot::Snapshot;

/// Snapshot table: (session_id, log index) → bincode-serialized Snapshot.
const SNAPSHOT_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("snapshots");

/// Metadata table: session_id → bincode-serialized SessionMeta.
const META_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("meta");

/// Per-session metadata persisted alongside the log.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct SessionMeta {
    cursor: usize,
    len: usize,
}

/// Inclusive key bounds covering every snapshot of exactly one session.
fn session_bounds(session_id: &str) -> std::ops::RangeInclusive<(&str, u64)> {
    (session_id, 0)..=(session_id, u64::MAX)
}

/// Removes every snapshot row of a session inside an open write transaction.
fn remove_session_rows(
    table: &mut redb::Table<(&str, u64), &[u8]>,
    session_id: &str,
) -> Result<usize> {
    let indices: Vec<u64> = table
        .range::<(&str, u64)>(session_bounds(session_id))
        .context("Failed to range query snapshot table")?
        .filter_map(|entry| entry.ok().map(|(k, _)| k.value().1))
        .collect();

    for index in &indices {
        table
            .remove((session_id, *index))
            .context("Failed to remove snapshot entry")?;
    }
    Ok(indices.len())
}

/// Persistence layer for snapshot history backed by redb.
///
/// Shared across sessions via `Arc<PersistenceLayer>`.
pub struct PersistenceLayer {
    db: Database,
}

impl std::fmt::Debug for PersistenceLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceLayer").finish()
    }
}

impl PersistenceLayer {
    /// Opens or creates the history database in the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the database
    /// cannot be opened.
    pub fn open(data_dir: &Path) -> Result<Arc<Self>> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("design-history.redb");
        let db = Database::create(&db_path)
            .with_context(|| format!("Failed to open history database: {}", db_path.display()))?;

        let write_txn = db
            .begin_write()
            .context("Failed to begin initial write transaction")?;
        {
            let _ = write_txn
                .open_table(SNAPSHOT_TABLE)
                .context("Failed to create snapshot table")?;
            let _ = write_txn
                .open_table(META_TABLE)
                .context("Failed to create meta table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial transaction")?;

        Ok(Arc::new(Self { db }))
    }

    /// Replaces the stored log and cursor of a session.
    ///
    /// Old rows are removed and the new log written in a single transaction,
    /// so a pruned redo branch never lingers on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write transaction fails.
    pub fn write_log(&self, session_id: &str, log: &[Snapshot], cursor: usize) -> Result<()> {
        let meta = SessionMeta {
            cursor,
            len: log.len(),
        };
        let meta_bytes = bincode::serialize(&meta).context("Failed to serialize session meta")?;

        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(SNAPSHOT_TABLE)
                .context("Failed to open snapshot table")?;
            remove_session_rows(&mut table, session_id)?;
            for (index, snapshot) in log.iter().enumerate() {
                let bytes = bincode::serialize(snapshot).context("Failed to serialize snapshot")?;
                table
                    .insert((session_id, index as u64), bytes.as_slice())
                    .context("Failed to insert snapshot")?;
            }
        }
        {
            let mut meta_table = write_txn
                .open_table(META_TABLE)
                .context("Failed to open meta table")?;
            meta_table
                .insert(session_id, meta_bytes.as_slice())
                .context("Failed to insert session meta")?;
        }
        write_txn
            .commit()
            .context("Failed to commit write transaction")?;
        Ok(())
    }

    /// Reads the stored log and cursor of a session.
    ///
    /// Returns `None` if nothing was ever written for this session.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction or deserialization fails.
    pub fn read_log(&self, session_id: &str) -> Result<Option<(Vec<Snapshot>, usize)>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let meta_table = read_txn
            .open_table(META_TABLE)
            .context("Failed to open meta table")?;
        let meta: SessionMeta = match meta_table
            .get(session_id)
            .context("Failed to read session meta")?
        {
            Some(guard) => bincode::deserialize(guard.value())
                .context("Failed to deserialize session meta")?,
            None => return Ok(None),
        };

        let table = read_txn
            .open_table(SNAPSHOT_TABLE)
            .context("Failed to open snapshot table")?;
        let mut log = Vec::with_capacity(meta.len);
        for entry in table
            .range::<(&str, u64)>(session_bounds(session_id))
            .context("Failed to range query snapshot table")?
        {
            let (_, value_guard) = entry.context("Failed to read snapshot entry")?;
            let snapshot: Snapshot = bincode::deserialize(value_guard.value())
                .context("Failed to deserialize snapshot")?;
            log.push(snapshot);
        }

        if log.len() != meta.len {
            tracing::warn!(
                "Session {session_id} meta expects {} snapshots, found {}",
                meta.len,
                log.len()
            );
        }

        Ok(Some((log, meta.cursor)))
    }

    /// Counts the snapshots stored for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    pub fn count_snapshots(&self, session_id: &str) -> Result<usize> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(SNAPSHOT_TABLE)
            .context("Failed to open snapshot table")?;

        let count = table
            .range::<(&str, u64)>(session_bounds(session_id))
            .context("Failed to range query for count")?
            .count();

        Ok(count)
    }

    /// Removes all snapshots and metadata for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    pub fn delete_session(&self, session_id: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(SNAPSHOT_TABLE)
                .context("Failed to open snapshot table")?;
            remove_session_rows(&mut table, session_id)?;
        }
        {
            let mut meta_table = write_txn
                .open_table(META_TABLE)
                .context("Failed to open meta table")?;
            let _ = meta_table.remove(session_id);
        }
        write_txn.commit().context("Failed to commit deletion")?;
        Ok(())
    }

    /// Lists all session IDs that have stored metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    pub fn list_sessions(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(META_TABLE)
            .context("Failed to open meta table")?;

        let mut ids = Vec::new();
        for entry in table.iter().context("Failed to iterate meta table")? {
            let (key_guard, _) = entry.context("Failed to read meta entry")?;
            ids.push(key_guard.value().to_string());
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn snaps(names: &[&str]) -> Vec<Snapshot> {
        names.iter().map(|n| Snapshot::new(*n)).collect()
    }

    fn open_test_db() -> (Arc<PersistenceLayer>, TempDir) {
        let dir = TempDir::new().expect("create temp dir");
        let pl = PersistenceLayer::open(dir.path()).expect("open db");
        (pl, dir)
    }

    #[test]
    fn test_open_creates_database() {
        let (pl, _dir) = open_test_db();
        assert!(pl.list_sessions().expect("list").is_empty());
    }

    #[test]
    fn test_write_and_read_log() {
        let (pl, _dir) = open_test_db();
        pl.write_log("s1", &snaps(&["a", "b", "c"]), 1)
            .expect("write");

        let (log, cursor) = pl.read_log("s1").expect("read").expect("exists");
        assert_eq!(log, snaps(&["a", "b", "c"]));
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_read_unknown_session_is_none() {
        let (pl, _dir) = open_test_db();
        assert!(pl.read_log("missing").expect("read").is_none());
    }

    #[test]
    fn test_rewrite_with_shorter_log_drops_old_rows() {
        let (pl, _dir) = open_test_db();
        pl.write_log("s", &snaps(&["a", "b", "c"]), 2)
            .expect("write");
        pl.write_log("s", &snaps(&["a", "d"]), 1).expect("rewrite");

        assert_eq!(pl.count_snapshots("s").expect("count"), 2);
        let (log, cursor) = pl.read_log("s").expect("read").expect("exists");
        assert_eq!(log, snaps(&["a", "d"]));
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_order_survives_more_than_ten_entries() {
        let (pl, _dir) = open_test_db();
        let names: Vec<String> = (0..25).map(|i| format!("s{i}")).collect();
        let log: Vec<Snapshot> = names.iter().map(|n| Snapshot::new(n.as_str())).collect();
        pl.write_log("big", &log, 24).expect("write");

        let (loaded, _) = pl.read_log("big").expect("read").expect("exists");
        assert_eq!(loaded, log);
    }

    #[test]
    fn test_delete_session() {
        let (pl, _dir) = open_test_db();
        pl.write_log("gone", &snaps(&["a"]), 0).expect("write");
        pl.delete_session("gone").expect("delete");

        assert!(pl.read_log("gone").expect("read").is_none());
        assert_eq!(pl.count_snapshots("gone").expect("count"), 0);
    }

    #[test]
    fn test_session_isolation() {
        let (pl, _dir) = open_test_db();
        pl.write_log("doc-a", &snaps(&["a1", "a2"]), 1)
            .expect("write a");
        pl.write_log("doc-b", &snaps(&["b1"]), 0).expect("write b");

        pl.delete_session("doc-a").expect("delete a");
        let (b, _) = pl.read_log("doc-b").expect("read b").expect("exists");
        assert_eq!(b, snaps(&["b1"]));

        let mut sessions = pl.list_sessions().expect("list");
        sessions.sort();
        assert_eq!(sessions, vec!["doc-b"]);
    }

    #[test]
    fn test_ids_sharing_a_prefix_stay_separate() {
        let (pl, _dir) = open_test_db();
        pl.write_log("poster", &snaps(&["p0"]), 0).expect("write poster");
        pl.write_log("poster#2", &snaps(&["x0", "x1"]), 1)
            .expect("write poster#2");
        pl.write_log("poster$", &snaps(&["y0"]), 0).expect("write poster$");

        let (log, _) = pl.read_log("poster").expect("read").expect("exists");
        assert_eq!(log, snaps(&["p0"]));
        assert_eq!(pl.count_snapshots("poster").expect("count"), 1);

        pl.write_log("poster", &snaps(&["p0", "p1"]), 1)
            .expect("rewrite poster");
        pl.delete_session("poster").expect("delete poster");
        assert_eq!(pl.count_snapshots("poster#2").expect("count"), 2);
        let (log, cursor) = pl.read_log("poster#2").expect("read").expect("exists");
        assert_eq!(log, snaps(&["x0", "x1"]));
        assert_eq!(cursor, 1);
        assert_eq!(pl.count_snapshots("poster$").expect("count"), 1);
    }

    #[test]
    fn test_reopen_database_preserves_data() {
        let dir = TempDir::new().expect("create temp dir");
        {
            let pl = PersistenceLayer::open(dir.path()).expect("open");
            pl.write_log("doc", &snaps(&["persistent"]), 0)
                .expect("write");
        }
        {
            let pl = PersistenceLayer::open(dir.path()).expect("reopen");
            let (log, cursor) = pl.read_log("doc").expect("read").expect("exists");
            assert_eq!(log, snaps(&["persistent"]));
            assert_eq!(cursor, 0);
        }
    }
}
