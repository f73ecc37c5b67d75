/// Configuration and utility functions for the history system.
use std::path::{Path, PathBuf};

/// Maximum number of snapshots kept per session.
/// Oldest snapshots are evicted when this limit is exceeded.
const DEFAULT_MAX_HISTORY_DEPTH: usize = 1_000;

/// Environment variable overriding the persistence directory.
const DATA_DIR_ENV: &str = "DESIGN_PAD_DATA_DIR";

/// Configuration for the history system.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Max snapshots per session. `0` keeps every snapshot.
    pub max_history_depth: usize,
    /// Root directory for the persistence database.
    pub data_dir: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
            data_dir: resolve_data_dir(),
        }
    }
}

impl HistoryConfig {
    /// Config that never evicts, for callers that want the full timeline.
    pub fn unbounded() -> Self {
        Self {
            max_history_depth: 0,
            ..Self::default()
        }
    }

    /// Whether the given log length exceeds the configured depth.
    pub(crate) fn over_capacity(&self, len: usize) -> bool {
        self.max_history_depth != 0 && len > self.max_history_depth
    }
}

/// Resolves the data directory path.
///
/// Resolution order:
/// 1. `DESIGN_PAD_DATA_DIR` environment variable
/// 2. `design-pad/` under the platform data directory
/// 3. `.data/` directory next to the executable
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = dirs::data_dir() {
        return dir.join("design-pad");
    }
    let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
    exe.parent().unwrap_or(Path::new(".")).join(".data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HistoryConfig::default();
        assert_eq!(config.max_history_depth, 1_000);
    }

    #[test]
    fn test_unbounded_never_over_capacity() {
        let config = HistoryConfig::unbounded();
        assert!(!config.over_capacity(usize::MAX));
    }

    #[test]
    fn test_over_capacity_boundary() {
        let config = HistoryConfig {
            max_history_depth: 3,
            data_dir: PathBuf::from("."),
        };
        assert!(!config.over_capacity(3));
        assert!(config.over_capacity(4));
    }

    #[test]
    fn test_resolve_data_dir_with_env_var() {
        let original = std::env::var(DATA_DIR_ENV).ok();
        std::env::set_var(DATA_DIR_ENV, "/custom/path");
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/custom/path"));
        match original {
            Some(val) => std::env::set_var(DATA_DIR_ENV, val),
            None => std::env::remove_var(DATA_DIR_ENV),
        }
    }
}
