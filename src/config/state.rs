// Application state module
// Runtime state shared across connections

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use super::types::Config;
use crate::snapshot::SnapshotPattern;

/// Application state
///
/// Built once at startup and shared read-only by every connection task.
pub struct AppState {
    pub config: Config,
    /// Directory scanned for snapshot files
    pub snapshot_dir: PathBuf,
    /// Snapshot file name pattern
    pub pattern: SnapshotPattern,

    // Cached config values for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let snapshot_dir = PathBuf::from(&config.data.dir);
        let pattern = SnapshotPattern::new(&config.data.file_prefix, &config.data.file_suffix);
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Self {
            config,
            snapshot_dir,
            pattern,
            cached_access_log,
        }
    }
}
