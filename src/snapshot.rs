//! Snapshot discovery module
//!
//! Locates rare-bird snapshot files by name pattern and selects the most
//! recently modified one. The directory is re-scanned on every call; nothing
//! is cached between requests, so a snapshot written by the producer is
//! visible immediately.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// File name pattern for snapshot files: `<prefix>*<suffix>`
#[derive(Debug, Clone)]
pub struct SnapshotPattern {
    prefix: String,
    suffix: String,
}

impl SnapshotPattern {
    pub fn new(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    /// Check whether a file name matches the pattern.
    ///
    /// The wildcard part may be empty, so the name must be at least
    /// prefix + suffix long to keep the two from matching overlapping bytes.
    pub fn matches(&self, name: &str) -> bool {
        name.len() >= self.prefix.len() + self.suffix.len()
            && name.starts_with(&self.prefix)
            && name.ends_with(&self.suffix)
    }
}

/// Find the most recently modified snapshot file in `dir`.
///
/// Only regular files whose name matches the pattern are considered. Ties on
/// modification time are broken by file name, greatest name wins, so the
/// result is deterministic for a fixed directory state.
///
/// Returns `None` when no candidate matches. Errors from enumerating the
/// directory propagate; a candidate whose metadata cannot be read (e.g.
/// removed mid-scan by the producer) is skipped.
pub async fn find_latest(
    dir: &Path,
    pattern: &SnapshotPattern,
) -> std::io::Result<Option<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut latest: Option<(SystemTime, String, PathBuf)> = None;

    while let Some(entry) = entries.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            // Non-UTF-8 names cannot match the pattern
            continue;
        };
        if !pattern.matches(&name) {
            continue;
        }
        let Ok(metadata) = entry.metadata().await else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified()?;

        let newer = match &latest {
            Some((top_time, top_name, _)) => {
                (modified, name.as_str()) > (*top_time, top_name.as_str())
            }
            None => true,
        };
        if newer {
            let path = entry.path();
            latest = Some((modified, name, path));
        }
    }

    Ok(latest.map(|(_, _, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::Duration;

    fn pattern() -> SnapshotPattern {
        SnapshotPattern::new("ny_rare_birds_", ".json")
    }

    fn write_file(dir: &Path, name: &str, content: &str, mtime_secs: u64) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
            .unwrap();
        path
    }

    #[test]
    fn test_pattern_matching() {
        let p = pattern();
        assert!(p.matches("ny_rare_birds_20240101.json"));
        assert!(p.matches("ny_rare_birds_.json")); // wildcard matches empty
        assert!(!p.matches("other_data.json"));
        assert!(!p.matches("ny_rare_birds_2024.txt"));
        assert!(!p.matches("ny_rare_birds.json")); // prefix incomplete
        assert!(!p.matches("xny_rare_birds_20240101.json"));
    }

    #[test]
    fn test_pattern_no_overlap() {
        // Too short for prefix and suffix to coexist
        let p = SnapshotPattern::new("data_", "_data");
        assert!(!p.matches("data_data"));
        assert!(p.matches("data__data"));
    }

    #[tokio::test]
    async fn test_selects_newest() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "ny_rare_birds_20240101.json", r#"{"a":1}"#, 100);
        let newest = write_file(dir.path(), "ny_rare_birds_20240215.json", r#"{"a":2}"#, 200);
        write_file(dir.path(), "ny_rare_birds_20240130.json", r#"{"a":3}"#, 150);

        let found = find_latest(dir.path(), &pattern()).await.unwrap();
        assert_eq!(found, Some(newest));
    }

    #[tokio::test]
    async fn test_newest_by_mtime_not_name() {
        let dir = tempfile::tempdir().unwrap();
        // Lexicographically greatest name but oldest mtime
        write_file(dir.path(), "ny_rare_birds_z.json", "{}", 100);
        let newest = write_file(dir.path(), "ny_rare_birds_a.json", "{}", 200);

        let found = find_latest(dir.path(), &pattern()).await.unwrap();
        assert_eq!(found, Some(newest));
    }

    #[tokio::test]
    async fn test_tie_broken_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "ny_rare_birds_a.json", "{}", 100);
        let winner = write_file(dir.path(), "ny_rare_birds_b.json", "{}", 100);

        let found = find_latest(dir.path(), &pattern()).await.unwrap();
        assert_eq!(found, Some(winner));
    }

    #[tokio::test]
    async fn test_non_matching_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "readme.txt", "hello", 500);
        write_file(dir.path(), "other_data.json", "{}", 500);
        let only = write_file(dir.path(), "ny_rare_birds_1.json", "{}", 10);

        let found = find_latest(dir.path(), &pattern()).await.unwrap();
        assert_eq!(found, Some(only));
    }

    #[tokio::test]
    async fn test_matching_directory_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("ny_rare_birds_dir.json")).unwrap();

        let found = find_latest(dir.path(), &pattern()).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let found = find_latest(dir.path(), &pattern()).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(find_latest(&gone, &pattern()).await.is_err());
    }
}
