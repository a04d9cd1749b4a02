//! Explicit cache for the sample table.
//!
//! Entries are keyed by path and remembered together with the file's
//! identity (length + modification time). An entry is only served while the
//! file on disk still has that identity; any change forces a reload.
//! Missing files are never cached.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::table::loader::{read_csv_file, LoadError, LoadedTable};
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileIdentity {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileIdentity {
    fn of(path: &Path) -> Result<Self, LoadError> {
        let metadata = std::fs::metadata(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

#[derive(Debug)]
struct CachedTable {
    identity: FileIdentity,
    table: Arc<Table>,
}

#[derive(Debug, Default)]
pub struct TableCache {
    entries: RwLock<HashMap<PathBuf, CachedTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the sample table for one interaction. Never fails: a missing,
    /// unreadable or empty file becomes an empty table plus a notice.
    pub fn load_sample(&self, path: &Path) -> LoadedTable {
        LoadedTable::from_result(self.get_or_load(path), &path.display().to_string())
    }

    /// Returns the table at `path`, reading it only if it is not cached or
    /// the file changed since it was cached.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Table>, LoadError> {
        let identity = match FileIdentity::of(path) {
            Ok(identity) => identity,
            Err(e) => {
                self.evict(path);
                return Err(e);
            }
        };

        if let Some(table) = self.lookup(path, identity) {
            debug!("Sample cache hit for {}", path.display());
            return Ok(table);
        }

        let table = Arc::new(read_csv_file(path)?);
        info!(
            "Loaded sample table from {} ({} rows)",
            path.display(),
            table.len()
        );

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                path.to_path_buf(),
                CachedTable {
                    identity,
                    table: Arc::clone(&table),
                },
            );
        }

        Ok(table)
    }

    fn lookup(&self, path: &Path, identity: FileIdentity) -> Option<Arc<Table>> {
        let entries = self.entries.read().ok()?;
        entries
            .get(path)
            .filter(|cached| cached.identity == identity)
            .map(|cached| Arc::clone(&cached.table))
    }

    fn evict(&self, path: &Path) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(path);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_second_load_is_served_from_cache() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Startup_Name\nAcme").unwrap();
        let cache = TableCache::new();

        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_file_is_reloaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Startup_Name\nAcme").unwrap();
        let cache = TableCache::new();

        let first = cache.get_or_load(file.path()).unwrap();
        assert_eq!(first.len(), 1);

        // Appending changes the length even when mtime resolution is coarse.
        writeln!(file, "Bolt").unwrap();
        file.flush().unwrap();

        let second = cache.get_or_load(file.path()).unwrap();
        assert_eq!(second.len(), 2);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_file_is_not_cached() {
        let cache = TableCache::new();
        let err = cache
            .get_or_load(Path::new("/no/such/dir/sample.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_load_sample_reports_missing_file() {
        let cache = TableCache::new();
        let loaded = cache.load_sample(Path::new("/no/such/dir/AutoPitchGPT_with_Pitches.csv"));
        assert!(loaded.table.is_empty());
        let notice = loaded.notice.expect("missing sample must produce a notice");
        assert!(notice.starts_with("Sample file not found"), "notice was: {notice}");
    }

    #[test]
    fn test_load_sample_reports_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Startup_Name,Generated_Pitch").unwrap();
        let cache = TableCache::new();
        let loaded = cache.load_sample(file.path());
        assert!(loaded.table.is_empty());
        assert!(loaded.notice.unwrap().starts_with("No startup rows found"));
    }

    #[test]
    fn test_deleted_file_is_evicted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        std::fs::write(&path, "Startup_Name\nAcme\n").unwrap();
        let cache = TableCache::new();

        cache.get_or_load(&path).unwrap();
        assert_eq!(cache.len(), 1);

        std::fs::remove_file(&path).unwrap();
        assert!(cache.get_or_load(&path).is_err());
        assert_eq!(cache.len(), 0);
    }
}
