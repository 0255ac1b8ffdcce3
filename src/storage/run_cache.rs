//! Last-run cache
//!
//! Remembers the most recently run script per project directory in a flat
//! JSON object (`{"/abs/project/path": "script-name"}`) stored in the user
//! cache directory. The whole file is rewritten on every save.
//!
//! Readers and writers coordinate through a `last-run.lock` file next to the
//! cache. The cache file itself is replaced on save, so it cannot carry the
//! lock.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use super::project_dirs;

/// Cache file name inside the application cache directory
pub const CACHE_FILE: &str = "last-run.json";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine the user cache directory")]
    NoCacheDir,

    #[error("Failed to create cache directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write cache file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize cache")]
    Serialize(#[from] serde_json::Error),
}

/// How a cache load went. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLoad {
    /// The file was read and parsed
    Loaded,
    /// No cache file yet
    Missing,
    /// The file exists but could not be read or parsed; treated as empty
    Unreadable,
}

impl CacheLoad {
    /// Returns true if history was actually found
    pub fn has_history(&self) -> bool {
        matches!(self, CacheLoad::Loaded)
    }
}

/// Directory -> last-run script mapping backed by a JSON file
#[derive(Debug, Clone)]
pub struct RunCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl RunCache {
    /// Creates an empty cache that will be saved at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Returns the default cache file location for this user
    pub fn default_path() -> Result<PathBuf, CacheError> {
        project_dirs()
            .map(|dirs| dirs.cache_dir().join(CACHE_FILE))
            .ok_or(CacheError::NoCacheDir)
    }

    /// Loads the cache at `path`.
    ///
    /// Never fails: a missing, unreadable or malformed file yields an empty
    /// mapping along with a [`CacheLoad`] describing what happened.
    pub fn load(path: impl Into<PathBuf>) -> (Self, CacheLoad) {
        let mut cache = Self::new(path);

        let status = match cache.read_entries() {
            Ok(Some(entries)) => {
                cache.entries = entries;
                CacheLoad::Loaded
            }
            Ok(None) => CacheLoad::Missing,
            Err(_) => CacheLoad::Unreadable,
        };

        (cache, status)
    }

    fn read_entries(&self) -> io::Result<Option<BTreeMap<String, String>>> {
        // No lock file means nothing has been saved with locking yet
        let _guard = match File::open(self.lock_path()) {
            Ok(lock) => {
                lock.lock_shared()?;
                Some(lock)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let entries = serde_json::from_reader(BufReader::new(&file))?;
        Ok(Some(entries))
    }

    /// Returns the path to the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all directory -> script pairs
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the last script run from `dir`, if any
    pub fn last_run(&self, dir: &Path) -> Option<&str> {
        self.entries.get(&Self::key(dir)).map(String::as_str)
    }

    /// Records `script` as the last run for `dir`
    pub fn record(&mut self, dir: &Path, script: &str) {
        self.entries.insert(Self::key(dir), script.to_string());
    }

    fn key(dir: &Path) -> String {
        dir.to_string_lossy().into_owned()
    }

    /// Sidecar file locked while the cache is read or replaced
    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Writes the full mapping back to disk.
    ///
    /// Creates the cache directory if needed, then writes a temp file next to
    /// the target and renames it over the old file while holding the lock
    /// file exclusively. The temp file is removed if the write fails.
    pub fn save(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_vec_pretty(&self.entries)?;

        let write_err = |source| CacheError::Write {
            path: self.path.clone(),
            source,
        };

        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(write_err)?;
        lock.lock_exclusive().map_err(write_err)?;

        let temp_path = self.temp_path();
        if let Err(e) = Self::replace(&temp_path, &self.path, &content) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        Ok(())
    }

    fn replace(temp_path: &Path, target: &Path, content: &[u8]) -> io::Result<()> {
        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(temp_path)?;

            let mut writer = BufWriter::new(&file);
            writer.write_all(content)?;
            writer.flush()?;
        }

        fs::rename(temp_path, target)
    }
}
