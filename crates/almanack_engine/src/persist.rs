use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cache directory missing or not writable: {0}")]
    CacheDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("cached entry is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ensure the cache directory exists; create if missing.
pub fn ensure_cache_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::CacheDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::CacheDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::CacheDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_cache_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Small key/value store for JSON entries that outlive the process.
pub trait LocalStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistError>;
    fn store(&self, key: &str, value: &Value) -> Result<(), PersistError>;
}

/// Keeps each entry as `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
    writer: AtomicFileWriter,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.clone()),
            dir,
        }
    }

    fn filename(key: &str) -> String {
        let stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{stem}.json")
    }
}

impl LocalStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistError> {
        let path = self.dir.join(Self::filename(key));
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn store(&self, key: &str, value: &Value) -> Result<(), PersistError> {
        let content = serde_json::to_vec(value)?;
        self.writer.write(&Self::filename(key), &content)?;
        Ok(())
    }
}
