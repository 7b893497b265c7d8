//! Key-value blob storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ramparts_core::errors::PersistError;

/// Local key-value storage of text blobs.
pub trait BlobStore {
    fn put(&mut self, key: &str, blob: &str) -> Result<(), PersistError>;
    /// Fails with `NotFound` for an unknown key.
    fn get(&self, key: &str) -> Result<String, PersistError>;
    /// All stored keys, sorted.
    fn keys(&self) -> Vec<String>;
    /// Deleting a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), PersistError>;
}

/// In-process store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn put(&mut self, key: &str, blob: &str) -> Result<(), PersistError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<String, PersistError> {
        self.blobs
            .get(key)
            .cloned()
            .ok_or_else(|| PersistError::NotFound(key.to_string()))
    }

    fn keys(&self) -> Vec<String> {
        self.blobs.keys().cloned().collect()
    }

    fn delete(&mut self, key: &str) -> Result<(), PersistError> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per blob inside a directory. The directory is
/// created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

/// File-safe, reversible key encoding. ASCII alphanumerics and `-` pass
/// through; every other byte becomes `_XX` in upper-case hex, so distinct
/// keys never share a file and no key escapes the directory.
fn encode_key(key: &str) -> String {
    let mut file = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            file.push(char::from(byte));
        } else {
            file.push_str(&format!("_{byte:02X}"));
        }
    }
    file
}

/// Inverse of `encode_key`. None for file names it could not have produced.
fn decode_key(file: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(file.len());
    let mut rest = file.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'_' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else if byte.is_ascii_alphanumeric() || byte == b'-' {
            bytes.push(byte);
            rest = tail;
        } else {
            return None;
        }
    }
    String::from_utf8(bytes).ok()
}

impl BlobStore for FileStore {
    fn put(&mut self, key: &str, blob: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.blob_path(key), blob)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<String, PersistError> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Err(PersistError::NotFound(key.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).and_then(decode_key))
            .collect();
        keys.sort();
        keys
    }

    fn delete(&mut self, key: &str) -> Result<(), PersistError> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
