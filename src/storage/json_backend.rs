use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::errors::{LedgerError, Result};

use super::KeyValueStore;

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed store keeping one JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), BLOB_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(LedgerError::Io(err)),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|err| LedgerError::StoreRead(format!("{}: {err}", path.display())))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = tmp_path(&path);
        if let Err(err) = write_atomic(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path).map_err(LedgerError::from))
        {
            let _ = fs::remove_file(&tmp);
            return Err(LedgerError::StoreWrite(format!(
                "{}: {err}",
                path.display()
            )));
        }
        debug!(path = %path.display(), bytes = value.len(), "blob written");
        Ok(())
    }

    /// Copies the file byte for byte.
    fn copy_entry(&self, from: &str, to: &str) -> Result<bool> {
        let source = self.path_for(from);
        let target = self.path_for(to);
        let tmp = tmp_path(&target);
        let copied = match fs::copy(&source, &tmp) {
            Err(err) if err.kind() == ErrorKind::NotFound && !source.exists() => {
                return Ok(false)
            }
            result => result.and_then(|bytes| fs::rename(&tmp, &target).map(|_| bytes)),
        };
        match copied {
            Ok(bytes) => {
                debug!(from = %source.display(), to = %target.display(), bytes, "blob copied");
                Ok(true)
            }
            Err(err) => {
                let _ = fs::remove_file(&tmp);
                Err(LedgerError::StoreWrite(format!("{}: {err}", target.display())))
            }
        }
    }
}

/// Maps an arbitrary key onto a safe file stem.
fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '.' => c,
            _ => '_',
        })
        .collect();
    let sanitized = sanitized.trim_start_matches('.').to_string();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
