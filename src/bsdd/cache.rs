//! On-disk cache for bSDD fetches.
//!
//! One JSON blob per fetch, named `{kind}_{sha256(uri)}.json`. The cache is
//! best effort: any IO or decode problem is logged and treated as a miss so
//! a stale or corrupt file can never fail a run.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Which fetch a cached blob belongs to; selects the filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    Dictionary,
    DictionaryClasses,
    Class,
}

impl CacheKind {
    fn prefix(self) -> &'static str {
        match self {
            CacheKind::Dictionary => "dictionary",
            CacheKind::DictionaryClasses => "dictionary_classes",
            CacheKind::Class => "class",
        }
    }
}

/// Hash a URI into a filename-safe identifier.
pub fn uri_to_filename(uri: &str) -> String {
    hex::encode(Sha256::digest(uri.as_bytes()))
}

/// Directory-backed read-through/write-through cache.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    /// Open (and create if needed) a cache rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, kind: CacheKind, uri: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", kind.prefix(), uri_to_filename(uri)))
    }

    /// Load a cached blob; `None` on miss or on any unreadable/corrupt file.
    pub fn load<T: DeserializeOwned>(&self, kind: CacheKind, uri: &str) -> Option<T> {
        let path = self.path_for(kind, uri);
        if !path.exists() {
            return None;
        }
        match read_json(&path) {
            Ok(value) => {
                debug!(uri, path = %path.display(), "cache hit");
                Some(value)
            }
            Err(error) => {
                warn!(uri, %error, "discarding unreadable cache file");
                None
            }
        }
    }

    /// Store a blob; failures are logged, not propagated.
    pub fn store<T: Serialize>(&self, kind: CacheKind, uri: &str, value: &T) {
        let path = self.path_for(kind, uri);
        if let Err(error) = write_json(&path, value) {
            warn!(uri, %error, "failed to write cache file");
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to decode {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string(value).context("Failed to serialize cache entry")?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
