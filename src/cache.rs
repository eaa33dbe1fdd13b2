//! Image optimization cache for incremental builds.
//!
//! Re-encoding is the slow part of the images task, and most runs touch only
//! a handful of sources. This module lets the task skip encoding when the
//! source bytes and the encoding parameters haven't changed since the last
//! run.
//!
//! # Cache keys
//!
//! Lookups combine two hashes:
//!
//! - **`source_hash`**: SHA-256 of the source file contents. Content-based
//!   rather than mtime-based so it survives `git checkout` (which resets
//!   modification times).
//! - **`params_hash`**: SHA-256 of the encoding parameters for the source's
//!   format. If a config value changes, the params hash changes and the
//!   image is re-encoded.
//!
//! A cache hit requires an entry with matching hashes for the output path
//! and the previously-written output file still existing on disk.
//!
//! # Storage
//!
//! The manifest is a JSON file at `<dest_dir>/.pressroom-cache.json`. It
//! lives alongside the optimized images so it travels with the staging
//! directory when cached in CI.
//!
//! # Bypassing the cache
//!
//! `--no-cache` on the `build` or `images` command loads an empty manifest,
//! so every image is re-encoded and the old outputs are overwritten.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Name of the cache manifest file within the destination directory.
const MANIFEST_FILENAME: &str = ".pressroom-cache.json";

/// Version of the cache manifest format. Bump this to invalidate all
/// existing caches when the format or key computation changes.
const MANIFEST_VERSION: u32 = 1;

/// A single cached output file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub source_hash: String,
    pub params_hash: String,
}

/// On-disk cache manifest mapping output paths (relative to the destination
/// directory) to their cache entries.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: HashMap<String, CacheEntry>,
}

impl CacheManifest {
    /// Create an empty manifest (used for `--no-cache` or a first run).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from the destination directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(dest_dir: &Path) -> Self {
        let path = dest_dir.join(MANIFEST_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let manifest: Self = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(_) => return Self::empty(),
        };
        if manifest.version != MANIFEST_VERSION {
            return Self::empty();
        }
        manifest
    }

    /// Save to the destination directory.
    pub fn save(&self, dest_dir: &Path) -> io::Result<()> {
        let path = dest_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Whether `output_rel` was produced from this exact source content with
    /// these exact parameters, and the output file still exists.
    pub fn is_hit(
        &self,
        dest_dir: &Path,
        output_rel: &str,
        source_hash: &str,
        params_hash: &str,
    ) -> bool {
        match self.entries.get(output_rel) {
            Some(entry) => {
                entry.source_hash == source_hash
                    && entry.params_hash == params_hash
                    && dest_dir.join(output_rel).exists()
            }
            None => false,
        }
    }

    /// Record an output.
    pub fn insert(&mut self, output_rel: String, source_hash: String, params_hash: String) {
        self.entries.insert(
            output_rel,
            CacheEntry {
                source_hash,
                params_hash,
            },
        );
    }
}

/// Hit/miss counts for one run of the images task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hits, {} misses", self.hits, self.misses)
    }
}

/// SHA-256 of raw bytes, hex-encoded.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// SHA-256 of a parameter description string, hex-encoded.
pub fn hash_params(params: &str) -> String {
    hash_bytes(params.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_manifest_has_current_version() {
        let manifest = CacheManifest::empty();
        assert_eq!(manifest.version, MANIFEST_VERSION);
        assert!(manifest.entries.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = CacheManifest::empty();
        manifest.insert("a.jpg".into(), "s1".into(), "p1".into());
        manifest.save(tmp.path()).unwrap();

        let loaded = CacheManifest::load(tmp.path());
        assert_eq!(loaded.entries.get("a.jpg").unwrap().source_hash, "s1");
    }

    #[test]
    fn load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(CacheManifest::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn load_corrupt_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_FILENAME), "not json").unwrap();
        assert!(CacheManifest::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn load_version_mismatch_is_empty() {
        let tmp = TempDir::new().unwrap();
        let json = r#"{"version": 999, "entries": {"a.jpg": {"source_hash": "s", "params_hash": "p"}}}"#;
        std::fs::write(tmp.path().join(MANIFEST_FILENAME), json).unwrap();
        assert!(CacheManifest::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn hit_requires_matching_hashes_and_existing_output() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = CacheManifest::empty();
        manifest.insert("a.jpg".into(), "s1".into(), "p1".into());

        // Output missing on disk
        assert!(!manifest.is_hit(tmp.path(), "a.jpg", "s1", "p1"));

        std::fs::write(tmp.path().join("a.jpg"), b"bytes").unwrap();
        assert!(manifest.is_hit(tmp.path(), "a.jpg", "s1", "p1"));

        // Changed source or params is a miss
        assert!(!manifest.is_hit(tmp.path(), "a.jpg", "s2", "p1"));
        assert!(!manifest.is_hit(tmp.path(), "a.jpg", "s1", "p2"));
        assert!(!manifest.is_hit(tmp.path(), "b.jpg", "s1", "p1"));
    }

    #[test]
    fn hash_bytes_is_stable_and_content_sensitive() {
        assert_eq!(hash_bytes(b"abc"), hash_bytes(b"abc"));
        assert_ne!(hash_bytes(b"abc"), hash_bytes(b"abd"));
        // Hex-encoded SHA-256
        assert_eq!(hash_bytes(b"").len(), 64);
    }

    #[test]
    fn stats_display() {
        let stats = CacheStats { hits: 3, misses: 1 };
        assert_eq!(stats.to_string(), "3 hits, 1 misses");
    }
}
