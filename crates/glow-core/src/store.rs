// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Key-value persistence for UI state that survives between runs.
//!
//! Modelled as a flat string-to-string store: one entry for the selection
//! blob, one for the text-direction flag.  The default backend keeps one file
//! per key under the data directory; tests use the in-memory backend.
//! All calls are synchronous blocking I/O.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;

use glow_config::StoreConfig;

/// Store entry holding the JSON-encoded selection.
pub const SELECTION_KEY: &str = "selected_products";
/// Store entry holding the two-valued text-direction flag.
pub const DIRECTION_KEY: &str = "text_direction";

/// A minimal synchronous key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

// ─── File-backed store ───────────────────────────────────────────────────────

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the store directory from configuration.
    ///
    /// Defaults to `$XDG_DATA_HOME/glow/store` (i.e. `~/.local/share/glow/store`).
    pub fn from_config(cfg: &StoreConfig) -> Self {
        let dir = cfg.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| {
                    dirs::home_dir()
                        .unwrap_or_else(|| PathBuf::from("."))
                        .join(".local")
                        .join("share")
                })
                .join("glow")
                .join("store")
        });
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(text))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating store directory {}", self.dir.display()))?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .with_context(|| format!("writing {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("removing {}", path.display()))?;
        }
        Ok(())
    }
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// HashMap-backed store for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.map.remove(key);
        Ok(())
    }
}

// ─── Text direction flag ─────────────────────────────────────────────────────

/// Two-valued rendering direction, persisted under [`DIRECTION_KEY`] and
/// restored at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn parse(s: &str) -> Option<Direction> {
        match s.trim() {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Restore the persisted direction flag.  Unknown or unreadable values fail
/// soft to the default, with a warning.
pub fn load_direction(store: &dyn KvStore) -> Direction {
    match store.get(DIRECTION_KEY) {
        Ok(Some(text)) => Direction::parse(&text).unwrap_or_else(|| {
            warn!(value = %text, "discarding unrecognized direction flag");
            Direction::default()
        }),
        Ok(None) => Direction::default(),
        Err(e) => {
            warn!(error = %e, "could not read direction flag");
            Direction::default()
        }
    }
}

/// Persist the direction flag.
pub fn save_direction(store: &mut dyn KvStore, dir: Direction) -> anyhow::Result<()> {
    store.set(DIRECTION_KEY, dir.as_str())
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut s = MemoryStore::new();
        assert!(s.get("k").unwrap().is_none());
        s.set("k", "v").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("v"));
        s.remove("k").unwrap();
        assert!(s.get("k").unwrap().is_none());
    }

    #[test]
    fn file_store_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = FileStore::new(tmp.path());
        assert!(s.get("k").unwrap().is_none());
        s.set("k", r#"{"x": 1}"#).unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some(r#"{"x": 1}"#));
        s.remove("k").unwrap();
        assert!(s.get("k").unwrap().is_none());
    }

    #[test]
    fn file_store_creates_directory_on_first_write() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/store");
        let mut s = FileStore::new(&nested);
        s.set("k", "v").unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn remove_of_absent_key_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = FileStore::new(tmp.path());
        assert!(s.remove("nope").is_ok());
    }

    #[test]
    fn direction_parse_accepts_both_values_only() {
        assert_eq!(Direction::parse("ltr"), Some(Direction::Ltr));
        assert_eq!(Direction::parse("rtl"), Some(Direction::Rtl));
        assert_eq!(Direction::parse(" rtl\n"), Some(Direction::Rtl));
        assert!(Direction::parse("sideways").is_none());
    }

    #[test]
    fn direction_round_trips_through_store() {
        let mut s = MemoryStore::new();
        save_direction(&mut s, Direction::Rtl).unwrap();
        assert_eq!(load_direction(&s), Direction::Rtl);
    }

    #[test]
    fn unknown_persisted_direction_falls_back_to_default() {
        let mut s = MemoryStore::new();
        s.set(DIRECTION_KEY, "garbage").unwrap();
        assert_eq!(load_direction(&s), Direction::Ltr);
    }

    #[test]
    fn missing_direction_defaults_to_ltr() {
        let s = MemoryStore::new();
        assert_eq!(load_direction(&s), Direction::Ltr);
    }
}
