//! On-disk joke snapshot store.
//!
//! The list itself never touches the disk; `main` loads a snapshot at
//! startup to pre-populate it and saves one on quit.  The format is a plain
//! JSON array of [`JokeItem`] in the user data directory, so a broken or
//! missing file costs nothing but the previous session's jokes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::source::JokeItem;

pub struct JokeStore {
    path: PathBuf,
}

impl JokeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<user data dir>/jokescroll/jokes.json`, falling back to the system
    /// temp directory when no data dir is known.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("jokescroll")
            .join("jokes.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted snapshot.  A store that has never been written is
    /// not an error — it is an empty list.
    pub fn load(&self) -> Result<Vec<JokeItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading joke store at {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing joke store at {}", self.path.display()))
    }

    /// Replace the persisted snapshot with `jokes`.
    ///
    /// Writes to a sibling temp file first and renames it into place so a
    /// crash mid-write cannot truncate the previous snapshot.
    pub fn save(&self, jokes: &[JokeItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating store directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(jokes)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("writing joke store at {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing joke store at {}", self.path.display()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
