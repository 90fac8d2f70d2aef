//! # Configuration
//!
//! Memo configuration is loaded with [`confique`] in priority order:
//!
//! 1. **Environment variables**: `MEMO_STORAGE_KEY`, `MEMO_DATA_DIR`, ...
//! 2. **Config file**: `memo.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `memo_data` | Key the document is stored under |
//! | `default_folder_name` | `General` | Name of the folder in a fresh document |
//! | `untitled_title` | `Untitled` | Title given to new memos |
//! | `data_dir` | OS data dir | Where the filesystem backend keeps its files |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MemoError, Result};

pub const CONFIG_FILE_NAME: &str = "memo.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MemoConfig {
    /// Key under which the whole document is persisted.
    #[config(default = "memo_data", env = "MEMO_STORAGE_KEY")]
    pub storage_key: String,

    /// Name of the single folder a fresh document starts with.
    #[config(default = "General", env = "MEMO_DEFAULT_FOLDER")]
    pub default_folder_name: String,

    /// Placeholder title for newly created memos.
    #[config(default = "Untitled", env = "MEMO_UNTITLED_TITLE")]
    pub untitled_title: String,

    /// Directory for the filesystem backend. Falls back to the OS data dir.
    #[config(env = "MEMO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            storage_key: "memo_data".to_string(),
            default_folder_name: "General".to_string(),
            untitled_title: "Untitled".to_string(),
            data_dir: None,
        }
    }
}

impl MemoConfig {
    /// Loads env, then the given file (if it exists), then defaults.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder.load().map_err(|e| MemoError::Config(e.to_string()))
    }

    /// Loads using the OS config directory for `memo.toml`.
    pub fn load() -> Result<Self> {
        let file = project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));
        Self::load_from(file.as_deref())
    }

    /// Resolved data directory: the configured one or the OS default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| MemoError::Config("Could not determine a data directory".to_string()))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "memo")
}
