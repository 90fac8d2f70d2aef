//! # Domain Model
//!
//! The whole application state is one [`Document`]:
//!
//! ```text
//! {
//!   "folders":  [ { "id", "name", "createdAt" }, ... ],
//!   "memos":    [ { "id", "folderId", "title", "content", "createdAt", "updatedAt" }, ... ],
//!   "settings": { "currentFolderId": string|null, "currentMemoId": string|null }
//! }
//! ```
//!
//! Field names are camelCase on the wire. Timestamps are RFC 3339 UTC strings.
//!
//! ## Invariants
//!
//! - A document always holds at least one folder. The repositories refuse to
//!   delete the last one and imports without folders are rejected.
//! - A memo's `folderId` resolves to an existing folder at the time it is
//!   written. Deleting a folder deletes its memos in the same save.
//! - `folders` keeps insertion order. `memos` has no ordering guarantee; views
//!   sort as they see fit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(name: String) -> Self {
        Self {
            id: generate_id(),
            name,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: String,
    pub folder_id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Memo {
    pub fn new(folder_id: String, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            folder_id,
            title,
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive substring match on title or content.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// Current UI selection. Persisted with the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub current_folder_id: Option<String>,
    pub current_memo_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub folders: Vec<Folder>,
    pub memos: Vec<Memo>,
    #[serde(default)]
    pub settings: Settings,
}

impl Document {
    /// A fresh document with a single folder that is also the current one.
    pub fn initial(folder_name: &str) -> Self {
        let folder = Folder::new(folder_name.to_string());
        let settings = Settings {
            current_folder_id: Some(folder.id.clone()),
            current_memo_id: None,
        };
        Self {
            folders: vec![folder],
            memos: Vec::new(),
            settings,
        }
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn folder_mut(&mut self, id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    pub fn has_folder(&self, id: &str) -> bool {
        self.folder(id).is_some()
    }

    pub fn memo(&self, id: &str) -> Option<&Memo> {
        self.memos.iter().find(|m| m.id == id)
    }

    pub fn memo_mut(&mut self, id: &str) -> Option<&mut Memo> {
        self.memos.iter_mut().find(|m| m.id == id)
    }

    /// Points dangling selections back at something that exists: the first
    /// folder for the current folder, nothing for the current memo.
    pub fn repair_settings(&mut self) {
        let folder_ok = self
            .settings
            .current_folder_id
            .as_deref()
            .is_some_and(|id| self.has_folder(id));
        if !folder_ok {
            self.settings.current_folder_id = self.folders.first().map(|f| f.id.clone());
        }

        let memo_ok = match self.settings.current_memo_id.as_deref() {
            Some(id) => self.memo(id).is_some(),
            None => true,
        };
        if !memo_ok {
            self.settings.current_memo_id = None;
        }
    }
}

/// Partial update for a memo. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl MemoUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
