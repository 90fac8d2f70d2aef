use crate::error::{MemoError, Result};
use crate::model::{Memo, MemoUpdate};
use crate::store::{DocumentStore, KvBackend};
use chrono::Utc;
use tracing::{debug, warn};

/// CRUD, search and move over the memos of the document.
pub struct MemoRepository<'a, B: KvBackend> {
    store: &'a DocumentStore<B>,
}

impl<'a, B: KvBackend> MemoRepository<'a, B> {
    pub fn new(store: &'a DocumentStore<B>) -> Self {
        Self { store }
    }

    /// All memos in storage order.
    pub fn get_all(&self) -> Vec<Memo> {
        self.store.load().memos
    }

    /// Memos whose folder id matches exactly. An unknown folder yields nothing.
    pub fn get_by_folder(&self, folder_id: &str) -> Vec<Memo> {
        self.store
            .load()
            .memos
            .into_iter()
            .filter(|m| m.folder_id == folder_id)
            .collect()
    }

    pub fn get_by_id(&self, memo_id: &str) -> Option<Memo> {
        self.store.load().memo(memo_id).cloned()
    }

    /// Create an empty memo titled with the configured placeholder.
    ///
    /// The folder must exist.
    pub fn create(&self, folder_id: &str) -> Result<Memo> {
        let title = self.store.untitled_title().to_string();
        let memo = self.store.update(|doc| {
            if !doc.has_folder(folder_id) {
                warn!(folder_id, "cannot create memo in unknown folder");
                return Err(MemoError::FolderNotFound(folder_id.to_string()));
            }
            let memo = Memo::new(folder_id.to_string(), title);
            doc.memos.push(memo.clone());
            Ok(memo)
        })?;
        debug!(memo_id = %memo.id, folder_id, "memo created");
        Ok(memo)
    }

    /// Merge `updates` into the memo. `updated_at` is refreshed even when
    /// nothing actually changed.
    pub fn update(&self, memo_id: &str, updates: MemoUpdate) -> Result<Memo> {
        self.store.update(|doc| {
            let Some(memo) = doc.memo_mut(memo_id) else {
                warn!(memo_id, "update of unknown memo ignored");
                return Err(MemoError::MemoNotFound(memo_id.to_string()));
            };
            if let Some(title) = updates.title {
                memo.title = title;
            }
            if let Some(content) = updates.content {
                memo.content = content;
            }
            memo.updated_at = Utc::now();
            Ok(memo.clone())
        })
    }

    /// Remove a memo, clearing the selection if it pointed at it.
    pub fn delete(&self, memo_id: &str) -> Result<()> {
        self.store.update(|doc| {
            let before = doc.memos.len();
            doc.memos.retain(|m| m.id != memo_id);
            if doc.memos.len() == before {
                warn!(memo_id, "delete of unknown memo ignored");
                return Err(MemoError::MemoNotFound(memo_id.to_string()));
            }
            if doc.settings.current_memo_id.as_deref() == Some(memo_id) {
                doc.settings.current_memo_id = None;
            }
            Ok(())
        })?;
        debug!(memo_id, "memo deleted");
        Ok(())
    }

    /// Case-insensitive substring search over title and content.
    ///
    /// A blank query returns every memo, in storage order.
    pub fn search(&self, query: &str) -> Vec<Memo> {
        let memos = self.store.load().memos;
        if query.trim().is_empty() {
            return memos;
        }

        let needle = query.to_lowercase();
        memos.into_iter().filter(|m| m.matches(&needle)).collect()
    }

    /// Move a memo to another folder. Both must exist.
    pub fn move_to_folder(&self, memo_id: &str, new_folder_id: &str) -> Result<Memo> {
        let memo = self.store.update(|doc| {
            if !doc.has_folder(new_folder_id) {
                warn!(memo_id, folder_id = new_folder_id, "move to unknown folder ignored");
                return Err(MemoError::FolderNotFound(new_folder_id.to_string()));
            }
            let Some(memo) = doc.memo_mut(memo_id) else {
                warn!(memo_id, "move of unknown memo ignored");
                return Err(MemoError::MemoNotFound(memo_id.to_string()));
            };
            memo.folder_id = new_folder_id.to_string();
            memo.updated_at = Utc::now();
            Ok(memo.clone())
        })?;
        debug!(memo_id, folder_id = new_folder_id, "memo moved");
        Ok(memo)
    }
}
