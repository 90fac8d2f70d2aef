//! # API Facade
//!
//! [`MemoApi`] owns the [`DocumentStore`] and is the single entry point for UI
//! clients. It hands out the repositories and adds the handful of compound
//! actions a front end needs (selecting a memo also selects its folder, new
//! memos land in the current folder, lists come newest-first).
//!
//! ## What the API Does NOT Do
//!
//! - **Rendering**: returns data, never strings for display (except
//!   [`MemoApi::debug_dump`]).
//! - **Terminal I/O**: no stdout, no prompts, no exit codes.
//!
//! ## Generic Over KvBackend
//!
//! - Production: `MemoApi<FsBackend>`
//! - Testing: `MemoApi<MemBackend>`

use crate::config::MemoConfig;
use crate::error::{MemoError, Result};
use crate::model::{Folder, Memo};
use crate::repo::{FolderRepository, MemoRepository, SettingsRepository, TransferRepository};
use crate::store::{DocumentStore, FsBackend, KvBackend};
use tracing::{debug, info, warn};

pub struct MemoApi<B: KvBackend> {
    store: DocumentStore<B>,
}

impl MemoApi<FsBackend> {
    /// Filesystem-backed API rooted at the configured data directory.
    pub fn open(config: &MemoConfig) -> Result<Self> {
        let dir = config.data_dir()?;
        debug!(data_dir = %dir.display(), "opening memo store");
        Self::new(DocumentStore::new(FsBackend::new(dir), config))
    }
}

impl<B: KvBackend> MemoApi<B> {
    /// Wrap a store, persisting the default document if nothing usable is
    /// stored yet. Reads through the API then always see the same folder ids.
    pub fn new(store: DocumentStore<B>) -> Result<Self> {
        store.ensure_persisted()?;
        Ok(Self { store })
    }

    pub fn store(&self) -> &DocumentStore<B> {
        &self.store
    }

    pub fn folders(&self) -> FolderRepository<'_, B> {
        FolderRepository::new(&self.store)
    }

    pub fn memos(&self) -> MemoRepository<'_, B> {
        MemoRepository::new(&self.store)
    }

    pub fn settings(&self) -> SettingsRepository<'_, B> {
        SettingsRepository::new(&self.store)
    }

    pub fn transfer(&self) -> TransferRepository<'_, B> {
        TransferRepository::new(&self.store)
    }

    /// Startup routine.
    ///
    /// Persists a fresh document if the stored one has no folders (or there is
    /// none), then clears the current memo so a session starts with nothing
    /// open.
    pub fn initialize(&self) -> Result<()> {
        self.store.update(|doc| {
            if doc.folders.is_empty() {
                info!("no folders found, creating initial data");
                *doc = self.store.initial_document();
            }
            doc.repair_settings();
            doc.settings.current_memo_id = None;
            Ok(())
        })
    }

    /// The selected folder, if it still exists.
    pub fn current_folder(&self) -> Option<Folder> {
        let doc = self.store.load();
        let id = doc.settings.current_folder_id.as_deref()?;
        doc.folder(id).cloned()
    }

    /// The selected memo, if any.
    pub fn current_memo(&self) -> Option<Memo> {
        let doc = self.store.load();
        let id = doc.settings.current_memo_id.as_deref()?;
        doc.memo(id).cloned()
    }

    /// Create a folder, select it and clear the memo selection.
    pub fn create_folder_and_select(&self, name: &str) -> Result<Folder> {
        let folder = self.folders().create(name)?;
        self.select_folder(&folder.id)?;
        Ok(folder)
    }

    /// Select a folder; the open memo is closed.
    pub fn select_folder(&self, folder_id: &str) -> Result<()> {
        self.store.update(|doc| {
            if !doc.has_folder(folder_id) {
                warn!(folder_id, "select of unknown folder ignored");
                return Err(MemoError::FolderNotFound(folder_id.to_string()));
            }
            doc.settings.current_folder_id = Some(folder_id.to_string());
            doc.settings.current_memo_id = None;
            Ok(())
        })
    }

    /// Create a memo in the current folder and open it, in one save.
    pub fn create_memo_in_current_folder(&self) -> Result<Memo> {
        let title = self.store.untitled_title().to_string();
        let memo = self.store.update(|doc| {
            let Some(folder_id) = doc
                .settings
                .current_folder_id
                .clone()
                .filter(|id| doc.has_folder(id))
            else {
                warn!("cannot create memo: no current folder");
                return Err(MemoError::FolderNotFound("<none selected>".to_string()));
            };
            let memo = Memo::new(folder_id, title);
            doc.memos.push(memo.clone());
            doc.settings.current_memo_id = Some(memo.id.clone());
            Ok(memo)
        })?;
        debug!(memo_id = %memo.id, folder_id = %memo.folder_id, "memo created and opened");
        Ok(memo)
    }

    /// Open a memo: select it and the folder it lives in.
    pub fn open_memo(&self, memo_id: &str) -> Result<Memo> {
        self.store.update(|doc| {
            let Some(memo) = doc.memo(memo_id).cloned() else {
                warn!(memo_id, "open of unknown memo ignored");
                return Err(MemoError::MemoNotFound(memo_id.to_string()));
            };
            doc.settings.current_memo_id = Some(memo.id.clone());
            doc.settings.current_folder_id = Some(memo.folder_id.clone());
            Ok(memo)
        })
    }

    /// Move a memo and follow it: the target folder becomes current.
    pub fn move_memo_and_follow(&self, memo_id: &str, folder_id: &str) -> Result<Memo> {
        let memo = self.memos().move_to_folder(memo_id, folder_id)?;
        self.settings().set_current_folder_id(Some(folder_id))?;
        Ok(memo)
    }

    /// Memos of a folder, most recently updated first.
    pub fn recent_memos(&self, folder_id: &str) -> Vec<Memo> {
        sort_recent(self.memos().get_by_folder(folder_id))
    }

    /// Search results, most recently updated first.
    pub fn search_recent(&self, query: &str) -> Vec<Memo> {
        sort_recent(self.memos().search(query))
    }

    /// Pretty JSON of the current document, for diagnostics.
    pub fn debug_dump(&self) -> Result<String> {
        self.transfer().export()
    }
}

fn sort_recent(mut memos: Vec<Memo>) -> Vec<Memo> {
    memos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    memos
}
