//! # Document Store
//!
//! The persistence gateway. Reads and writes the whole [`Document`] under a
//! single key of a [`KvBackend`].
//!
//! Failure policy:
//! - **Load never fails.** Missing, unreadable or unparsable data is logged and
//!   replaced by [`DocumentStore::initial_document`].
//! - **Save reports.** A failed write is logged and returned to the caller; the
//!   previously persisted text is left as it was.

use super::backend::KvBackend;
use crate::config::MemoConfig;
use crate::error::Result;
use crate::model::Document;
use tracing::{debug, error, warn};

pub struct DocumentStore<B: KvBackend> {
    backend: B,
    key: String,
    default_folder_name: String,
    untitled_title: String,
}

impl<B: KvBackend> DocumentStore<B> {
    pub fn new(backend: B, config: &MemoConfig) -> Self {
        Self {
            backend,
            key: config.storage_key.clone(),
            default_folder_name: config.default_folder_name.clone(),
            untitled_title: config.untitled_title.clone(),
        }
    }

    /// Store with compiled-in defaults.
    pub fn with_backend(backend: B) -> Self {
        Self::new(backend, &MemoConfig::default())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn untitled_title(&self) -> &str {
        &self.untitled_title
    }

    /// Load the persisted document, or a fresh default one.
    pub fn load(&self) -> Document {
        self.read_stored()
            .unwrap_or_else(|| self.initial_document())
    }

    /// Load the persisted document; if there is none (or it is unusable),
    /// write a fresh default one first so its generated ids stay stable
    /// across later loads.
    pub fn ensure_persisted(&self) -> Result<Document> {
        if let Some(doc) = self.read_stored() {
            return Ok(doc);
        }
        let doc = self.initial_document();
        self.save(&doc)?;
        Ok(doc)
    }

    fn read_stored(&self) -> Option<Document> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read document, starting fresh");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored document is corrupt, starting fresh");
                None
            }
        }
    }

    /// Serialize and write the whole document.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let raw = serde_json::to_string(doc)?;
        if let Err(e) = self.backend.set(&self.key, &raw) {
            error!(key = %self.key, error = %e, "failed to save document");
            return Err(e);
        }
        debug!(
            key = %self.key,
            folders = doc.folders.len(),
            memos = doc.memos.len(),
            "document saved"
        );
        Ok(())
    }

    /// One folder named after the configured default, selected, no memos.
    pub fn initial_document(&self) -> Document {
        Document::initial(&self.default_folder_name)
    }

    /// Remove all persisted state.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(&self.key)?;
        debug!(key = %self.key, "document cleared");
        Ok(())
    }

    /// The persisted text exactly as stored.
    pub fn raw(&self) -> Result<Option<String>> {
        self.backend.get(&self.key)
    }

    /// Load, apply `f`, and save once.
    ///
    /// If `f` returns an error nothing is written, so a rejected operation
    /// never leaves a partial change behind.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        let mut doc = self.load();
        let value = f(&mut doc)?;
        self.save(&doc)?;
        Ok(value)
    }
}
