//! # Import / Export
//!
//! Export writes the whole document as pretty-printed JSON. Import takes the
//! same JSON back and **replaces** the stored document; there is no merge and
//! no backup of the previous state.
//!
//! ## Import Validation
//!
//! Import is all-or-nothing. The text is rejected, and storage left untouched,
//! when:
//! - it is not JSON, or not a JSON object,
//! - `folders` or `memos` is missing or not an array,
//! - any folder or memo entry does not have the expected fields,
//! - `folders` is empty (a document always has a folder),
//! - two folders or two memos share an id,
//! - a memo's `folderId` names no imported folder.
//!
//! `settings` is optional. Missing or dangling selections are pointed back at
//! the first folder and no memo.

use crate::error::{MemoError, Result};
use crate::model::Document;
use crate::store::{DocumentStore, KvBackend};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub struct TransferRepository<'a, B: KvBackend> {
    store: &'a DocumentStore<B>,
}

impl<'a, B: KvBackend> TransferRepository<'a, B> {
    pub fn new(store: &'a DocumentStore<B>) -> Self {
        Self { store }
    }

    /// Pretty-printed JSON of the full document.
    pub fn export(&self) -> Result<String> {
        let doc = self.store.load();
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Validate `text` and replace the stored document with it.
    pub fn import(&self, text: &str) -> Result<()> {
        let doc = match parse_import(text) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "import rejected");
                return Err(e);
            }
        };
        self.store.save(&doc)?;
        debug!(
            folders = doc.folders.len(),
            memos = doc.memos.len(),
            "document imported"
        );
        Ok(())
    }

    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let text = self.export()?;
        fs::write(path, text).map_err(MemoError::Io)?;
        Ok(())
    }

    pub fn import_from_file(&self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(MemoError::Io)?;
        self.import(&text)
    }
}

/// Default export file name for a given day: `memo-backup-YYYY-MM-DD.json`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("memo-backup-{}.json", date.format("%Y-%m-%d"))
}

fn parse_import(text: &str) -> Result<Document> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| MemoError::InvalidImport(e.to_string()))?;

    let Some(object) = value.as_object() else {
        return Err(MemoError::InvalidImport(
            "expected a JSON object".to_string(),
        ));
    };
    for field in ["folders", "memos"] {
        match object.get(field) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(MemoError::InvalidImport(format!(
                    "`{}` must be an array",
                    field
                )))
            }
            None => {
                return Err(MemoError::InvalidImport(format!(
                    "missing `{}`",
                    field
                )))
            }
        }
    }

    let mut doc: Document =
        serde_json::from_value(value).map_err(|e| MemoError::InvalidImport(e.to_string()))?;

    if doc.folders.is_empty() {
        return Err(MemoError::InvalidImport(
            "at least one folder is required".to_string(),
        ));
    }
    check_references(&doc)?;
    doc.repair_settings();
    Ok(doc)
}

/// Ids must be unique and every memo must sit in an imported folder.
fn check_references(doc: &Document) -> Result<()> {
    let mut folder_ids = HashSet::new();
    for folder in &doc.folders {
        if !folder_ids.insert(folder.id.as_str()) {
            return Err(MemoError::InvalidImport(format!(
                "duplicate folder id `{}`",
                folder.id
            )));
        }
    }

    let mut memo_ids = HashSet::new();
    for memo in &doc.memos {
        if !memo_ids.insert(memo.id.as_str()) {
            return Err(MemoError::InvalidImport(format!(
                "duplicate memo id `{}`",
                memo.id
            )));
        }
        if !folder_ids.contains(memo.folder_id.as_str()) {
            return Err(MemoError::InvalidImport(format!(
                "memo `{}` refers to unknown folder `{}`",
                memo.id, memo.folder_id
            )));
        }
    }
    Ok(())
}
