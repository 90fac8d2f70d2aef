use crate::error::Result;
use crate::store::{DocumentStore, KvBackend};

/// Accessors for the persisted selection. Every setter is its own
/// load-modify-save round trip.
pub struct SettingsRepository<'a, B: KvBackend> {
    store: &'a DocumentStore<B>,
}

impl<'a, B: KvBackend> SettingsRepository<'a, B> {
    pub fn new(store: &'a DocumentStore<B>) -> Self {
        Self { store }
    }

    pub fn current_folder_id(&self) -> Option<String> {
        self.store.load().settings.current_folder_id
    }

    pub fn set_current_folder_id(&self, folder_id: Option<&str>) -> Result<()> {
        self.store.update(|doc| {
            doc.settings.current_folder_id = folder_id.map(str::to_string);
            Ok(())
        })
    }

    pub fn current_memo_id(&self) -> Option<String> {
        self.store.load().settings.current_memo_id
    }

    pub fn set_current_memo_id(&self, memo_id: Option<&str>) -> Result<()> {
        self.store.update(|doc| {
            doc.settings.current_memo_id = memo_id.map(str::to_string);
            Ok(())
        })
    }
}
