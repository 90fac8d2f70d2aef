use crate::error::{MemoError, Result};
use crate::model::{Document, Folder};
use crate::store::{DocumentStore, KvBackend};
use tracing::{debug, warn};

/// CRUD over the folders of the document.
pub struct FolderRepository<'a, B: KvBackend> {
    store: &'a DocumentStore<B>,
}

impl<'a, B: KvBackend> FolderRepository<'a, B> {
    pub fn new(store: &'a DocumentStore<B>) -> Self {
        Self { store }
    }

    /// All folders in document (creation) order.
    pub fn get_all(&self) -> Vec<Folder> {
        self.store.load().folders
    }

    pub fn get_by_id(&self, folder_id: &str) -> Option<Folder> {
        self.store.load().folder(folder_id).cloned()
    }

    /// Create a folder. The name is trimmed and must not end up empty.
    pub fn create(&self, name: &str) -> Result<Folder> {
        let name = validated_name(name)?;
        let folder = self.store.update(|doc| {
            let folder = Folder::new(name);
            doc.folders.push(folder.clone());
            Ok(folder)
        })?;
        debug!(folder_id = %folder.id, name = %folder.name, "folder created");
        Ok(folder)
    }

    /// Rename a folder, with the same name rules as [`create`](Self::create).
    pub fn rename(&self, folder_id: &str, name: &str) -> Result<Folder> {
        let name = validated_name(name)?;
        self.store.update(|doc| {
            let Some(folder) = doc.folder_mut(folder_id) else {
                warn!(folder_id, "rename of unknown folder ignored");
                return Err(MemoError::FolderNotFound(folder_id.to_string()));
            };
            folder.name = name;
            Ok(folder.clone())
        })
    }

    /// Delete a folder together with all of its memos, in one save.
    ///
    /// The last remaining folder cannot be deleted. If the deleted folder was
    /// selected, selection moves to the first remaining folder and the
    /// current memo is cleared.
    pub fn delete(&self, folder_id: &str) -> Result<()> {
        let removed = self
            .store
            .update(|doc| delete_folder(doc, folder_id))?;
        debug!(folder_id, cascaded_memos = removed, "folder deleted");
        Ok(())
    }
}

fn validated_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        warn!("rejected empty folder name");
        return Err(MemoError::InvalidFolderName);
    }
    Ok(trimmed.to_string())
}

/// Returns the number of memos removed with the folder.
fn delete_folder(doc: &mut Document, folder_id: &str) -> Result<usize> {
    if !doc.has_folder(folder_id) {
        warn!(folder_id, "delete of unknown folder ignored");
        return Err(MemoError::FolderNotFound(folder_id.to_string()));
    }
    let remaining = doc.folders.iter().filter(|f| f.id != folder_id).count();
    if remaining == 0 {
        warn!(folder_id, "refusing to delete the last folder");
        return Err(MemoError::LastFolder);
    }

    let before = doc.memos.len();
    doc.memos.retain(|m| m.folder_id != folder_id);
    let removed = before - doc.memos.len();

    doc.folders.retain(|f| f.id != folder_id);

    if doc.settings.current_folder_id.as_deref() == Some(folder_id) {
        doc.settings.current_folder_id = doc.folders.first().map(|f| f.id.clone());
        doc.settings.current_memo_id = None;
    } else if let Some(memo_id) = doc.settings.current_memo_id.as_deref() {
        // Selected memo went away with the cascade
        if doc.memo(memo_id).is_none() {
            doc.settings.current_memo_id = None;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memos::MemoRepository;
    use crate::repo::settings::SettingsRepository;
    use crate::store::MemBackend;

    fn make_store() -> DocumentStore<MemBackend> {
        DocumentStore::with_backend(MemBackend::new())
    }

    /// Store whose default document is already persisted, so the generated
    /// "General" folder keeps its id across loads.
    fn seeded_store() -> DocumentStore<MemBackend> {
        let store = make_store();
        store.save(&store.load()).unwrap();
        store
    }

    #[test]
    fn test_create_appends_in_order() {
        let store = make_store();
        let folders = FolderRepository::new(&store);

        let a = folders.create("Alpha").unwrap();
        let b = folders.create("Beta").unwrap();

        let all = folders.get_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "General");
        assert_eq!(all[1].id, a.id);
        assert_eq!(all[2].id, b.id);
    }

    #[test]
    fn test_create_trims_name() {
        let store = make_store();
        let folder = FolderRepository::new(&store).create("  Work  ").unwrap();
        assert_eq!(folder.name, "Work");
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let store = make_store();
        let folders = FolderRepository::new(&store);
        assert!(matches!(
            folders.create("   "),
            Err(MemoError::InvalidFolderName)
        ));
        assert_eq!(store.raw().unwrap(), None);
    }

    #[test]
    fn test_get_by_id() {
        let store = make_store();
        let folders = FolderRepository::new(&store);
        let folder = folders.create("Work").unwrap();

        assert_eq!(folders.get_by_id(&folder.id), Some(folder));
        assert_eq!(folders.get_by_id("missing"), None);
    }

    #[test]
    fn test_rename() {
        let store = make_store();
        let folders = FolderRepository::new(&store);
        let folder = folders.create("Wrok").unwrap();

        let renamed = folders.rename(&folder.id, " Work ").unwrap();
        assert_eq!(renamed.name, "Work");
        assert_eq!(folders.get_by_id(&folder.id).unwrap().name, "Work");
        assert!(matches!(
            folders.rename("missing", "X"),
            Err(MemoError::FolderNotFound(_))
        ));
    }

    #[test]
    fn test_cannot_delete_last_folder() {
        let store = seeded_store();
        let folders = FolderRepository::new(&store);
        let only = folders.get_all().remove(0);
        let before = store.raw().unwrap();

        assert!(matches!(
            folders.delete(&only.id),
            Err(MemoError::LastFolder)
        ));
        assert_eq!(store.raw().unwrap(), before);
    }

    #[test]
    fn test_delete_cascades_only_its_memos() {
        let store = seeded_store();
        let folders = FolderRepository::new(&store);
        let memos = MemoRepository::new(&store);

        let general = folders.get_all().remove(0);
        let work = folders.create("Work").unwrap();

        let keep = memos.create(&general.id).unwrap();
        let gone_1 = memos.create(&work.id).unwrap();
        let gone_2 = memos.create(&work.id).unwrap();

        folders.delete(&work.id).unwrap();

        let remaining = memos.get_all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
        assert!(memos.get_by_id(&gone_1.id).is_none());
        assert!(memos.get_by_id(&gone_2.id).is_none());
        assert!(folders.get_by_id(&work.id).is_none());
    }

    #[test]
    fn test_delete_current_folder_moves_selection() {
        let store = seeded_store();
        let folders = FolderRepository::new(&store);
        let memos = MemoRepository::new(&store);
        let settings = SettingsRepository::new(&store);

        let general = folders.get_all().remove(0);
        let work = folders.create("Work").unwrap();
        let memo = memos.create(&work.id).unwrap();
        settings.set_current_folder_id(Some(&work.id)).unwrap();
        settings.set_current_memo_id(Some(&memo.id)).unwrap();

        folders.delete(&work.id).unwrap();

        assert_eq!(settings.current_folder_id(), Some(general.id));
        assert_eq!(settings.current_memo_id(), None);
    }

    #[test]
    fn test_delete_other_folder_keeps_selection() {
        let store = seeded_store();
        let folders = FolderRepository::new(&store);
        let memos = MemoRepository::new(&store);
        let settings = SettingsRepository::new(&store);

        let general = folders.get_all().remove(0);
        let work = folders.create("Work").unwrap();
        let memo = memos.create(&general.id).unwrap();
        settings.set_current_memo_id(Some(&memo.id)).unwrap();

        folders.delete(&work.id).unwrap();

        assert_eq!(settings.current_folder_id(), Some(general.id));
        assert_eq!(settings.current_memo_id(), Some(memo.id));
    }

    #[test]
    fn test_delete_unknown_folder() {
        let store = make_store();
        let folders = FolderRepository::new(&store);
        folders.create("Work").unwrap();
        let before = store.raw().unwrap();

        assert!(matches!(
            folders.delete("missing"),
            Err(MemoError::FolderNotFound(_))
        ));
        assert_eq!(store.raw().unwrap(), before);
    }

    #[test]
    fn test_delete_never_empties_folder_list() {
        // Two entries sharing an id still count as one folder
        let store = make_store();
        let mut doc = store.load();
        let mut twin = doc.folders[0].clone();
        twin.name = "Twin".into();
        doc.folders.push(twin);
        store.save(&doc).unwrap();
        let before = store.raw().unwrap();

        assert!(matches!(
            FolderRepository::new(&store).delete(&doc.folders[0].id),
            Err(MemoError::LastFolder)
        ));
        assert_eq!(store.raw().unwrap(), before);
    }
}
