//! # Repositories
//!
//! Each repository borrows a [`DocumentStore`](crate::store::DocumentStore)
//! and runs every operation as load → mutate → save on the whole document.
//!
//! Rejected operations (unknown ids, deleting the last folder, blank names,
//! bad imports) are logged with `tracing::warn!` and returned as
//! [`MemoError`](crate::error::MemoError); nothing is written for them.
//! The caller may ignore these errors. A failed *write* is logged with
//! `tracing::error!` and returned too; that one should reach the user.
//!
//! - [`folders`]: create / rename / delete (cascading) / lookup
//! - [`memos`]: create / update / delete / search / move / lookup
//! - [`settings`]: current folder and memo selection
//! - [`transfer`]: JSON export and validated import

pub mod folders;
pub mod memos;
pub mod settings;
pub mod transfer;

pub use folders::FolderRepository;
pub use memos::MemoRepository;
pub use settings::SettingsRepository;
pub use transfer::TransferRepository;
