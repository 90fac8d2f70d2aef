//! # memoapp
//!
//! The data-access and mutation layer of memo: folders holding memos, plus the
//! current selection, all stored as **one JSON document under one key** of a
//! key-value store.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  UI client (the `memo` CLI, or anything else)             │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  API facade (api.rs)                                      │
//! │  - hands out repositories, compound selection actions     │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Repositories (repo/*)                                    │
//! │  - folders, memos, settings, import/export                │
//! │  - every call: load → mutate → save                       │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Storage (store/*)                                        │
//! │  - DocumentStore: the document, defaults, failure policy  │
//! │  - KvBackend: FsBackend (files) / MemBackend (tests)      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is an explicit value handed to each repository, never a global,
//! so tests swap in [`store::MemBackend`].
//!
//! Everything assumes a single writer and synchronous access.
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber; that is
//! up to the binary.

pub mod api;
pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod repo;
pub mod store;

pub use api::MemoApi;
pub use error::{MemoError, Result};
