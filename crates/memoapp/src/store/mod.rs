//! # Storage Layer
//!
//! Memo keeps its entire state in **one JSON document under one key** of a
//! key-value store, the way a browser app keeps it in local storage.
//!
//! ## Layers
//!
//! 1. [`backend::KvBackend`]: raw `get` / `set` / `remove` of strings by key.
//!    - [`fs_backend::FsBackend`]: one `<key>.json` file per key, atomic writes.
//!    - [`mem_backend::MemBackend`]: a `HashMap`, with optional quota and
//!      simulated write failures for tests.
//! 2. [`document_store::DocumentStore`]: (de)serializes the [`Document`], supplies
//!    the default document, and downgrades read failures.
//!
//! ## Access Pattern
//!
//! Every repository call is a full read-modify-write:
//!
//! ```text
//! load() ──► mutate in memory ──► save()
//! ```
//!
//! There is no partial update and no index. This is fine for a personal
//! memo collection; a much larger data set would want an embedded database.
//!
//! ## Storage Layout (FsBackend)
//!
//! ```text
//! <data dir>/
//! └── memo_data.json     # The whole document
//! ```
//!
//! [`Document`]: crate::model::Document

pub mod backend;
pub mod document_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::KvBackend;
pub use document_store::DocumentStore;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
