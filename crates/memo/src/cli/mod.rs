//! # CLI Behavior
//!
//! This is **one possible UI client** for memo, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Naked Execution (`memo`)
//!
//! Running `memo` with no arguments lists the memos of the current folder.
//!
//! ## Referring to Things
//!
//! Memos are named by id, or by any start or end of the id that matches only
//! one memo. Listings show the last eight characters as a short handle.
//! Folders accept the same, plus their exact name.
//!
//! ## Selection Carries Over
//!
//! The current folder and open memo live in the data file, so `memo new`
//! followed by `memo edit --content ...` edits the memo just created.
//! `memo init` closes the open memo.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers that call the API
//! - `render`: output formatting (lists, detail view, messages)
//! - `setup`: argument parsing via clap, help text
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
