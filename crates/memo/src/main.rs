//! # Memo CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/memoapp/`: core library with UI-agnostic data access
//! - `crates/memo/`: this CLI tool, depends on the `memoapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/memo/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - logging setup + dispatch (commands.rs)                   │
//! │  - terminal rendering (render.rs, styles.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/memoapp/src/api.rs)                      │
//! │  - compound actions (open memo selects its folder, ...)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repositories + Document Store (crates/memoapp/src/)        │
//! │  - whole-document load → mutate → save                      │
//! │  - no knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward returns normal Rust values. The CLI layer
//! owns argument parsing, logging setup, error reporting and rendering.
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to each repository, plus on-disk lifecycle
//!   tests in `crates/memoapp/tests/`.
//! - **CLI**: parsing and rendering unit tests in `src/cli/`, end-to-end runs
//!   of the binary in `tests/`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
