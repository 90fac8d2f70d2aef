use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "memo",
    bin_name = "memo",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Folder-based memo pad for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the memo data file
    #[arg(long, global = true, env = "MEMO_DATA_DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Print structured JSON instead of text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up the data file and close any open memo
    Init,

    /// List folders
    Folders,

    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: FolderCommands,
    },

    /// List memos in the current (or given) folder, newest first
    #[command(alias = "ls")]
    List {
        /// Folder name, id, or unique start/end of the id
        #[arg(long, short)]
        folder: Option<String>,
    },

    /// Create a memo in the current folder and open it
    New {
        /// Title for the new memo
        #[arg(long, short)]
        title: Option<String>,

        /// Content for the new memo
        #[arg(long, short)]
        content: Option<String>,
    },

    /// Show a memo (defaults to the open one)
    #[command(alias = "view")]
    Show { memo: Option<String> },

    /// Change a memo's title and/or content (defaults to the open one)
    Edit {
        memo: Option<String>,

        #[arg(long, short)]
        title: Option<String>,

        #[arg(long, short)]
        content: Option<String>,
    },

    /// Delete a memo
    #[command(alias = "delete")]
    Rm { memo: String },

    /// Move a memo to another folder
    Mv { memo: String, folder: String },

    /// Open a memo (selects it and its folder)
    Open { memo: String },

    /// Search titles and content, case-insensitive
    Search { query: Vec<String> },

    /// Export everything as JSON (to FILE, `-` for stdout, or a dated backup file)
    Export { file: Option<PathBuf> },

    /// Replace everything with the contents of a JSON export
    Import { file: PathBuf },

    /// Print the raw document
    Dump,

    /// Remove all stored data
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder and select it
    New { name: String },

    /// Rename a folder
    Rename { folder: String, name: String },

    /// Delete a folder and every memo in it
    Delete { folder: String },

    /// Make a folder the current one
    Select { folder: String },
}
