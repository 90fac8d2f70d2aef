//! # CLI Dispatch
//!
//! Parses arguments, wires up logging and the API, then routes each
//! subcommand to a small handler. Handlers call [`MemoApi`] and print either
//! the rendered text or, with `--json`, the structured value.

use super::render;
use super::setup::{Cli, Commands, FolderCommands};
use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::Parser;
use memoapp::config::MemoConfig;
use memoapp::model::{Folder, Memo, MemoUpdate};
use memoapp::repo::transfer::backup_file_name;
use memoapp::store::FsBackend;
use memoapp::MemoApi;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Api = MemoApi<FsBackend>;

/// Environment variable holding the log filter (`warn` when unset).
const LOG_ENV: &str = "MEMO_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = MemoConfig::load()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let api = MemoApi::open(&config).context("could not open the data file")?;

    let out = Output { json: cli.json };
    let command = cli.command.unwrap_or(Commands::List { folder: None });
    debug!(?command, "dispatching");

    match command {
        Commands::Init => handle_init(&api, &out),
        Commands::Folders => handle_folders(&api, &out),
        Commands::Folder { action } => handle_folder(&api, &out, action),
        Commands::List { folder } => handle_list(&api, &out, folder.as_deref()),
        Commands::New { title, content } => handle_new(&api, &out, title, content),
        Commands::Show { memo } => handle_show(&api, &out, memo.as_deref()),
        Commands::Edit {
            memo,
            title,
            content,
        } => handle_edit(&api, &out, memo.as_deref(), title, content),
        Commands::Rm { memo } => handle_rm(&api, &out, &memo),
        Commands::Mv { memo, folder } => handle_mv(&api, &out, &memo, &folder),
        Commands::Open { memo } => handle_open(&api, &out, &memo),
        Commands::Search { query } => handle_search(&api, &out, &query.join(" ")),
        Commands::Export { file } => handle_export(&api, &out, file),
        Commands::Import { file } => handle_import(&api, &out, &file),
        Commands::Dump => handle_dump(&api),
        Commands::Clear => handle_clear(&api, &out),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A second init (e.g. from tests) is harmless, so the error is dropped.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

struct Output {
    json: bool,
}

impl Output {
    /// Print `value` as JSON, or `text` otherwise.
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }

    fn done(&self, message: &str) -> Result<()> {
        self.emit(&serde_json::json!({ "ok": true, "message": message }), || {
            render::success(message)
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FolderSummary {
    #[serde(flatten)]
    folder: Folder,
    memo_count: usize,
    current: bool,
}

fn handle_init(api: &Api, out: &Output) -> Result<()> {
    api.initialize()?;
    let dir = api.store().backend().root().display().to_string();
    out.done(&format!("Memo data ready in {}", dir))
}

fn handle_folders(api: &Api, out: &Output) -> Result<()> {
    let folders = api.folders().get_all();
    let memos = api.memos().get_all();
    let current = api.settings().current_folder_id();
    let counts: Vec<usize> = folders
        .iter()
        .map(|f| memos.iter().filter(|m| m.folder_id == f.id).count())
        .collect();

    let summaries: Vec<FolderSummary> = folders
        .iter()
        .zip(&counts)
        .map(|(folder, &memo_count)| FolderSummary {
            folder: folder.clone(),
            memo_count,
            current: current.as_deref() == Some(folder.id.as_str()),
        })
        .collect();

    out.emit(&summaries, || {
        render::folder_list(&folders, &counts, current.as_deref())
    })
}

fn handle_folder(api: &Api, out: &Output, action: FolderCommands) -> Result<()> {
    match action {
        FolderCommands::New { name } => {
            let folder = api.create_folder_and_select(&name)?;
            out.emit(&folder, || {
                render::success(&format!("Created folder {} ({})", folder.name, folder.id))
            })
        }
        FolderCommands::Rename { folder, name } => {
            let target = resolve_folder(api, &folder)?;
            let renamed = api.folders().rename(&target.id, &name)?;
            out.emit(&renamed, || {
                render::success(&format!("Renamed {} to {}", target.name, renamed.name))
            })
        }
        FolderCommands::Delete { folder } => {
            let target = resolve_folder(api, &folder)?;
            api.folders().delete(&target.id)?;
            out.done(&format!("Deleted folder {} and its memos", target.name))
        }
        FolderCommands::Select { folder } => {
            let target = resolve_folder(api, &folder)?;
            api.select_folder(&target.id)?;
            out.done(&format!("Now in {}", target.name))
        }
    }
}

fn handle_list(api: &Api, out: &Output, folder: Option<&str>) -> Result<()> {
    let folder = match folder {
        Some(query) => resolve_folder(api, query)?,
        None => api
            .current_folder()
            .or_else(|| api.folders().get_all().into_iter().next())
            .ok_or_else(|| anyhow!("no folder selected"))?,
    };
    let memos = api.recent_memos(&folder.id);
    let current = api.settings().current_memo_id();

    out.emit(&memos, || {
        if memos.is_empty() {
            render::warning(&format!("No memos in {}", folder.name))
        } else {
            render::memo_list(&memos, current.as_deref(), None, Local::now())
        }
    })
}

fn handle_new(
    api: &Api,
    out: &Output,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let mut memo = api.create_memo_in_current_folder()?;
    let update = with_fields(MemoUpdate::new(), title, content);
    if !update.is_empty() {
        memo = api.memos().update(&memo.id, update)?;
    }
    out.emit(&memo, || {
        render::success(&format!("Created memo {}", memo.id))
    })
}

fn handle_show(api: &Api, out: &Output, memo: Option<&str>) -> Result<()> {
    let memo = match memo {
        Some(query) => resolve_memo(api, query)?,
        None => api
            .current_memo()
            .ok_or_else(|| anyhow!("no memo is open; pass a memo id"))?,
    };
    let folder_name = api.folders().get_by_id(&memo.folder_id).map(|f| f.name);
    out.emit(&memo, || {
        render::memo_detail(&memo, folder_name.as_deref(), Local::now())
    })
}

fn handle_edit(
    api: &Api,
    out: &Output,
    memo: Option<&str>,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let target = match memo {
        Some(query) => resolve_memo(api, query)?,
        None => api
            .current_memo()
            .ok_or_else(|| anyhow!("no memo is open; pass a memo id"))?,
    };
    let update = with_fields(MemoUpdate::new(), title, content);
    if update.is_empty() {
        bail!("nothing to change; pass --title and/or --content");
    }
    let updated = api.memos().update(&target.id, update)?;
    out.emit(&updated, || {
        render::success(&format!("Saved {}", updated.id))
    })
}

fn handle_rm(api: &Api, out: &Output, memo: &str) -> Result<()> {
    let target = resolve_memo(api, memo)?;
    api.memos().delete(&target.id)?;
    out.done(&format!("Deleted memo {}", target.id))
}

fn handle_mv(api: &Api, out: &Output, memo: &str, folder: &str) -> Result<()> {
    let target = resolve_memo(api, memo)?;
    let folder = resolve_folder(api, folder)?;
    let moved = api.move_memo_and_follow(&target.id, &folder.id)?;
    out.emit(&moved, || {
        render::success(&format!("Moved {} to {}", moved.id, folder.name))
    })
}

fn handle_open(api: &Api, out: &Output, memo: &str) -> Result<()> {
    let target = resolve_memo(api, memo)?;
    let opened = api.open_memo(&target.id)?;
    let folder_name = api.folders().get_by_id(&opened.folder_id).map(|f| f.name);
    out.emit(&opened, || {
        render::memo_detail(&opened, folder_name.as_deref(), Local::now())
    })
}

fn handle_search(api: &Api, out: &Output, query: &str) -> Result<()> {
    let results = api.search_recent(query);
    let folders = api.folders().get_all();
    let current = api.settings().current_memo_id();
    let lookup: &dyn Fn(&str) -> Option<String> =
        &|id| folders.iter().find(|f| f.id == id).map(|f| f.name.clone());

    out.emit(&results, || {
        if results.is_empty() {
            render::warning(&format!("No memos match \"{}\"", query))
        } else {
            render::memo_list(&results, current.as_deref(), Some(lookup), Local::now())
        }
    })
}

fn handle_export(api: &Api, out: &Output, file: Option<PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(backup_file_name(Local::now().date_naive())));
    if path == Path::new("-") {
        print!("{}", api.transfer().export()?);
        return Ok(());
    }
    api.transfer().export_to_file(&path)?;
    out.done(&format!("Exported to {}", path.display()))
}

fn handle_import(api: &Api, out: &Output, file: &Path) -> Result<()> {
    api.transfer()
        .import_from_file(file)
        .with_context(|| format!("import from {} failed", file.display()))?;
    out.done(&format!("Imported {}", file.display()))
}

fn handle_dump(api: &Api) -> Result<()> {
    println!("{}", api.debug_dump()?);
    Ok(())
}

fn handle_clear(api: &Api, out: &Output) -> Result<()> {
    api.store().clear()?;
    out.done("All memo data removed")
}

fn with_fields(update: MemoUpdate, title: Option<String>, content: Option<String>) -> MemoUpdate {
    let update = match title {
        Some(t) => update.title(t),
        None => update,
    };
    match content {
        Some(c) => update.content(c),
        None => update,
    }
}

/// Whether `query` names `id`: a prefix, or a suffix such as the short
/// handle shown in listings.
///
/// Ids lead with a timestamp, so memos made close together share long
/// prefixes; the random tail tells them apart.
fn names_id(id: &str, query: &str) -> bool {
    id.starts_with(query) || id.ends_with(query)
}

/// Find a memo by exact id, or a unique id prefix or suffix.
fn resolve_memo(api: &Api, query: &str) -> Result<Memo> {
    if let Some(memo) = api.memos().get_by_id(query) {
        return Ok(memo);
    }
    let matches: Vec<Memo> = api
        .memos()
        .get_all()
        .into_iter()
        .filter(|m| names_id(&m.id, query))
        .collect();
    unique(matches, "memo", query)
}

/// Find a folder by exact id, exact name, or a unique id prefix or suffix.
fn resolve_folder(api: &Api, query: &str) -> Result<Folder> {
    let folders = api.folders().get_all();
    if let Some(folder) = folders.iter().find(|f| f.id == query) {
        return Ok(folder.clone());
    }
    let by_name: Vec<Folder> = folders.iter().filter(|f| f.name == query).cloned().collect();
    if !by_name.is_empty() {
        return unique(by_name, "folder", query);
    }
    let by_id: Vec<Folder> = folders
        .into_iter()
        .filter(|f| names_id(&f.id, query))
        .collect();
    unique(by_id, "folder", query)
}

fn unique<T>(mut candidates: Vec<T>, kind: &str, query: &str) -> Result<T> {
    match candidates.len() {
        0 => bail!("no {} matches \"{}\"", kind, query),
        1 => Ok(candidates.remove(0)),
        n => bail!("\"{}\" matches {} {}s; use more of the id", query, n, kind),
    }
}
