//! Plain-text rendering of library values.
//!
//! Every function here is pure: it takes data and returns the string to print.
//!
//! ## Memo list layout
//!
//! ```text
//! * Title of the memo                                  14:05
//!   First fifty columns of the content…
//!   3c4d5e6f  folder: Work
//! ```
//!
//! - `*` marks the open memo.
//! - The timestamp is the time of day for today's edits, `MM/DD` otherwise.
//! - The handle under each memo is the tail of its id; commands accept it.
//! - The folder column only appears in search results.

use super::styles;
use chrono::{DateTime, Local, Utc};
use memoapp::model::{Folder, Memo};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const PREVIEW_WIDTH: usize = 50;
pub const LINE_WIDTH: usize = 72;
const EMPTY_TITLE: &str = "(untitled)";
const EMPTY_CONTENT: &str = "(empty)";
const SHORT_ID_LEN: usize = 8;

/// Last characters of an id: its random part, short enough to type.
pub fn short_id(id: &str) -> &str {
    let start = id.len().saturating_sub(SHORT_ID_LEN);
    id.get(start..).unwrap_or(id)
}

/// Today's timestamps show as `HH:MM`, older ones as `MM/DD`.
pub fn format_date(ts: DateTime<Utc>, now: DateTime<Local>) -> String {
    let local = ts.with_timezone(&Local);
    if local.date_naive() == now.date_naive() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%m/%d").to_string()
    }
}

/// Cut `text` to at most `max_width` display columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// First line of content, cut to the preview width.
pub fn preview(content: &str) -> String {
    let first_line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if first_line.is_empty() {
        return EMPTY_CONTENT.to_string();
    }
    truncate_to_width(first_line.trim(), PREVIEW_WIDTH)
}

fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        EMPTY_TITLE
    } else {
        title
    }
}

fn marker(is_current: bool) -> String {
    if is_current {
        styles::current().apply_to("*").to_string()
    } else {
        " ".to_string()
    }
}

pub fn folder_list(folders: &[Folder], memo_counts: &[usize], current: Option<&str>) -> String {
    let mut out = String::new();
    for (folder, count) in folders.iter().zip(memo_counts) {
        let is_current = current == Some(folder.id.as_str());
        out.push_str(&format!(
            "{} {} {}\n  {}\n",
            marker(is_current),
            styles::title().apply_to(&folder.name),
            styles::muted().apply_to(format!("({})", count)),
            styles::muted().apply_to(short_id(&folder.id)),
        ));
    }
    out
}

/// `folder_names` maps folder ids to names; pass it to show the folder column.
pub fn memo_list(
    memos: &[Memo],
    current: Option<&str>,
    folder_names: Option<&dyn Fn(&str) -> Option<String>>,
    now: DateTime<Local>,
) -> String {
    let mut out = String::new();
    for memo in memos {
        let is_current = current == Some(memo.id.as_str());
        let date = format_date(memo.updated_at, now);
        let title = truncate_to_width(
            display_title(&memo.title),
            LINE_WIDTH.saturating_sub(date.width() + 3),
        );
        let gap = LINE_WIDTH.saturating_sub(title.width() + date.width() + 2);

        out.push_str(&format!(
            "{} {}{}{}\n",
            marker(is_current),
            styles::title().apply_to(&title),
            " ".repeat(gap.max(1)),
            styles::muted().apply_to(&date),
        ));
        out.push_str(&format!("  {}\n", preview(&memo.content)));

        let folder = folder_names
            .and_then(|lookup| lookup(&memo.folder_id))
            .map(|name| format!("  folder: {}", name))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {}{}\n",
            styles::muted().apply_to(short_id(&memo.id)),
            styles::muted().apply_to(folder)
        ));
    }
    out
}

pub fn memo_detail(memo: &Memo, folder_name: Option<&str>, now: DateTime<Local>) -> String {
    let info = format!(
        "Created: {} | Updated: {} | Characters: {}",
        format_date(memo.created_at, now),
        format_date(memo.updated_at, now),
        memo.content.chars().count()
    );
    let mut out = format!(
        "{}\n{}\n",
        styles::title().apply_to(display_title(&memo.title)),
        styles::muted().apply_to(info)
    );
    if let Some(name) = folder_name {
        out.push_str(&format!("{}\n", styles::muted().apply_to(format!("Folder: {}", name))));
    }
    out.push('\n');
    out.push_str(&memo.content);
    if !memo.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn success(message: &str) -> String {
    format!("{}\n", styles::success().apply_to(message))
}

pub fn warning(message: &str) -> String {
    format!("{}\n", styles::warning().apply_to(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn plain(s: String) -> String {
        console::strip_ansi_codes(&s).to_string()
    }

    fn memo(title: &str, content: &str) -> Memo {
        let mut m = Memo::new("f1".into(), title.into());
        m.content = content.into();
        m
    }

    #[test]
    fn test_format_date_today_shows_time() {
        let now = Local::now();
        let ts = now.with_timezone(&Utc);
        assert_eq!(format_date(ts, now), now.format("%H:%M").to_string());
    }

    #[test]
    fn test_format_date_older_shows_day() {
        let now = Local::now();
        let then = now - Duration::days(3);
        assert_eq!(
            format_date(then.with_timezone(&Utc), now),
            then.format("%m/%d").to_string()
        );
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters count double
        assert_eq!(truncate_to_width("日本語のメモ", 5), "日本…");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0192f3c4-5b6a-7c8d-9e0f-1a2b3c4d5e6f"), "3c4d5e6f");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview(""), "(empty)");
        assert_eq!(preview("\n\n  first line  \nsecond"), "first line");
        let long = "x".repeat(80);
        assert_eq!(preview(&long).width(), PREVIEW_WIDTH);
    }

    #[test]
    fn test_memo_list_marks_current_and_shows_folder() {
        let a = memo("Alpha", "one");
        let b = memo("", "two");
        let lookup: &dyn Fn(&str) -> Option<String> = &|_| Some("Work".to_string());
        let out = plain(memo_list(
            &[a.clone(), b],
            Some(&a.id),
            Some(lookup),
            Local::now(),
        ));

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("* Alpha"));
        assert!(lines[3].starts_with("  (untitled)"));
        assert!(out.contains("folder: Work"));
    }

    #[test]
    fn test_folder_list() {
        let general = Folder::new("General".into());
        let work = Folder::new("Work".into());
        let out = plain(folder_list(
            &[general.clone(), work],
            &[2, 0],
            Some(&general.id),
        ));
        assert!(out.contains("* General (2)"));
        assert!(out.contains("  Work (0)"));
    }

    #[test]
    fn test_memo_detail() {
        let m = memo("Plan", "Ship it");
        let out = plain(memo_detail(&m, Some("Work"), Local::now()));
        assert!(out.starts_with("Plan\n"));
        assert!(out.contains("Characters: 7"));
        assert!(out.contains("Folder: Work"));
        assert!(out.ends_with("Ship it\n"));
    }
}
