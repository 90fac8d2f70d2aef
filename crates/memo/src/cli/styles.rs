//! Styles for the memo CLI.
//!
//! Code asks for a style by what the text *is* (a title, an id, a timestamp),
//! never by color. `console` drops the escape codes on its own when stdout is
//! not a terminal, so piped output stays plain.

use console::Style;

/// Memo and folder titles.
pub fn title() -> Style {
    Style::new().bold()
}

/// Ids, timestamps, counts and other metadata.
pub fn muted() -> Style {
    Style::new().dim()
}

/// Marker for the current folder / open memo.
pub fn current() -> Style {
    Style::new().cyan().bold()
}

pub fn success() -> Style {
    Style::new().green()
}

pub fn warning() -> Style {
    Style::new().yellow()
}
