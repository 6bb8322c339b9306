//! Terminal output: notes on stderr and aligned field tables.
//!
//! Notes never touch stdout, which carries command output (HTML, JSON).

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Whether stderr output should carry ANSI styling.
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::env::var_os("COLORTERM").is_some()
        || std::env::var("TERM").is_ok_and(|term| term != "dumb")
}

/// Remove `ESC [ ... m` sequences.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (false, _) => out.push(c),
            (true, 'm') => in_escape = false,
            (true, _) => {}
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn styled(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => ("\x1b[36m", "ℹ"),
            Level::Warn => ("\x1b[33m", "⚠"),
            Level::Error => ("\x1b[31m", "✗"),
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Level::Info => "INFO:",
            Level::Warn => "WARN:",
            Level::Error => "ERROR:",
        }
    }
}

fn format_note(level: Level, msg: &str, color: bool) -> String {
    if color {
        let (color, symbol) = level.styled();
        format!("{color}{BOLD}{symbol}{RESET} {msg}")
    } else {
        format!("{} {msg}", level.plain())
    }
}

pub fn note_info(msg: &str) {
    eprintln!("{}", format_note(Level::Info, msg, supports_color()));
}

pub fn note_warn(msg: &str) {
    eprintln!("{}", format_note(Level::Warn, msg, supports_color()));
}

pub fn note_error(msg: &str) {
    eprintln!("{}", format_note(Level::Error, msg, supports_color()));
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub align: Align,
    /// Cap on the computed width; longer cells overflow rather than wrap.
    pub max_width: Option<usize>,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Left,
            max_width: None,
        }
    }
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

fn pad(s: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_width(s)));
    match align {
        Align::Left => format!("{s}{fill}"),
        Align::Right => format!("{fill}{s}"),
    }
}

/// Render `rows` under `columns`, two-space gutters, dashed rule under the
/// header. Missing cells render empty; extra cells are dropped.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| visible_width(cell))
                .max()
                .unwrap_or(0);
            let cells = column.max_width.map_or(widest, |max| widest.min(max));
            cells.max(visible_width(&column.header))
        })
        .collect();

    let line = |cells: Vec<String>| format!("  {}  \n", cells.join("  "));

    let header = line(
        columns
            .iter()
            .zip(&widths)
            .map(|(column, &width)| pad(&column.header, width, column.align))
            .collect(),
    );
    let mut out = if supports_color() {
        format!("{BOLD}{}{RESET}\n", header.trim_end_matches('\n'))
    } else {
        header
    };

    out.push_str(&line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        out.push_str(&line(
            columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (column, &width))| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    pad(cell, width, column.align)
                })
                .collect(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ansi() {
        assert_eq!(strip_ansi("\x1b[1m\x1b[36mhello\x1b[0m"), "hello");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn plain_notes_have_level_prefix() {
        assert_eq!(format_note(Level::Warn, "careful", false), "WARN: careful");
        assert!(format_note(Level::Error, "bad", true).ends_with(" bad"));
    }

    #[test]
    fn renders_aligned_table() {
        let value = Column {
            header: "Value".into(),
            align: Align::Right,
            max_width: None,
        };
        let cols = vec![Column::left("Field"), value];
        let rows = vec![
            vec!["tag".to_string(), "ul".to_string()],
            vec!["classes".to_string(), "a b".to_string()],
        ];
        let table = render_table(&cols, &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "  -------  -----  ");
        assert_eq!(lines[2], "  tag         ul  ");
        assert_eq!(lines[3], "  classes    a b  ");
    }

    #[test]
    fn max_width_caps_column() {
        let mut col = Column::left("V");
        col.max_width = Some(3);
        let rows = vec![vec!["abcdef".to_string()]];
        let table = render_table(&[col], &rows);
        assert_eq!(table.lines().nth(1), Some("  ---  "));
        assert_eq!(table.lines().nth(2), Some("  abcdef  "));
    }
}
