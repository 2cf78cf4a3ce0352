/*!
format.rs

Human-readable output helpers for `list` / `exec` (JSON paths never use them).

  - StyleOptions::detect() honours NO_COLOR, NO_EMOJI and COLUMNS (clamped 40..=220, default 100);
    piped stdout gets plain output
  - color(role, text, &style) / emoji(tag, &style)
  - box_header(title, subtitle, &style)
  - table(headers, rows, TableOpts, &style)
  - text_block(label, body, &style) for STDOUT / STDERR / ERROR sections

Functions return strings; callers decide where to print.
*/

use std::borrow::Cow;
use std::io::IsTerminal;

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        if !std::io::stdout().is_terminal() {
            return Self::plain(width);
        }
        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
        }
    }

    /// No color, no emoji; stable output for tests and pipes.
    pub fn plain(term_width: usize) -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width,
        }
    }
}

/* ---- Color / Emoji ---- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Success,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",
        Role::Secondary => "38;5;250",
        Role::Accent => "38;5;213",
        Role::Success => "38;5;82",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "warn" => "⚠",
        "info" => "ℹ",
        "list" => "📜",
        _ => "",
    }
}

/* ---- Box Header ---- */

/// Single-line boxed title; the subtitle is appended after two spaces and the
/// whole line is truncated to the terminal width.
pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let title_styled = color(Role::Primary, title.as_ref(), style);
    let inner = match subtitle {
        Some(s) => format!("{title_styled}  {}", color(Role::Secondary, s.as_ref(), style)),
        None => title_styled,
    };

    let max_inner = style.term_width.clamp(20, 200) - 4;
    let inner = if display_width(&inner) > max_inner {
        truncate_ellipsis(&strip_ansi(&inner), max_inner)
    } else {
        inner
    };
    let width = display_width(&inner) + 2;

    let bar = "─".repeat(width);
    format!("┌{bar}┐\n│ {inner} │\n└{bar}┘")
}

/* ---- Table Rendering ---- */

#[derive(Debug, Clone)]
pub struct TableOpts {
    pub max_width: usize,
    pub truncate: bool,
    pub header_sep: bool,
    pub min_col_width: usize,
}

impl Default for TableOpts {
    fn default() -> Self {
        Self {
            max_width: 0, // 0 -> style.term_width
            truncate: true,
            header_sep: true,
            min_col_width: 2,
        }
    }
}

pub fn table(
    headers: &[&str],
    rows: &[Vec<String>],
    opts: TableOpts,
    style: &StyleOptions,
) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let col_count = headers.len();
    let width_limit = if opts.max_width == 0 {
        style.term_width
    } else {
        opts.max_width.min(style.term_width)
    };

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    // Greedy shrink, widest column first.
    let total: usize = widths.iter().sum::<usize>() + (col_count - 1) * 2;
    if total > width_limit {
        let mut overflow = total - width_limit;
        let mut ordered: Vec<(usize, usize)> = widths.iter().copied().enumerate().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        for (idx, _) in ordered {
            if overflow == 0 {
                break;
            }
            if widths[idx] > opts.min_col_width {
                let shrink = (widths[idx] - opts.min_col_width).min(overflow);
                widths[idx] -= shrink;
                overflow -= shrink;
            }
        }
    }

    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 2);

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| color(Role::Accent, pad_or_truncate(h, widths[i], opts.truncate), style))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(header_line.trim_end().to_string());

    if opts.header_sep {
        let sep = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(color(Role::Dim, sep, style));
    }

    for row in rows {
        let line = (0..col_count)
            .map(|c| {
                let raw = row.get(c).map(|s| s.as_str()).unwrap_or("");
                pad_or_truncate(raw, widths[c], opts.truncate)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Labelled section for captured command output.
pub fn text_block(label: &str, body: &str, role: Role, style: &StyleOptions) -> String {
    let mut out = color(role, format!("{label}:"), style);
    out.push('\n');
    out.push_str(body.trim_end_matches('\n'));
    out
}

fn pad_or_truncate(s: &str, width: usize, truncate: bool) -> String {
    let len = display_width(s);
    if len <= width {
        return format!("{s}{}", " ".repeat(width - len));
    }
    if !truncate {
        return s.to_string();
    }
    truncate_ellipsis(&strip_ansi(s), width)
}

/* ---- Text Helpers ---- */

pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 1 {
        return "…".into();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

fn strip_ansi(s: &str) -> Cow<'_, str> {
    // Scans for ESC '[' ... <letter>
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for n in chars.by_ref() {
                if n.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        buf.push(c);
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}
