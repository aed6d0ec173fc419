//! Terminal rendering of a [`super::Diagnostic`] against its source excerpt.
//!
//! Implements `spec.md` §4.6: tab expansion, width-budget truncation with
//! centering on the marker range, `~`/`^` underlining, code-point column
//! counting (ignoring a BOM), note wrapping, URL auto-linking, and ANSI
//! color with a one-shot terminal capability probe.

use super::{Diagnostic, LogLevel};
use crate::limits::{MAX_NOTE_WIDTH, RENDER_MARGIN_WIDTH, TAB_STOP_WIDTH};
use crate::position::LineColumnTracker;
use crate::source::Source;
use std::sync::OnceLock;

/// Whether to colorize rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Always,
    Never,
    IfTerminal,
}

/// Default terminal width assumed when none can be probed (e.g. output is
/// redirected to a file). Matches the fallback described in `spec.md` §4.6.
const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Caches the `NO_COLOR` / `WT_SESSION` environment probe: both are read
/// once per process, not on every diagnostic.
static COLOR_CAPABLE: OnceLock<bool> = OnceLock::new();

fn terminal_supports_color() -> bool {
    *COLOR_CAPABLE.get_or_init(|| {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        // Windows Terminal and modern conhost both honor ANSI escapes;
        // legacy `cmd.exe` without WT_SESSION set does not, so this probe
        // downgrades to plain text rather than emitting raw escape bytes.
        if legacy_windows_console() {
            return false;
        }
        true
    })
}

fn should_colorize(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::IfTerminal => terminal_supports_color(),
    }
}

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

fn level_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warning => "warning",
        LogLevel::Info => "note",
        LogLevel::Silent => "",
    }
}

/// Caches whether the process is running in a legacy `cmd.exe` that
/// doesn't honor ANSI escapes (no `WT_SESSION`) — used to downgrade both
/// color and the non-ASCII icon glyphs, independent of the requested
/// [`ColorMode`] (`spec.md` §4.6 rule 6).
static LEGACY_WINDOWS_CONSOLE: OnceLock<bool> = OnceLock::new();

fn legacy_windows_console() -> bool {
    *LEGACY_WINDOWS_CONSOLE.get_or_init(|| cfg!(windows) && std::env::var_os("WT_SESSION").is_none())
}

fn level_icon(level: LogLevel) -> &'static str {
    if legacy_windows_console() {
        return match level {
            LogLevel::Error => "x",
            LogLevel::Warning => "!",
            LogLevel::Info => "i",
            LogLevel::Silent => "",
        };
    }
    match level {
        LogLevel::Error => "\u{2716}",
        LogLevel::Warning => "\u{25b2}",
        LogLevel::Info => "\u{2139}",
        LogLevel::Silent => "",
    }
}

fn level_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => RED,
        LogLevel::Warning => YELLOW,
        LogLevel::Info => CYAN,
        LogLevel::Silent => "",
    }
}

/// Counts the number of Unicode scalar values between byte offsets `start`
/// and `end` of `line`, skipping a leading BOM so column numbers match what
/// an editor shows rather than counting the BOM as a character.
fn codepoint_column(line: &str, byte_offset: usize) -> usize {
    let mut line = line;
    let mut bom_adjust = 0;
    if let Some(rest) = line.strip_prefix('\u{feff}') {
        line = rest;
        bom_adjust = '\u{feff}'.len_utf8();
    }
    let clipped = byte_offset.saturating_sub(bom_adjust).min(line.len());
    line[..clipped].chars().count()
}

/// Expand tabs to [`TAB_STOP_WIDTH`]-wide stops, returning the expanded text
/// and a byte-offset -> display-column map for the original string's char
/// boundaries (used to translate the marker range after expansion).
fn expand_tabs(line: &str) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(line.len());
    let mut columns = Vec::with_capacity(line.len() + 1);
    let mut col = 0usize;
    for ch in line.chars() {
        columns.push(col);
        if ch == '\t' {
            let next_stop = ((col / TAB_STOP_WIDTH) + 1) * TAB_STOP_WIDTH;
            for _ in col..next_stop {
                out.push(' ');
            }
            col = next_stop;
        } else {
            out.push(ch);
            col += 1;
        }
    }
    columns.push(col);
    (out, columns)
}

/// Truncate `line` to `width` display columns, centering on
/// `[marker_start, marker_end)` and inserting `"..."` where text was cut.
fn truncate_centered(line: &str, width: usize, marker_start: usize, marker_end: usize) -> (String, usize) {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= width {
        return (line.to_string(), 0);
    }
    let marker_center = (marker_start + marker_end) / 2;
    let half = width / 2;
    let mut start = marker_center.saturating_sub(half);
    let end = (start + width).min(chars.len());
    start = end.saturating_sub(width);

    let mut out = String::new();
    let mut offset_shift = start;
    if start > 0 {
        out.push_str("...");
        offset_shift = start.saturating_sub(3);
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push_str("...");
    }
    (out, offset_shift)
}

/// Render one diagnostic, optionally with its source excerpt, as a
/// multi-line string ready to print to stderr.
#[must_use]
pub fn render_diagnostic(diagnostic: &Diagnostic, source: Option<&Source>, color: ColorMode) -> String {
    let colorize = should_colorize(color);
    let mut out = String::new();

    let icon = level_icon(diagnostic.level);
    let kind = level_label(diagnostic.level).to_uppercase();
    if colorize {
        out.push_str(level_color(diagnostic.level));
        out.push_str(BOLD);
        out.push_str(icon);
        out.push_str(" [");
        out.push_str(&kind);
        out.push(']');
        out.push_str(RESET);
        out.push_str(BOLD);
        out.push_str(": ");
        out.push_str(&linkify(&diagnostic.text));
        out.push_str(RESET);
    } else {
        out.push_str(icon);
        out.push_str(" [");
        out.push_str(&kind);
        out.push_str("]: ");
        out.push_str(&diagnostic.text);
    }

    if let (Some(range), Some(source)) = (diagnostic.range, source) {
        let mut tracker = LineColumnTracker::new(&source.contents);
        let start = tracker.locate(range.span.start);
        out.push('\n');
        out.push_str(&render_location_header(
            &source.pretty_path,
            start.line,
            start.column,
            colorize,
        ));
        if let Some(excerpt) = render_excerpt(source, range.span.start, range.span.end, colorize) {
            out.push('\n');
            out.push_str(&excerpt);
        }
    }

    out
}

fn render_location_header(pretty_path: &str, line: u32, column: u32, colorize: bool) -> String {
    let body = format!("{pretty_path}:{line}:{}", column + 1);
    if colorize {
        format!("  {DIM}-->{RESET} {body}")
    } else {
        format!("  --> {body}")
    }
}

/// Render the single-line source excerpt: gutter, source line (tab-expanded,
/// width-truncated and centered on the marker), and an underline of `~`
/// (or `^` for an empty/point span).
fn render_excerpt(source: &Source, start: u32, end: u32, colorize: bool) -> Option<String> {
    let contents = &source.contents;
    let line_start = contents[..start as usize].rfind('\n').map_or(0, |i| i + 1);
    let line_end = contents[start as usize..]
        .find('\n')
        .map_or(contents.len(), |i| start as usize + i);
    let line_text = &contents[line_start..line_end];

    let mut tracker = LineColumnTracker::new(contents);
    let line_no = tracker.locate(start).line;

    let marker_start_byte = start as usize - line_start;
    let marker_end_byte = end.max(start) as usize - line_start.min(end as usize);
    let marker_end_byte = marker_end_byte.min(line_text.len());

    let (expanded, columns) = expand_tabs(line_text);
    let col = |byte: usize| -> usize {
        let byte = byte.min(line_text.len());
        let cp = codepoint_column(line_text, byte);
        *columns.get(cp).unwrap_or(&expanded.chars().count())
    };
    let marker_start = col(marker_start_byte);
    let marker_end = col(marker_end_byte).max(marker_start);

    let gutter = format!("{line_no}");
    let gutter_width = gutter.len().max(RENDER_MARGIN_WIDTH.saturating_sub(3));
    let available_width = DEFAULT_TERMINAL_WIDTH.saturating_sub(RENDER_MARGIN_WIDTH);

    let (shown, shift) = truncate_centered(&expanded, available_width, marker_start, marker_end);
    let underline_start = marker_start.saturating_sub(shift);
    let underline_len = (marker_end - marker_start).max(1);

    let mut out = String::new();
    out.push_str(&" ".repeat(gutter_width.saturating_sub(gutter.len())));
    out.push_str(&gutter);
    out.push_str(" | ");
    out.push_str(&shown);
    out.push('\n');
    out.push_str(&" ".repeat(gutter_width));
    out.push_str(" | ");
    out.push_str(&" ".repeat(underline_start));
    let marker_char = if marker_end == marker_start { '^' } else { '~' };
    let underline: String = std::iter::repeat(marker_char).take(underline_len).collect();
    if colorize {
        out.push_str(RED);
        out.push_str(&underline);
        out.push_str(RESET);
    } else {
        out.push_str(&underline);
    }
    Some(out)
}

/// Wrap a note at `width - 2` columns, capped at [`MAX_NOTE_WIDTH`] unless
/// `disable_maximum_width` is set.
#[must_use]
pub fn wrap_note(text: &str, width: usize, disable_maximum_width: bool) -> String {
    let limit = if disable_maximum_width {
        width.saturating_sub(2)
    } else {
        width.saturating_sub(2).min(MAX_NOTE_WIDTH)
    };
    if limit == 0 {
        return text.to_string();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > limit {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Wrap `http://` / `https://` substrings in an ANSI hyperlink escape
/// sequence (OSC 8) so terminals that support it render them as links.
#[must_use]
fn linkify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("http://").or_else(|| rest.find("https://")) {
        out.push_str(&rest[..pos]);
        let url_part = &rest[pos..];
        let mut end = url_part
            .find(|c: char| c.is_whitespace() || c == '\'' || c == '"')
            .unwrap_or(url_part.len());
        while end > 0 && matches!(url_part.as_bytes()[end - 1], b'.' | b',' | b'?' | b'!' | b')' | b']' | b'}') {
            end -= 1;
        }
        let url = &url_part[..end];
        out.push_str("\x1b]8;;");
        out.push_str(url);
        out.push_str("\x1b\\");
        out.push_str(url);
        out.push_str("\x1b]8;;\x1b\\");
        rest = &url_part[end..];
    }
    out.push_str(rest);
    out
}

/// Render the one-line `N errors, M warnings (shown X of Y)` summary printed
/// at `almost_done`/`done` time.
#[must_use]
pub fn render_summary(shown_errors: usize, total_errors: usize, shown_warnings: usize, total_warnings: usize) -> String {
    if total_errors == 0 && total_warnings == 0 {
        return String::new();
    }
    let mut parts = Vec::new();
    if total_errors > 0 {
        parts.push(format!(
            "{total_errors} error{}",
            if total_errors == 1 { "" } else { "s" }
        ));
    }
    if total_warnings > 0 {
        parts.push(format!(
            "{total_warnings} warning{}",
            if total_warnings == 1 { "" } else { "s" }
        ));
    }
    let mut summary = parts.join(", ");
    let shown = shown_errors + shown_warnings;
    let total = total_errors + total_warnings;
    if shown < total {
        summary.push_str(&format!(" (shown {shown} of {total})"));
    }
    summary
}

#[cfg(test)]
#[path = "../../tests/render.rs"]
mod tests;
