//! Pipe tables.
//!
//! Cells are escaped, then the inline subset is applied, then only the
//! attribute-free tags that subset introduces are decoded back.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::escape::{decode_cell_tags, escape_html};
use crate::inline::cell_subset;
use crate::pattern::compile;

/// Class of the scroll container every table is wrapped in.
pub const TABLE_WRAPPER_CLASS: &str = "table-wrapper";

static SEPARATOR_CELL: Lazy<Regex> = Lazy::new(|| compile(r"^:?-+:?$"));

pub(crate) fn tables(text: &str, escape: bool) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if is_table_line(line) {
            run.push(line);
            continue;
        }
        flush(&mut out, &mut run, escape);
        out.push(line.to_string());
    }
    flush(&mut out, &mut run, escape);

    out.join("\n")
}

fn is_table_line(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

fn flush(out: &mut Vec<String>, run: &mut Vec<&str>, escape: bool) {
    match run.len() {
        0 => {}
        1 => {
            log::trace!("single pipe row left as text");
            out.extend(run.drain(..).map(str::to_string));
        }
        _ => {
            let rows: Vec<Vec<&str>> = run.iter().map(|line| split_cells(line)).collect();
            out.push(render_table(&rows, escape));
            run.clear();
        }
    }
}

fn split_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.trim().split('|').map(str::trim).collect();
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

fn is_separator_row(cells: &[&str]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| SEPARATOR_CELL.is_match(cell))
}

fn render_table(rows: &[Vec<&str>], escape: bool) -> String {
    let Some((header, rest)) = rows.split_first() else {
        return String::new();
    };
    let body = match rest.split_first() {
        Some((second, body)) if is_separator_row(second) => body,
        _ => rest,
    };

    let mut out = String::new();
    out.push_str("<div class=\"");
    out.push_str(TABLE_WRAPPER_CLASS);
    out.push_str("\"><table><thead><tr>");
    for cell in header {
        push_cell(&mut out, "th", cell, escape);
    }
    out.push_str("</tr></thead><tbody>");
    for row in body {
        out.push_str("<tr>");
        for cell in row {
            push_cell(&mut out, "td", cell, escape);
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table></div>");
    out
}

fn push_cell(out: &mut String, tag: &str, cell: &str, escape: bool) {
    let content = if escape {
        escape_html(cell)
    } else {
        cell.to_string()
    };
    // Targets are vetted only when the whole input was escaped up front.
    let content = decode_cell_tags(&cell_subset(&content, !escape));
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&content);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
