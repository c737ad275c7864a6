use once_cell::sync::Lazy;
use regex::Regex;

use crate::fence::starts_with_placeholder;
use crate::pattern::compile;
use crate::table::TABLE_WRAPPER_CLASS;

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| compile(r"\n\n+"));
static BLOCK_START: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r#"^<(h[1-6]|ul|ol|pre|hr|table|div class="{}")"#,
        regex::escape(TABLE_WRAPPER_CLASS)
    ))
});

/// Splits on blank lines and wraps every candidate that does not already
/// open with a block tag in `<p>`, turning its single newlines into `<br>`.
pub(crate) fn paragraphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for candidate in BLANK_LINES.split(text) {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            continue;
        }
        if starts_with_placeholder(candidate) || BLOCK_START.is_match(candidate) {
            out.push_str(candidate);
            continue;
        }
        out.push_str("<p>");
        out.push_str(&candidate.replace('\n', "<br>"));
        out.push_str("</p>");
    }
    out
}
