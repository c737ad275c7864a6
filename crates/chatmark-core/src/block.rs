use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::escape::escape_html;
use crate::pattern::compile;

static HEADER: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^(#{1,6})\s+(.+)$"));
// CRLF mode, so `---\r\n` still ends at the line break.
static RULE: Lazy<Regex> = Lazy::new(|| compile(r"(?mR)^---$"));

/// `# Title` through `###### Title`. The run length picks the level; a
/// seventh `#` means the line is not a header at all.
pub(crate) fn headers(text: &str, escape: bool) -> String {
    HEADER
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            let content = caps[2].trim();
            let content = if escape {
                escape_html(content)
            } else {
                content.to_string()
            };
            format!("<h{level}>{content}</h{level}>")
        })
        .into_owned()
}

pub(crate) fn horizontal_rules(text: &str) -> String {
    RULE.replace_all(text, "<hr>").into_owned()
}
