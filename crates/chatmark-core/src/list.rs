use once_cell::sync::Lazy;
use regex::Regex;

use crate::pattern::compile;

static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| compile(r"^\s*[-*+]\s+(.+)$"));
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| compile(r"^\s*[0-9]+\.\s+(.+)$"));

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn item_pattern(self) -> &'static Regex {
        match self {
            ListKind::Ordered => &*ORDERED_ITEM,
            ListKind::Unordered => &*UNORDERED_ITEM,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// Groups each run of contiguous item lines of `kind` into a single list.
///
/// Indentation is ignored, so nested items end up in the same flat list.
/// Item text is inserted unescaped for the inline stages to format.
pub(crate) fn lists(text: &str, kind: ListKind) -> String {
    let pattern = kind.item_pattern();
    let mut out: Vec<String> = Vec::new();
    let mut items: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        match pattern.captures(line).and_then(|caps| caps.get(1)) {
            Some(item) => items.push(item.as_str().trim()),
            None => {
                if !items.is_empty() {
                    out.push(render_list(kind, &items));
                    items.clear();
                }
                out.push(line.to_string());
            }
        }
    }
    if !items.is_empty() {
        out.push(render_list(kind, &items));
    }

    out.join("\n")
}

fn render_list(kind: ListKind, items: &[&str]) -> String {
    let tag = kind.tag();
    let mut out = String::new();
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for item in items {
        out.push_str("<li>");
        out.push_str(item);
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out
}
