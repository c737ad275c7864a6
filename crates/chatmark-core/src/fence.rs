//! Fenced code blocks.
//!
//! Fences are rendered by the first stage and parked here; the pipeline only
//! carries an opaque placeholder for them until [`FencedBlocks::restore`], so
//! no later stage can reinterpret code as markdown.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::escape::escape_html;
use crate::pattern::compile;

static FENCE: Lazy<Regex> = Lazy::new(|| compile(r"```([0-9A-Za-z_]+)?\n([\s\S]*?)```"));
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| compile(r"\x{E000}([0-9]+)\x{E001}"));

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

#[derive(Debug, Default)]
pub(crate) struct FencedBlocks {
    blocks: Vec<String>,
}

impl FencedBlocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Renders every complete fence to `<pre><code>` and replaces it with a
    /// placeholder. Unterminated fences stay literal text.
    ///
    /// Placeholder characters already present in the text are rewritten as
    /// numeric references so they can never be mistaken for a parked block.
    pub(crate) fn extract(&mut self, text: &str, escape: bool) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in FENCE.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            push_neutralized(&mut out, &text[last..whole.start()]);
            let html = render_fence(&caps, escape);
            out.push(OPEN);
            out.push_str(&self.blocks.len().to_string());
            out.push(CLOSE);
            self.blocks.push(html);
            last = whole.end();
        }
        push_neutralized(&mut out, &text[last..]);
        out
    }

    /// Puts the parked blocks back in place of their placeholders.
    pub(crate) fn restore(&self, text: &str) -> String {
        if self.blocks.is_empty() {
            return text.to_string();
        }
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.blocks.get(idx))
                    .map_or_else(|| caps[0].to_string(), Clone::clone)
            })
            .into_owned()
    }
}

/// Whether a paragraph candidate opens with a parked fenced block.
pub(crate) fn starts_with_placeholder(text: &str) -> bool {
    text.starts_with(OPEN)
}

fn render_fence(caps: &Captures, escape: bool) -> String {
    let code = caps.get(2).map_or("", |m| m.as_str()).trim();
    let code = if escape {
        escape_html(code)
    } else {
        code.to_string()
    };
    match caps.get(1) {
        Some(lang) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            lang.as_str(),
            code
        ),
        None => format!("<pre><code>{}</code></pre>", code),
    }
}

fn push_neutralized(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            OPEN => out.push_str("&#57344;"),
            CLOSE => out.push_str("&#57345;"),
            _ => out.push(ch),
        }
    }
}
