use crate::block::{headers, horizontal_rules};
use crate::escape::escape_html;
use crate::fence::FencedBlocks;
use crate::inline::{bold, inline_code, italic, links};
use crate::list::{ListKind, lists};
use crate::options::{Escaping, RenderOptions};
use crate::paragraph::paragraphs;
use crate::punctuation::fix_semicolons;
use crate::sanitize::sanitize_html;
use crate::table::tables;

/// One rewrite step of the pipeline.
///
/// Later stages rely on what earlier ones leave behind (paragraph assembly
/// recognises the tags emitted before it), so the order in [`Stage::ORDER`]
/// is part of the output format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Stage {
    CodeBlocks,
    Headers,
    HorizontalRules,
    Tables,
    OrderedLists,
    UnorderedLists,
    Links,
    Italic,
    Bold,
    InlineCode,
    Punctuation,
    Paragraphs,
}

impl Stage {
    pub const ORDER: [Stage; 12] = [
        Stage::CodeBlocks,
        Stage::Headers,
        Stage::HorizontalRules,
        Stage::Tables,
        Stage::OrderedLists,
        Stage::UnorderedLists,
        Stage::Links,
        Stage::Italic,
        Stage::Bold,
        Stage::InlineCode,
        Stage::Punctuation,
        Stage::Paragraphs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::CodeBlocks => "code-blocks",
            Stage::Headers => "headers",
            Stage::HorizontalRules => "horizontal-rules",
            Stage::Tables => "tables",
            Stage::OrderedLists => "ordered-lists",
            Stage::UnorderedLists => "unordered-lists",
            Stage::Links => "links",
            Stage::Italic => "italic",
            Stage::Bold => "bold",
            Stage::InlineCode => "inline-code",
            Stage::Punctuation => "punctuation",
            Stage::Paragraphs => "paragraphs",
        }
    }
}

/// Renders a bot reply to an HTML fragment with the default options.
pub fn render_markdown(input: &str) -> String {
    render_markdown_with_options(input, &RenderOptions::default())
}

/// Like [`render_markdown`], with a missing reply rendering as nothing.
pub fn render_optional(input: Option<&str>) -> String {
    input.map(render_markdown).unwrap_or_default()
}

/// Threads `input` through every stage in [`Stage::ORDER`].
///
/// Total over all strings: malformed constructs come out as literal text.
pub fn render_markdown_with_options(input: &str, options: &RenderOptions) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut fenced = FencedBlocks::new();
    let mut text = match options.escaping {
        Escaping::Input => escape_html(input),
        Escaping::Constructs => input.to_string(),
    };
    for stage in Stage::ORDER {
        text = run_stage(stage, &text, options, &mut fenced);
        log::trace!("stage {} -> {} bytes", stage.name(), text.len());
    }

    let restored = fenced.restore(&text);
    let html = restored.trim();
    let html = if options.sanitize {
        sanitize_html(html)
    } else {
        html.to_string()
    };
    log::debug!(
        "rendered {} bytes of markdown into {} bytes of html ({} fenced blocks)",
        input.len(),
        html.len(),
        fenced.len()
    );
    html
}

fn run_stage(
    stage: Stage,
    text: &str,
    options: &RenderOptions,
    fenced: &mut FencedBlocks,
) -> String {
    let escape = options.escapes_constructs();
    match stage {
        Stage::CodeBlocks => fenced.extract(text, escape),
        Stage::Headers => headers(text, escape),
        Stage::HorizontalRules => horizontal_rules(text),
        Stage::Tables => tables(text, escape),
        Stage::OrderedLists => lists(text, ListKind::Ordered),
        Stage::UnorderedLists => lists(text, ListKind::Unordered),
        Stage::Links => links(text, !escape),
        Stage::Italic => italic(text),
        Stage::Bold => bold(text),
        Stage::InlineCode => inline_code(text),
        Stage::Punctuation if options.fix_punctuation => fix_semicolons(text),
        Stage::Punctuation => text.to_string(),
        Stage::Paragraphs => paragraphs(text),
    }
}
