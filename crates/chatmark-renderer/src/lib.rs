use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as SyntectTheme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

const BASE_CSS: &str = include_str!("../assets/chatmark.css");

/// Class of the element wrapping one rendered bot message.
pub const MESSAGE_CLASS: &str = "chatmark-message";

const CODE_OPEN: &str = "<pre><code";
const CODE_CLOSE: &str = "</code></pre>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Auto,
    Light,
    Dark,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    theme: Theme,
    custom_vars: BTreeMap<String, String>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            custom_vars: BTreeMap::new(),
        }
    }

    /// Overrides one `--chatmark-*` variable after the theme defaults.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_vars.insert(key.into(), value.into());
        self
    }

    pub fn stylesheet(&self) -> String {
        let mut out = String::new();
        let (light_vars, dark_vars) = default_theme_vars();

        match self.theme {
            Theme::Auto => {
                out.push_str(&root_block(&light_vars, "  ", true));
                out.push_str("@media (prefers-color-scheme: dark) {\n");
                out.push_str(&root_block(&dark_vars, "    ", true));
                out.push_str("}\n");
            }
            Theme::Light => out.push_str(&root_block(&light_vars, "  ", true)),
            Theme::Dark => out.push_str(&root_block(&dark_vars, "  ", true)),
        }

        if !self.custom_vars.is_empty() {
            out.push_str(&root_block(&self.custom_vars, "  ", false));
        }

        out.push_str(BASE_CSS);
        out
    }

    /// Wraps a rendered fragment in a standalone preview page.
    pub fn embed_html(&self, html: &str, with_inline_css: bool) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"en\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"utf-8\" />\n");
        out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
        if with_inline_css {
            out.push_str("  <style>\n");
            out.push_str(&self.stylesheet());
            out.push_str("\n  </style>\n");
        } else {
            out.push_str("  <link rel=\"stylesheet\" href=\"chatmark.css\" />\n");
        }
        out.push_str("</head>\n");
        out.push_str("<body>\n");
        out.push_str("<div class=\"");
        out.push_str(MESSAGE_CLASS);
        out.push_str("\">\n");
        out.push_str(html);
        if !html.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("</div>\n");
        out.push_str("</body>\n");
        out.push_str("</html>\n");
        out
    }

    pub fn generate_files(&self, out_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(out_dir)?;
        fs::write(out_dir.join("chatmark.css"), self.stylesheet())?;
        Ok(())
    }

    /// Replaces the body of every fenced code block with syntect inline styles.
    pub fn highlight_html(&self, html: &str) -> String {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        match pick_theme(self.theme, &theme_set) {
            Some(theme) => highlight_html_inner(html, &syntax_set, theme),
            None => {
                log::warn!("no syntax theme available, leaving code blocks unstyled");
                html.to_string()
            }
        }
    }
}

fn default_theme_vars() -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let light = BTreeMap::from([
        ("--chatmark-bubble-bg".to_string(), "#f1f3f5".to_string()),
        ("--chatmark-fg".to_string(), "#1f2328".to_string()),
        ("--chatmark-border".to_string(), "#d0d7de".to_string()),
        ("--chatmark-accent".to_string(), "#0b6bcb".to_string()),
        ("--chatmark-code-bg".to_string(), "#e6e9ed".to_string()),
        ("--chatmark-code-fg".to_string(), "#1f2328".to_string()),
        ("--chatmark-table-head-bg".to_string(), "#e3e7ec".to_string()),
        ("--chatmark-table-stripe".to_string(), "#f7f8fa".to_string()),
    ]);

    let dark = BTreeMap::from([
        ("--chatmark-bubble-bg".to_string(), "#1c2129".to_string()),
        ("--chatmark-fg".to_string(), "#e6edf3".to_string()),
        ("--chatmark-border".to_string(), "#30363d".to_string()),
        ("--chatmark-accent".to_string(), "#58a6ff".to_string()),
        ("--chatmark-code-bg".to_string(), "#262c36".to_string()),
        ("--chatmark-code-fg".to_string(), "#f0f6fc".to_string()),
        ("--chatmark-table-head-bg".to_string(), "#2a313c".to_string()),
        ("--chatmark-table-stripe".to_string(), "#21262d".to_string()),
    ]);

    (light, dark)
}

fn root_block(vars: &BTreeMap<String, String>, indent: &str, include_color_scheme: bool) -> String {
    let outer = &indent[..indent.len() - 2];
    let mut out = String::new();
    out.push_str(outer);
    out.push_str(":root {\n");
    if include_color_scheme {
        out.push_str(indent);
        out.push_str("color-scheme: light dark;\n");
    }
    for (key, value) in vars {
        out.push_str(indent);
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push_str(";\n");
    }
    out.push_str(outer);
    out.push_str("}\n");
    out
}

fn pick_theme(theme: Theme, theme_set: &ThemeSet) -> Option<&SyntectTheme> {
    let candidates = match theme {
        Theme::Dark => ["base16-ocean.dark", "base16-eighties.dark", "base16-mocha.dark"],
        Theme::Light | Theme::Auto => ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"],
    };
    candidates
        .iter()
        .find_map(|name| theme_set.themes.get(*name))
        .or_else(|| theme_set.themes.values().next())
}

fn highlight_html_inner(html: &str, syntax_set: &SyntaxSet, theme: &SyntectTheme) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find(CODE_OPEN) {
        out.push_str(&rest[..start]);
        let block = &rest[start..];
        let Some(tag_end) = block[CODE_OPEN.len()..]
            .find('>')
            .map(|index| index + CODE_OPEN.len())
        else {
            out.push_str(block);
            return out;
        };
        let Some(close) = block[tag_end + 1..].find(CODE_CLOSE) else {
            out.push_str(block);
            return out;
        };
        let close = tag_end + 1 + close;

        let code_tag = &block[..=tag_end];
        let code = unescape_html_code(&block[tag_end + 1..close]);
        let syntax = match extract_language(code_tag) {
            Some(token) => syntax_set.find_syntax_by_token(token).unwrap_or_else(|| {
                log::debug!("no syntax for language `{token}`, using plain text");
                syntax_set.find_syntax_plain_text()
            }),
            None => syntax_set.find_syntax_plain_text(),
        };

        out.push_str(code_tag);
        out.push_str(&highlight_code(&code, syntax_set, syntax, theme));
        out.push_str(CODE_CLOSE);
        rest = &block[close + CODE_CLOSE.len()..];
    }

    out.push_str(rest);
    out
}

fn highlight_code(
    code: &str,
    syntax_set: &SyntaxSet,
    syntax: &SyntaxReference,
    theme: &SyntectTheme,
) -> String {
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        let styled = highlighter
            .highlight_line(line, syntax_set)
            .ok()
            .and_then(|ranges| styled_line_to_highlighted_html(&ranges, IncludeBackground::No).ok());
        match styled {
            Some(html) => out.push_str(&html),
            None => out.push_str(&escape_html_code(line)),
        }
    }
    out
}

fn extract_language(code_tag: &str) -> Option<&str> {
    let start = code_tag.find("class=\"")? + "class=\"".len();
    let end = code_tag[start..].find('"')?;
    code_tag[start..start + end]
        .split_whitespace()
        .find_map(|class_name| class_name.strip_prefix("language-"))
        .filter(|lang| !lang.is_empty())
}

fn escape_html_code(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_html_code(text: &str) -> String {
    const ENTITIES: [(&str, char); 6] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#039;", '\''),
        ("&#39;", '\''),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ENTITIES
            .iter()
            .find_map(|(entity, ch)| tail.strip_prefix(entity).map(|stripped| (*ch, stripped)))
        {
            Some((ch, stripped)) => {
                out.push(ch);
                rest = stripped;
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
