//! Inline span stages. Each one is a single substitution over the whole
//! string and only depends on the others through pipeline order.

use once_cell::sync::Lazy;
use regex::{Captures, Match, Regex};

use crate::pattern::compile;

static LINK: Lazy<Regex> = Lazy::new(|| compile(r"\[([^\]]+)\]\(([^)]+)\)"));
static BOLD_STARS: Lazy<Regex> = Lazy::new(|| compile(r"\*\*([^*]+)\*\*"));
static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| compile(r"__([^_]+)__"));
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| compile(r"\*([^*\n]+?)\*"));
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| compile(r"_([^_\n]+?)_"));
static CODE_SPAN: Lazy<Regex> = Lazy::new(|| compile(r"`([^`]+)`"));

static SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// `[text](url)` opens in a new browsing context without opener or referrer.
///
/// With `vet_schemes`, a target naming any scheme besides http, https or
/// mailto (`javascript:`, `data:`, ...) is left as literal text.
pub(crate) fn links(text: &str, vet_schemes: bool) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        let (Some(whole), Some(label), Some(target)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            return String::new();
        };
        if vet_schemes && !has_safe_scheme(target.as_str()) {
            log::debug!("link target with unsupported scheme left as text");
            return whole.as_str().to_string();
        }
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            target.as_str(),
            label.as_str()
        )
    })
    .into_owned()
}

/// Relative targets pass. Browsers drop whitespace and control characters
/// inside a scheme, so those are ignored before comparing.
fn has_safe_scheme(target: &str) -> bool {
    let cleaned: String = target
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace() && !ch.is_ascii_control())
        .collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    SAFE_SCHEMES
        .iter()
        .any(|safe| scheme.eq_ignore_ascii_case(safe))
}

pub(crate) fn bold(text: &str) -> String {
    let text = BOLD_STARS.replace_all(text, "<strong>${1}</strong>");
    BOLD_UNDERSCORES
        .replace_all(&text, "<strong>${1}</strong>")
        .into_owned()
}

/// `*x*` and `_x_`, with the neighbouring-delimiter guard: a match touching
/// another copy of its delimiter, or spanning an emitted tag, is left alone.
pub(crate) fn italic(text: &str) -> String {
    let text = emphasize(text, &ITALIC_STAR, '*');
    emphasize(&text, &ITALIC_UNDERSCORE, '_')
}

pub(crate) fn inline_code(text: &str) -> String {
    CODE_SPAN.replace_all(text, "<code>${1}</code>").into_owned()
}

/// The inline subset allowed inside table cells, in pipeline order.
pub(crate) fn cell_subset(text: &str, vet_schemes: bool) -> String {
    let text = links(text, vet_schemes);
    let text = italic(&text);
    let text = bold(&text);
    inline_code(&text)
}

/// A rejected candidate does not consume its text: the search resumes right
/// after its opening delimiter, so `**a** and *b*` still finds `*b*`.
fn emphasize(text: &str, pattern: &Regex, delimiter: char) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = pattern.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        if !accepts_emphasis(text, whole, delimiter) {
            pos = whole.start() + delimiter.len_utf8();
            continue;
        }
        out.push_str(&text[copied..whole.start()]);
        out.push_str("<em>");
        out.push_str(&caps[1]);
        out.push_str("</em>");
        copied = whole.end();
        pos = whole.end();
    }

    out.push_str(&text[copied..]);
    out
}

fn accepts_emphasis(text: &str, whole: Match<'_>, delimiter: char) -> bool {
    let before = text[..whole.start()].chars().next_back();
    let after = text[whole.end()..].chars().next();
    if before == Some(delimiter) || after == Some(delimiter) {
        return false;
    }
    let span = whole.as_str();
    !(span.contains('<') && span.contains('>'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_gets_safe_target_attributes() {
        assert_eq!(
            links("see [docs](https://example.com/a)", true),
            "see <a href=\"https://example.com/a\" target=\"_blank\" rel=\"noopener noreferrer\">docs</a>"
        );
    }

    #[test]
    fn link_needs_both_parts() {
        assert_eq!(links("[] (x) [a]() [b](c", true), "[] (x) [a]() [b](c");
    }

    #[test]
    fn script_schemes_stay_literal_when_vetted() {
        for source in [
            "[x](javascript:alert(1))",
            "[x](JavaScript:alert(1))",
            "[x]( java\tscript:alert(1))",
            "[x](data:text/html,hi)",
            "[x](vbscript:msgbox)",
        ] {
            assert_eq!(links(source, true), source);
        }
        assert!(links("[x](javascript:alert(1))", false).starts_with("<a href=\"javascript:"));
    }

    #[test]
    fn web_mail_and_relative_targets_pass_vetting() {
        for target in [
            "https://e.com/a",
            "HTTP://e.com",
            "mailto:help@e.com",
            "/help",
            "faq#a:b",
            "docs/a:b",
        ] {
            let html = links(&format!("[x]({target})"), true);
            assert!(html.starts_with(&format!("<a href=\"{target}\"")), "{html}");
        }
    }

    #[test]
    fn bold_accepts_both_delimiter_families() {
        assert_eq!(bold("**a** and __b__"), "<strong>a</strong> and <strong>b</strong>");
    }

    #[test]
    fn italic_accepts_both_delimiter_families() {
        assert_eq!(italic("*a* and _b_"), "<em>a</em> and <em>b</em>");
    }

    #[test]
    fn italic_skips_bold_markers() {
        assert_eq!(italic("**bold**"), "**bold**");
        assert_eq!(italic("__bold__"), "__bold__");
    }

    #[test]
    fn italic_does_not_cross_lines() {
        assert_eq!(italic("*a\nb*"), "*a\nb*");
    }

    #[test]
    fn italic_leaves_spans_over_tags() {
        assert_eq!(
            italic("*<strong>x</strong>*"),
            "*<strong>x</strong>*"
        );
    }

    #[test]
    fn rejected_candidate_does_not_hide_the_next_one() {
        assert_eq!(
            italic("**bold** and *italic*"),
            "**bold** and <em>italic</em>"
        );
        assert_eq!(
            italic("<a target=\"_blank\">x</a> _y_"),
            "<a target=\"_blank\">x</a> <em>y</em>"
        );
    }

    #[test]
    fn triple_delimiters_stay_unmatched() {
        // Every star candidate touches another star.
        assert_eq!(italic("***x***"), "***x***");
        assert_eq!(italic("___x___"), "___x___");
        assert_eq!(bold("***x***"), "*<strong>x</strong>*");
    }

    #[test]
    fn underscore_in_link_target_pairs_with_target_attribute() {
        // The emitted anchor has no `<` between the two underscores, so the
        // span-over-tag guard cannot see it.
        let html = italic(&links("See [docs](https://e.com/a_b) and _note_", true));
        assert_eq!(
            html,
            "See <a href=\"https://e.com/a<em>b\" target=\"</em>blank\" \
             rel=\"noopener noreferrer\">docs</a> and <em>note</em>"
        );
    }

    #[test]
    fn code_span_wraps_content() {
        assert_eq!(inline_code("run `ls -la` now"), "run <code>ls -la</code> now");
        assert_eq!(inline_code("a `` b"), "a `` b");
    }

    #[test]
    fn cell_subset_applies_all_four_constructs() {
        assert_eq!(
            cell_subset("**b** *i* `c` [l](u)", true),
            "<strong>b</strong> <em>i</em> <code>c</code> <a href=\"u\" target=\"_blank\" rel=\"noopener noreferrer\">l</a>"
        );
    }
}
