//! Semicolon touch-up for the bot's list-like phrasing
//! ("apples; pears and plums" reads as "apples, pears and plums").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::escape::closes_escaped_entity;
use crate::pattern::compile;

struct Rule {
    pattern: Lazy<Regex>,
    replacement: &'static str,
}

static RULES: [Rule; 5] = [
    Rule {
        pattern: Lazy::new(|| compile(r"(?i);(\s+and\s)")),
        replacement: ",${1}",
    },
    Rule {
        pattern: Lazy::new(|| compile(r"(?i);(\s+or\s)")),
        replacement: ",${1}",
    },
    Rule {
        pattern: Lazy::new(|| compile(r"([0-9A-Za-z_]+);(\s+[a-z][a-z\s]{2,})")),
        replacement: "${1},${2}",
    },
    Rule {
        pattern: Lazy::new(|| compile(r"([0-9]+)\s*;\s*([a-z])")),
        replacement: "${1}, ${2}",
    },
    Rule {
        pattern: Lazy::new(|| compile(r"(?i)([a-z])\s*;\s*([a-z])")),
        replacement: "${1}, ${2}",
    },
];

/// Applies every rule in order. A semicolon that ends an entity written by
/// the escaper (`&amp;`, `&#039;`, ...) is never touched.
pub(crate) fn fix_semicolons(text: &str) -> String {
    let mut text = text.to_string();
    for rule in &RULES {
        text = apply(&text, rule);
    }
    text
}

fn apply(text: &str, rule: &Rule) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut at = 0;
    while let Some(caps) = rule.pattern.captures_at(text, at) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        // Every rule consumes exactly one semicolon.
        let semicolon = whole.as_str().find(';').map(|offset| whole.start() + offset);
        if let Some(semicolon) =
            semicolon.filter(|&semicolon| closes_escaped_entity(text, semicolon))
        {
            // The letter after the entity may still start a real match.
            at = semicolon + 1;
            continue;
        }
        out.push_str(&text[copied..whole.start()]);
        caps.expand(rule.replacement, &mut out);
        copied = whole.end();
        at = whole.end();
    }
    out.push_str(&text[copied..]);
    out
}
