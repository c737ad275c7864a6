/// Escapes the five HTML-significant characters and leaves everything else
/// untouched.
///
/// Not idempotent: `&amp;` becomes `&amp;amp;`. Every raw fragment must go
/// through this exactly once.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
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

/// Escaped forms of the attribute-free tags that table cells may contain.
const CELL_TAGS: [(&str, &str); 7] = [
    ("&lt;strong&gt;", "<strong>"),
    ("&lt;/strong&gt;", "</strong>"),
    ("&lt;em&gt;", "<em>"),
    ("&lt;/em&gt;", "</em>"),
    ("&lt;code&gt;", "<code>"),
    ("&lt;/code&gt;", "</code>"),
    ("&lt;/a&gt;", "</a>"),
];

/// Decodes only the whitelisted cell tags back into markup.
///
/// Nothing carrying attributes is ever decoded, and no other entity is
/// touched.
pub(crate) fn decode_cell_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("&lt;") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match CELL_TAGS
            .iter()
            .find(|(escaped, _)| tail.starts_with(escaped))
        {
            Some((escaped, tag)) => {
                out.push_str(tag);
                rest = &tail[escaped.len()..];
            }
            None => {
                out.push_str("&lt;");
                rest = &tail["&lt;".len()..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Entities this crate writes itself: the five from [`escape_html`] and the
/// two that stand in for stray placeholder sentinels.
const OWN_ENTITIES: [&str; 7] = [
    "&amp;", "&lt;", "&gt;", "&quot;", "&#039;", "&#57344;", "&#57345;",
];

/// Returns true when the `;` at `semicolon` ends one of the entities the
/// escaper produces. Author-typed `&name;` sequences do not count.
pub(crate) fn closes_escaped_entity(text: &str, semicolon: usize) -> bool {
    text.get(..=semicolon)
        .filter(|head| head.ends_with(';'))
        .is_some_and(|head| OWN_ENTITIES.iter().any(|entity| head.ends_with(entity)))
}
