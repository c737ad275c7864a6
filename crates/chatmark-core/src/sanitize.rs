use std::collections::{HashMap, HashSet};

use ammonia::Builder;

/// Cleans rendered HTML against an allow-list of exactly the markup the
/// pipeline produces.
///
/// Links keep `href` and `target`; ammonia sets `rel="noopener noreferrer"`
/// itself and drops non-web URL schemes such as `javascript:`.
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&'static str> = [
        "a", "br", "code", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "ol", "p",
        "pre", "strong", "table", "tbody", "td", "th", "thead", "tr", "ul",
    ]
    .iter()
    .copied()
    .collect();

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", ["href", "target"].iter().copied().collect());
    tag_attributes.insert("code", ["class"].iter().copied().collect());
    tag_attributes.insert("div", ["class"].iter().copied().collect());

    Builder::new()
        .tags(tags)
        .generic_attributes(HashSet::new())
        .tag_attributes(tag_attributes)
        .link_rel(Some("noopener noreferrer"))
        .clean(html)
        .to_string()
}
