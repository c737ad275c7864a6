use serde::Deserialize;

/// Where untrusted text gets escaped.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Escaping {
    /// The whole input is escaped once before the first stage. Stages then
    /// insert text as-is, including link targets and code spans. Links
    /// whose target names a scheme other than http, https or mailto stay
    /// literal text.
    #[default]
    Input,
    /// Only fenced code, header text and table cells are escaped, each by
    /// its own stage. Link targets, code spans, list items and paragraph
    /// text reach the output verbatim, `javascript:` targets included. Set
    /// [`RenderOptions::sanitize`] when this output meets untrusted input.
    Constructs,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub escaping: Escaping,
    /// Rewrites list-like semicolons into commas.
    pub fix_punctuation: bool,
    /// Runs the final HTML through the tag allow-list in [`crate::sanitize_html`].
    pub sanitize: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escaping: Escaping::Input,
            fix_punctuation: true,
            sanitize: false,
        }
    }
}

impl RenderOptions {
    /// Output identical to the widget's historical renderer, raw link
    /// targets and code spans included.
    pub fn compat() -> Self {
        Self {
            escaping: Escaping::Constructs,
            ..Self::default()
        }
    }

    pub(crate) fn escapes_constructs(&self) -> bool {
        self.escaping == Escaping::Constructs
    }
}
