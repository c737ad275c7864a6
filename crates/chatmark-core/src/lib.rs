mod block;
mod escape;
mod fence;
mod inline;
mod list;
mod message;
mod options;
mod paragraph;
mod pattern;
mod pipeline;
mod punctuation;
mod sanitize;
mod table;

pub use escape::escape_html;
pub use message::{MessageError, MessageLimits, validate_message};
pub use options::{Escaping, RenderOptions};
pub use pipeline::{Stage, render_markdown, render_markdown_with_options, render_optional};
pub use sanitize::sanitize_html;
pub use table::TABLE_WRAPPER_CLASS;
