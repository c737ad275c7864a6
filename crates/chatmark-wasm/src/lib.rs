use chatmark_core::{MessageLimits, RenderOptions};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Renders a bot message. `null`, `undefined` and non-string values render
/// to an empty string.
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown(value: JsValue) -> String {
    chatmark_core::render_optional(value.as_string().as_deref())
}

#[wasm_bindgen(js_name = renderMarkdownWithOptions)]
pub fn render_markdown_with_options(value: JsValue, options: JsValue) -> Result<String, JsValue> {
    let options: RenderOptions = from_js_or_default(options)?;
    Ok(match value.as_string() {
        Some(source) => chatmark_core::render_markdown_with_options(&source, &options),
        None => String::new(),
    })
}

/// Throws with a readable message when the text may not be sent.
#[wasm_bindgen(js_name = validateMessage)]
pub fn validate_message(value: JsValue, limits: JsValue) -> Result<(), JsValue> {
    let limits: MessageLimits = from_js_or_default(limits)?;
    let text = value.as_string().unwrap_or_default();
    chatmark_core::validate_message(&text, &limits)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

fn from_js_or_default<T>(value: JsValue) -> Result<T, JsValue>
where
    T: Default + serde::de::DeserializeOwned,
{
    if value.is_null() || value.is_undefined() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
