use chatmark_core::{
    Escaping, MessageLimits, RenderOptions, render_markdown, render_markdown_with_options,
};

const RAW: &str = "## Tips & tricks\n\nVisit [our site](https://example.com/?a=1&b=2) or run `<kbd>`.";

#[test]
fn options_decode_from_camel_case_json() -> Result<(), Box<dyn std::error::Error>> {
    let options: RenderOptions =
        serde_json::from_str(r#"{ "escaping": "constructs", "fixPunctuation": false }"#)?;
    assert_eq!(options.escaping, Escaping::Constructs);
    assert!(!options.fix_punctuation);
    assert!(!options.sanitize);
    Ok(())
}

#[test]
fn missing_fields_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let options: RenderOptions = serde_json::from_str("{}")?;
    assert_eq!(options, RenderOptions::default());

    let limits: MessageLimits = serde_json::from_str(r#"{ "maxLength": 80 }"#)?;
    assert_eq!(limits.min_length, 1);
    assert_eq!(limits.max_length, 80);
    Ok(())
}

#[test]
fn unknown_escaping_mode_is_rejected() {
    let parsed: Result<RenderOptions, _> = serde_json::from_str(r#"{ "escaping": "none" }"#);
    assert!(parsed.is_err());
}

#[test]
fn default_mode_escapes_link_targets_and_code_spans() {
    assert_eq!(
        render_markdown(RAW),
        "<h2>Tips &amp; tricks</h2><p>Visit <a href=\"https://example.com/?a=1&amp;b=2\" \
         target=\"_blank\" rel=\"noopener noreferrer\">our site</a> or run <code>&lt;kbd&gt;</code>.</p>"
    );
}

#[test]
fn compat_mode_keeps_historical_raw_output() {
    let html = render_markdown_with_options(RAW, &RenderOptions::compat());
    assert!(html.starts_with("<h2>Tips &amp; tricks</h2>"));
    assert!(html.contains("href=\"https://example.com/?a=1&b=2\""));
    assert!(html.contains("<code><kbd></code>"));
}

#[test]
fn compat_mode_passes_paragraph_html_through() {
    let html = render_markdown_with_options("<b>hi</b>", &RenderOptions::compat());
    assert_eq!(html, "<p><b>hi</b></p>");
}

#[test]
fn neither_mode_double_escapes() {
    for options in [RenderOptions::default(), RenderOptions::compat()] {
        let html = render_markdown_with_options("# A & B\n\n```\nx && y\n```", &options);
        assert_eq!(
            html,
            "<h1>A &amp; B</h1><pre><code>x &amp;&amp; y</code></pre>"
        );
    }
}

#[test]
fn sanitize_strips_dangerous_links_in_compat_mode() {
    let options = RenderOptions {
        sanitize: true,
        ..RenderOptions::compat()
    };
    let html = render_markdown_with_options(
        "[click](javascript:alert(1)) <img src=x onerror=alert(1)>",
        &options,
    );
    assert!(!html.contains("javascript:"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("onerror"));
    assert!(html.contains(">click</a>"));
}

#[test]
fn sanitize_keeps_rendered_markup() {
    let options = RenderOptions {
        sanitize: true,
        ..RenderOptions::default()
    };
    let source = "# Hi\n\n- **a**\n- *b*\n\n| x |\n|---|\n| `y` |";
    assert_eq!(
        render_markdown_with_options(source, &options),
        render_markdown(source)
    );
}

#[test]
fn semicolon_after_an_ampersand_follows_the_letter_rule() {
    assert_eq!(render_markdown("A&B;C"), "<p>A&amp;B, C</p>");
    assert_eq!(render_markdown("x<y;z"), "<p>x&lt;y, z</p>");
    assert_eq!(render_markdown("AB;C"), "<p>AB, C</p>");

    let compat = RenderOptions::compat();
    assert_eq!(render_markdown_with_options("A&B;C", &compat), "<p>A&B, C</p>");
    assert_eq!(render_markdown_with_options("x<y;z", &compat), "<p>x<y, z</p>");
}
