use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use chatmark_core::{Escaping, RenderOptions, render_markdown_with_options};
use chatmark_renderer::{Renderer, Theme};
use clap::{ArgAction, Parser, ValueEnum};

/// Render chat-message markdown to an HTML fragment.
#[derive(Parser, Debug)]
#[command(name = "chatmark", version)]
struct Args {
    /// Pass the output through the HTML allow-list sanitizer
    #[arg(long)]
    sanitized: bool,

    /// Escape only code blocks, headers and table cells, as older widgets did
    #[arg(long)]
    compat: bool,

    /// Leave semicolons untouched
    #[arg(long = "no-punctuation-fix")]
    no_punctuation_fix: bool,

    /// JSON file with render options (camelCase keys)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wrap the fragment in a standalone preview page with the widget stylesheet
    #[arg(long)]
    page: bool,

    /// Palette used by --page and --highlight
    #[arg(long, value_enum, default_value_t = ThemeArg::Auto)]
    theme: ThemeArg,

    /// Syntax-highlight fenced code blocks
    #[arg(long)]
    highlight: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Markdown file to render; stdin when omitted
    input: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Auto,
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Auto => Theme::Auto,
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

impl Args {
    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid config {path}: {source}")]
    Config {
        path: String,
        source: serde_json::Error,
    },
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .try_init()
        .ok();

    match run(&args) {
        Ok(html) => print!("{}", html),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let source = read_source(args.input.as_ref())?;
    let options = load_options(args)?;
    log::debug!("render options: {:?}", options);

    let mut html = render_markdown_with_options(&source, &options);
    let renderer = Renderer::new(args.theme.into());
    if args.highlight {
        html = renderer.highlight_html(&html);
    }
    if args.page {
        html = renderer.embed_html(&html, true);
    } else if !html.is_empty() {
        html.push('\n');
    }
    Ok(html)
}

fn read_source(input: Option<&PathBuf>) -> Result<String, CliError> {
    match input {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| CliError::Read {
                    path: "stdin".to_string(),
                    source,
                })?;
            Ok(buffer)
        }
    }
}

fn load_options(args: &Args) -> Result<RenderOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => {
            let display = path.display().to_string();
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: display.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::Config {
                path: display,
                source,
            })?
        }
        None => RenderOptions::default(),
    };

    if args.compat {
        options.escaping = Escaping::Constructs;
    }
    if args.no_punctuation_fix {
        options.fix_punctuation = false;
    }
    if args.sanitized {
        options.sanitize = true;
    }
    Ok(options)
}
