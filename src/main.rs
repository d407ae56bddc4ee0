use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdcompose::present::present_document;
use mdcompose::{Config, Error, MarkdownView, SAMPLE, ViewMode};

#[derive(Parser)]
#[command(name = "mdcompose")]
#[command(about = "Render Markdown into a styled layout tree")]
struct Cli {
    /// Input Markdown file (defaults to the built-in sample)
    input: Option<PathBuf>,

    /// Render the built-in sample document
    #[arg(long, conflicts_with = "input")]
    sample: bool,

    /// Show the raw source instead of the rendered layout
    #[arg(long)]
    raw: bool,

    /// Print each text block with its resolved theme style
    #[arg(long)]
    styles: bool,

    /// Config file (defaults to mdcompose.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&PathBuf::from("mdcompose.toml"))?,
    };

    let markdown = match cli.input.as_ref().filter(|_| !cli.sample) {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::ReadInput {
            path: path.clone(),
            source,
        })?,
        None => SAMPLE.to_string(),
    };

    let mut view = MarkdownView::with_spacing(markdown, config.spacing);
    if cli.raw {
        view.on_double_tap();
    }

    let layout = view.render();
    if cli.styles {
        for text in present_document(&layout, &config.theme()) {
            let style = text.style();
            println!(
                "{} {:?} {:?} {:?}",
                style.size,
                style.weight,
                style.family,
                text.text().text()
            );
        }
        return Ok(());
    }

    match view.mode() {
        ViewMode::Rendered => print!("{layout}"),
        ViewMode::RawText => {
            for block in layout.text_blocks() {
                print!("{}", block.text.text());
            }
        }
    }
    Ok(())
}
