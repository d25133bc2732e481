mod paint;
mod renderer;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::svg::render_svg;
use folio_core::{FolioConfig, Page, Section};
use folio_protocol::Viewport;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Interactive portfolio in the terminal", long_about = None)]
struct Cli {
    /// Config file path (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the resume as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Write one section as a standalone SVG and exit
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Section to start on (or to export with --svg)
    #[arg(long, default_value = "work")]
    section: Section,

    /// Use the dark palette for --svg
    #[arg(long)]
    dark: bool,

    /// SVG width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// SVG height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would corrupt the alternate screen, so the interactive view
    // stays silent unless RUST_LOG asks otherwise.
    let interactive = !cli.dump && cli.svg.is_none();
    let default_filter = if interactive { "off" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &cli.config {
        Some(path) => FolioConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FolioConfig::default(),
    };
    let mut page = Page::embedded(config).context("loading embedded content")?;

    if cli.dump {
        let json = serde_json::to_string_pretty(page.resume())?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{json}")?;
        return Ok(());
    }

    if let Some(path) = &cli.svg {
        // One frame so animated values are initialized.
        page.tick(0.0);
        let viewport = Viewport::sized(cli.width, cli.height);
        let commands = page.render_section(cli.section, &viewport);
        let svg = render_svg(&commands, cli.width, cli.height, cli.dark);
        std::fs::write(path, svg)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {} section to {}", cli.section, path.display());
        return Ok(());
    }

    renderer::run(&mut page, cli.section)
}
