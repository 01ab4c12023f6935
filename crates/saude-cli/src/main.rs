use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use saude_loader::LocationClient;
use saude_render::{HtmlSurface, Session, TextSurface};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "saude")]
#[command(about = "Public-health facility directory: one map and one card list from a single listing")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Listing endpoint; overrides SAUDE_API_URL
    #[arg(long)]
    api_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Terminal text, redrawn on every state change
    Text,
    /// Self-contained HTML page with the interactive map
    Html,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = saude_core::load_app_config()?.with_api_url(cli.api_url.as_deref());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    saude_render::install_default_marker_icon();
    let client = LocationClient::from_config(&config)?;
    let mut out = open_output(cli.output.as_deref())?;

    match cli.format {
        OutputFormat::Text => {
            let mut surface = TextSurface::new(&mut out);
            Session::new(client).run(&mut surface).await?;
        }
        OutputFormat::Html => {
            let mut surface = HtmlSurface::new();
            Session::new(client).run(&mut surface).await?;
            if let Some(document) = surface.document() {
                out.write_all(document.as_bytes())?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}
