mod app;
mod commands;
mod config;
mod event;
mod fetch;
mod logging;
mod routes;
mod shell;
mod ui;
mod wp;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wpfolio")]
#[command(about = "A terminal front end for a headless WordPress portfolio site")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./wpfolio.yaml or $XDG_CONFIG_HOME/wpfolio/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Site origin, e.g. https://example.com
  #[arg(short, long, env = "WPFOLIO_ORIGIN")]
  origin: Option<String>,

  /// Log file (default: $XDG_DATA_HOME/wpfolio/wpfolio.log)
  #[arg(long)]
  log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let _log_guard = logging::init(args.log_file.as_deref())?;

  let config = config::Config::load(args.config.as_deref())?.with_origin(args.origin);
  tracing::info!(origin = %config.origin, "starting wpfolio");

  let mut app = app::App::new(config)?;
  app.run().await?;

  Ok(())
}
