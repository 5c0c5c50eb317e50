use anyhow::Result;
use clap::Parser;
use mathkit_cli::{Cli, MathkitConfig};
use std::io;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = MathkitConfig::path();
    let config = MathkitConfig::load_from(&config_path)?.apply_env();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr);
    if config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting mathkit");
    debug!(path = %config_path.display(), ?config, "configuration loaded");

    if cli.show_config {
        eprintln!("{}", toml::to_string_pretty(&config)?);
    }

    let stdout = io::stdout();
    cli.execute(&config, &mut stdout.lock())
}
