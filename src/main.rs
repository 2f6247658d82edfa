//! folio - a single-page portfolio site generator.

mod build;
mod chat;
mod check;
mod cli;
mod config;
mod data;
mod init;
mod interact;
mod logger;
mod render;
mod serve;
mod utils;
mod watch;

use anyhow::{Result, bail};
use build::build_site;
use chat::run_chat;
use check::check_data;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use init::new_site;
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    logger::set_verbose(cli.verbose);
    init_config(load_config(cli)?);

    let config = cfg();
    match &cli.command {
        Commands::Init { .. } => new_site(&config),
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Serve { .. } => {
            build_site(&config)?;
            serve_site()
        }
        Commands::Check { strict } => check_data(&config, *strict).map(|_| ()),
        Commands::Chat { query } => run_chat(&config, query),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing `folio.toml` falls back to the defaults for every command but `init`.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    if cli.is_init() {
        if config.config_path.exists() {
            bail!("Config file already exists. Remove it manually or init in a different path.");
        }
        return Ok(config);
    }

    config.validate()?;
    Ok(config)
}
