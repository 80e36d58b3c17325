use clap::Parser;
use log::debug;
use pug_client::cli::dispatcher::Dispatcher;
use pug_client::cli::main_types::Cli;
use pug_client::storage::config::Config;
use pug_client::utils::logging::init_logging;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    let profile_name = config.resolve_profile_name(cli.profile.as_deref());
    debug!("Using profile: {}", profile_name);
    if let Some(config_dir) = &cli.config_dir {
        debug!("Using config directory: {}", config_dir);
    }

    let mut dispatcher = Dispatcher::new(config, profile_name, cli.api_key)
        .with_config_path(config_path)
        .with_url(cli.url)
        .with_json(cli.json);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error [{}]: {}", e.severity().label(), e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
