use clap::Parser;
use tracing::debug;

use fundtrack::app::App;
use fundtrack::cli::args::{Cli, Commands};
use fundtrack::cli::commands;
use fundtrack::config::{load_config, Credentials, FundtrackConfig};
use fundtrack::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.global_opts.verbose);

    // Load configuration (file + CLI overrides)
    let mut config = load_config(cli.global_opts.config.as_deref())?;
    if let Some(api_base) = cli.global_opts.api_base {
        config.backend.base_url = api_base;
    }
    let format = cli.global_opts.format.clone();

    // Dispatch to subcommand handler
    match cli.command {
        Commands::Funds => {
            commands::funds(&build_app(config), format).await?;
        }
        Commands::Estimate(args) => {
            commands::estimate(args, &build_app(config), format).await?;
        }
        Commands::AddFund(args) => {
            commands::add_fund(args, &build_app(config), format).await?;
        }
        Commands::Record(args) => {
            commands::record(args, &build_app(config), format).await?;
        }
        Commands::Chat(args) => {
            commands::chat(args, &build_app(config), format).await?;
        }
        Commands::View(args) => {
            commands::view(args, &build_app(config), format).await?;
        }
        Commands::Providers => {
            commands::providers(&build_app(config), format).await?;
        }
        Commands::Init(args) => {
            commands::init(args).await?;
        }
        Commands::Config(args) => {
            commands::config(args, &config).await?;
        }
    }

    Ok(())
}

fn build_app(config: FundtrackConfig) -> App {
    debug!("Reading credentials");
    let credentials = Credentials::from_env(&config.ai);
    App::new(config, &credentials)
}

fn init_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directive(verbosity)));

    // stdout carries command output, including --format json
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Filter for `-v` count. HTTP client internals stay at warn until -vvv.
fn log_directive(verbosity: u8) -> String {
    match verbosity {
        0 => "warn".to_string(),
        1 => "fundtrack=info,warn".to_string(),
        2 => "fundtrack=debug,warn".to_string(),
        _ => "trace".to_string(),
    }
}
