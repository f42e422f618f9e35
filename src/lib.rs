pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use cli::{Cli, Commands};
pub use config::Config;
use state::SharedState;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    let command = cli.command.unwrap_or(Commands::Serve);
    if matches!(command, Commands::Init) {
        return cli::cmd_init();
    }

    let state = Arc::new(SharedState::new(config).context("Failed to initialize services")?);

    match command {
        Commands::Serve => cli::cmd_serve(state).await,
        Commands::Ingest { source } => cli::cmd_ingest(&state, source).await,
        Commands::Search { query } => cli::cmd_search_manga(&state, &query.join(" ")).await,
        Commands::List {
            name,
            genres,
            status,
        } => {
            cli::cmd_list_manga(
                &state,
                name.as_deref(),
                genres.as_deref(),
                status.as_deref(),
            )
            .await
        }
        Commands::Init => cli::cmd_init(),
    }
}
