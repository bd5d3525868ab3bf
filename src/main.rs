mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use mf_core::config::Config;
use mf_engine::MovieService;
use std::path::Path;

/// Load the config file (or defaults) and layer environment overrides on top.
fn load_config(path: Option<&Path>) -> Config {
    let mut config = Config::load_or_default(path);
    config.apply_env();
    config
}

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path);

    // CLI flags win over file and environment.
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting moviefuse server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    mf_server::start(config).await?;
    Ok(())
}

async fn search(query: &str, page: u32, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let movies = MovieService::from_config(&config)?;

    let results = movies
        .search(query, page)
        .await
        .with_context(|| format!("search for {query:?} failed"))?;

    println!("{}", serde_json::to_string_pretty(&results.results)?);
    Ok(())
}

async fn details(id: u64, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let movies = MovieService::from_config(&config)?;

    let movie = movies
        .details(id)
        .await
        .with_context(|| format!("failed to fetch movie {id}"))?;

    println!("{}", serde_json::to_string_pretty(&movie)?);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            let mut config = Config::from_json(&contents)?;
            config.apply_env();
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            load_config(None)
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Static files: {}",
        config
            .server
            .static_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "disabled".to_string())
    );
    println!(
        "  Rate limit: {}",
        config
            .server
            .requests_per_minute
            .map(|r| format!("{r}/min"))
            .unwrap_or_else(|| "disabled".to_string())
    );
    println!("  TMDB: {}", config.providers.tmdb.base_url);
    println!("  OMDb: {}", config.providers.omdb.base_url);

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No warnings");
    }
    for warning in warnings {
        println!("  warning: {warning}");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "moviefuse=trace,mf_engine=trace,mf_providers=debug,mf_server=debug,tower_http=debug"
                .to_string()
        } else {
            "moviefuse=info,mf_engine=info,mf_providers=info,mf_server=info,tower_http=info"
                .to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Search { query, page } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(search(&query, page, cli.config.as_deref()))
        }
        Commands::Details { id } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(details(id, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("moviefuse {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
