//! Symbol Registry - Main Entry Point

use analytics::PriceSimulator;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use symbol_registry::bootstrap::{self, ServeOptions};

#[derive(Parser)]
#[command(name = "symbol-registry", version)]
#[command(about = "Symbol lookup service backed by PostgreSQL")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (default)
    Serve(ServeArgs),
    /// Register tickers in the database
    Seed {
        /// Configuration file path
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Tickers to register
        #[arg(required = true)]
        tickers: Vec<String>,
    },
    /// Print simulated price ticks as JSON lines
    Simulate {
        /// Tickers to simulate
        #[arg(long = "ticker", required = true, num_args = 1..)]
        tickers: Vec<String>,
        /// Number of ticks per symbol
        #[arg(long, default_value_t = 10)]
        steps: usize,
        /// Starting price for every symbol
        #[arg(long, default_value_t = 100.0)]
        initial_price: f64,
        /// Per-tick volatility
        #[arg(long, default_value_t = 0.01)]
        volatility: f64,
    },
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Bind host
    #[arg(long)]
    host: Option<String>,
    /// Bind port
    #[arg(long)]
    port: Option<u16>,
    /// Serve from an empty in-memory store instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
    /// Do not create the schema on startup
    #[arg(long)]
    skip_migrations: bool,
}

impl From<ServeArgs> for ServeOptions {
    fn from(args: ServeArgs) -> Self {
        Self {
            config: args.config,
            host: args.host,
            port: args.port,
            in_memory: args.in_memory,
            skip_migrations: args.skip_migrations,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging comes up first so secret loading can report failures
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "symbol_registry=info,secrets_manager=info,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            info!("Starting symbol registry v{}", env!("CARGO_PKG_VERSION"));
            bootstrap::run_server(args.into()).await
        }
        Commands::Seed { config, tickers } => {
            let startup = bootstrap::prepare(config.as_deref())?;
            let repository = bootstrap::open_repository(&startup.config.database)
                .await
                .context("Failed to open symbol store")?;
            let summary = bootstrap::seed(&repository, &tickers).await?;
            info!(
                inserted = summary.inserted.len(),
                duplicates = summary.duplicates.len(),
                "Seeding finished"
            );
            Ok(())
        }
        Commands::Simulate {
            tickers,
            steps,
            initial_price,
            volatility,
        } => {
            let mut simulator = PriceSimulator::new();
            for ticker in tickers {
                simulator.add_symbol(ticker, initial_price, volatility)?;
            }
            for _ in 0..steps {
                for tick in simulator.tick() {
                    println!("{}", serde_json::to_string(&tick)?);
                }
            }
            Ok(())
        }
    }
}
