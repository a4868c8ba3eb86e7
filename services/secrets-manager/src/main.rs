//! Secrets Manager CLI
//!
//! Usage:
//!   secrets-manager check
//!   secrets-manager list

use anyhow::Result;
use clap::{Parser, Subcommand};
use secrets_manager::{SecretLoader, SecretSpec, load_secrets};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "secrets-manager")]
#[command(about = "Inspect file-mounted secrets without revealing their values")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve secrets from the current environment and report the outcome
    Check,
    /// List the secret file variables and the properties they populate
    List,
}

fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "secrets_manager=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            let report = load_secrets();
            for status in report.iter() {
                println!(
                    "{:<14} {:<18} {}",
                    status.spec.property, status.spec.path_var, status.outcome
                );
            }

            let failed = report.failed().count();
            if failed > 0 {
                anyhow::bail!("{failed} secret(s) could not be loaded");
            }
        }
        Commands::List => {
            for SecretSpec {
                name,
                path_var,
                property,
            } in SecretLoader::default().specs()
            {
                println!("{path_var:<18} -> {property:<14} ({name})");
            }
        }
    }

    Ok(())
}
