//! blogpessoal CLI - run the blog HTTP backend
//!
//! Subcommands:
//! - `serve`: start the HTTP server (runs migrations first)
//! - `migrate`: run database migrations and exit

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "blogpessoal",
    author,
    version,
    about = "HTTP backend for a personal blog - postagens and temas over JSON"
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Run database migrations and exit
    Migrate(commands::migrate::MigrateArgs),
}

fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values become visible to clap's env-backed arguments
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dotenv_file_feeds_environment() {
        // dotenvy never overrides variables that are already set, so the
        // probe uses a name nothing else exports.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "BLOGPESSOAL_DOTENV_PROBE=postgres://example/db\n").unwrap();

        dotenvy::from_path(&path).unwrap();
        assert_eq!(
            std::env::var("BLOGPESSOAL_DOTENV_PROBE").unwrap(),
            "postgres://example/db"
        );
    }
}
