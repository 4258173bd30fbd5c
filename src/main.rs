/// Main entry point for the streak engine server
///
/// Sets up logging, resolves the database path, and starts the JSON-RPC
/// server on stdin/stdout.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use streak_engine::StreakServer;

const DB_FILE: &str = "completions.db";

/// Pick the first writable default location for the database file
fn default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::data_dir().map(|p| p.join("streak_engine")),
        dirs::home_dir().map(|p| p.join(".streak_engine")),
        std::env::current_dir().ok().map(|p| p.join(".streak_engine")),
    ];

    for dir in candidates.into_iter().flatten() {
        if dir_is_writable(&dir) {
            return Ok(dir.join(DB_FILE));
        }
    }

    // Last resort: a temporary directory.
    let fallback = std::env::temp_dir().join("streak_engine");
    std::fs::create_dir_all(&fallback)?;
    tracing::warn!("Using temporary directory for database: {}", fallback.display());
    Ok(fallback.join(DB_FILE))
}

/// Create the directory if needed and confirm it actually accepts writes
fn dir_is_writable(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let marker = dir.join(".writecheck");
    let writable = std::fs::write(&marker, b"ok").is_ok();
    let _ = std::fs::remove_file(marker);
    writable
}

/// Command line arguments for the streak engine server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match (args.verbose, args.debug) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    };

    // Logs go to stderr; stdout carries the JSON-RPC stream.
    tracing_subscriber::fmt()
        .with_env_filter(format!("streak_engine={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting streak engine server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let server = StreakServer::new(db_path)?;
    server.run().await?;

    info!("Streak engine server shutdown complete");
    Ok(())
}
