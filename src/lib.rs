/// Public library interface for the streak engine
///
/// Exposes the pure calculators (streaks, period performance), the bulk
/// mutation coordinator, the storage trait with its SQLite implementation,
/// and the server that serves it all over JSON-RPC.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod engine;
mod ops;
mod rpc;

// Re-export public modules and types
pub use domain::*;
pub use storage::{CompletionStore, SqliteStore, StorageError};
pub use engine::{BulkCompleteOutcome, BulkPolicy, BulkUncompleteOutcome, EngineError};
pub use ops::{
    bulk_complete, bulk_uncomplete, get_performance, get_streaks, register_habit, BulkParams,
    PerformanceParams, Period, RegisterHabitParams, StreaksParams,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Engine error: {0}")]
    Engine(#[from] engine::EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Streak engine server
///
/// Owns the SQLite store and serves the streak, performance, and bulk
/// mutation operations over JSON-RPC on stdin/stdout.
pub struct StreakServer {
    store: SqliteStore,
}

impl StreakServer {
    /// Create a new server with the specified database path
    ///
    /// Initializes the SQLite schema if it doesn't already exist.
    pub fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing streak engine with database: {:?}", db_path);

        let store = SqliteStore::new(db_path)?;

        Ok(Self { store })
    }

    /// Run the JSON-RPC server, handling requests over stdin/stdout
    ///
    /// Blocks until stdin closes or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting RPC server...");

        let mut rpc_server = rpc::RpcServer::new(self);
        rpc_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing and embedding)
    pub fn store(&self) -> &SqliteStore {
        &self.store
    }
}
