//! Echoes Store - durable player records.
//!
//! The one storage port both halves of the game share: the interactive loop
//! saves on quit and loads on start, the fulfillment machine saves and loads
//! for the SaveProgress/LoadProgress intents. Records are keyed by player id
//! and every save replaces the whole record - overwrite, never merge.
//!
//! Adapters:
//! - [`SqlitePlayerRepo`] - durable backing (sqlx, table `player_data`)
//! - [`MemoryPlayerRepo`] - process-local backing for tests and for running
//!   without a database file

mod memory;
mod sqlite;

pub use memory::MemoryPlayerRepo;
pub use sqlite::SqlitePlayerRepo;

use async_trait::async_trait;
use echoes_domain::PlayerState;

/// Storage faults. Callers log these and degrade the turn's output rather
/// than letting them end the game.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Load/save of the canonical player record.
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    /// The stored record, or `None` for a player that never saved.
    async fn load(&self, player_id: &str) -> Result<Option<PlayerState>, StoreError>;

    /// Replace the player's record wholesale. Idempotent: saving the same
    /// state twice yields the same durable state.
    async fn save(&self, state: &PlayerState) -> Result<(), StoreError>;
}
