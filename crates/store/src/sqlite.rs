//! SQLite-backed player storage.

use async_trait::async_trait;
use chrono::Utc;
use echoes_domain::PlayerState;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use crate::{PlayerRepo, StoreError};

/// SQLite implementation of the player store. The record itself is stored as
/// one JSON column so the schema follows `PlayerState` without migrations.
pub struct SqlitePlayerRepo {
    pool: SqlitePool,
}

impl SqlitePlayerRepo {
    /// Open (creating if needed) a database file.
    pub async fn new(db_path: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| StoreError::database("connect", e))?;
        Self::with_pool(pool).await
    }

    /// A private in-memory database, one connection so state is shared.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| StoreError::database("connect", e))?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS player_data (
                player_id TEXT NOT NULL PRIMARY KEY,
                record_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::database("create_table", e))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl PlayerRepo for SqlitePlayerRepo {
    async fn load(&self, player_id: &str) -> Result<Option<PlayerState>, StoreError> {
        let row = sqlx::query("SELECT record_json FROM player_data WHERE player_id = ?")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database("load", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("record_json");
                let state =
                    serde_json::from_str(&json).map_err(StoreError::serialization)?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, state: &PlayerState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state).map_err(StoreError::serialization)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO player_data (player_id, record_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(player_id) DO UPDATE SET
                record_json = excluded.record_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&state.player_id)
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::database("save", e))?;

        Ok(())
    }
}
