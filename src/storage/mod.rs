pub mod json;
pub mod sqlite;

use async_trait::async_trait;
use clap::ValueEnum;
use std::sync::Arc;

use crate::args::CleanArgs;
use crate::error::AppError;
use crate::model::{NewPlayer, Player, PlayerUpdate, Round, RoundFields, RoundUpdate, Score};

pub use json::JsonStorage;
pub use sqlite::SqliteStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    Sqlite,
    Json,
    Memory,
}

/// Backing store for players, rounds and scores.
///
/// Inputs are already validated. Implementations own referential integrity:
/// scores are only written against existing parents, and deleting a parent
/// removes its scores in the same atomic unit.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_player(&self, player: &NewPlayer) -> Result<Player, AppError>;
    /// Ordered by name (byte order), then id.
    async fn players(&self) -> Result<Vec<Player>, AppError>;
    async fn player(&self, id: i64) -> Result<Option<Player>, AppError>;
    async fn update_player(
        &self,
        id: i64,
        update: &PlayerUpdate,
    ) -> Result<Option<Player>, AppError>;
    /// Returns `false` when no such player exists.
    async fn delete_player(&self, id: i64) -> Result<bool, AppError>;

    async fn insert_round(&self, round: &RoundFields) -> Result<Round, AppError>;
    /// Ordered by play date, then tee time, then id.
    async fn rounds(&self) -> Result<Vec<Round>, AppError>;
    async fn round(&self, id: i64) -> Result<Option<Round>, AppError>;
    async fn update_round(&self, id: i64, update: &RoundUpdate)
    -> Result<Option<Round>, AppError>;
    async fn delete_round(&self, id: i64) -> Result<bool, AppError>;

    async fn insert_score(&self, player_id: i64, value: i32) -> Result<Score, AppError>;
    /// Applies every (player, value) pair for the round as one unit. An
    /// existing pair keeps its id and timestamp and takes the new value.
    async fn upsert_round_scores(
        &self,
        round_id: i64,
        entries: &[(i64, i32)],
    ) -> Result<Vec<Score>, AppError>;
    /// Most recent first.
    async fn scores(&self) -> Result<Vec<Score>, AppError>;
    async fn score(&self, id: i64) -> Result<Option<Score>, AppError>;
    /// Oldest first.
    async fn scores_for_player(&self, player_id: i64) -> Result<Vec<Score>, AppError>;
    async fn scores_for_round(&self, round_id: i64) -> Result<Vec<Score>, AppError>;
    async fn delete_score(&self, id: i64) -> Result<bool, AppError>;
    async fn delete_all_scores(&self) -> Result<usize, AppError>;

    /// Drops every record and starts over with an empty store.
    async fn reset(&self) -> Result<(), AppError>;
}

/// # Errors
///
/// Will return `Err` if the backing store cannot be opened
pub async fn open_storage(args: &CleanArgs) -> Result<Arc<dyn Storage>, AppError> {
    let storage: Arc<dyn Storage> = match args.db_type {
        StorageKind::Sqlite => Arc::new(SqliteStorage::open(&args.db_name)?),
        StorageKind::Json => Arc::new(JsonStorage::open(&args.data_dir).await?),
        StorageKind::Memory => Arc::new(JsonStorage::in_memory()),
    };
    tracing::info!(backend = ?args.db_type, "storage ready");
    Ok(storage)
}

pub(crate) fn missing_player(id: i64) -> AppError {
    AppError::NotFound(format!("player {id}"))
}

pub(crate) fn missing_round(id: i64) -> AppError {
    AppError::NotFound(format!("round {id}"))
}
