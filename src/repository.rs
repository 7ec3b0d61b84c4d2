use ahash::AHashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::model::{
    NewPlayer, NewRound, Player, PlayerTotals, PlayerUpdate, Round, RoundUpdate, Score,
    ScorecardLine, leaderboard,
};
use crate::storage::Storage;

/// Entry point for everything the web layer does with players, rounds and
/// scores. Validation happens here; the injected [`Storage`] only sees
/// checked input.
#[derive(Clone)]
pub struct GolfRepository {
    storage: Arc<dyn Storage>,
}

impl GolfRepository {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// # Errors
    ///
    /// Will return `Err` if the name is blank, the handicap is above the
    /// ceiling, or the store fails
    pub async fn register(&self, name: &str, handicap: f64) -> Result<Player, AppError> {
        let new_player = NewPlayer::new(name, handicap).inspect_err(|e| {
            warn!(name, handicap, error = %e, "registration rejected");
        })?;
        let player = self.storage.insert_player(&new_player).await?;
        info!(id = player.id, name = %player.name, "player registered");
        Ok(player)
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        self.storage.players().await
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn find_player(&self, id: i64) -> Result<Option<Player>, AppError> {
        self.storage.player(id).await
    }

    /// Returns `Ok(None)` for an unknown id.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a given name is blank, a given handicap is above
    /// the ceiling, or the store fails
    pub async fn update_player(
        &self,
        id: i64,
        update: PlayerUpdate,
    ) -> Result<Option<Player>, AppError> {
        let update = update.validated().inspect_err(|e| {
            warn!(id, error = %e, "player update rejected");
        })?;
        let player = self.storage.update_player(id, &update).await?;
        if player.is_some() {
            info!(id, "player updated");
        }
        Ok(player)
    }

    /// Removes the player and every score recorded for them. Unknown ids are
    /// a no-op and return `false`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store fails; nothing is removed in that case
    pub async fn delete_player(&self, id: i64) -> Result<bool, AppError> {
        let removed = self.storage.delete_player(id).await?;
        if removed {
            info!(id, "player deleted");
        } else {
            debug!(id, "delete of unknown player ignored");
        }
        Ok(removed)
    }

    /// # Errors
    ///
    /// Will return `Err` if the course name, play date or tee time is
    /// missing, or the store fails
    pub async fn create_round(&self, round: NewRound) -> Result<Round, AppError> {
        let fields = round.validate().inspect_err(|e| {
            warn!(error = %e, "round rejected");
        })?;
        let round = self.storage.insert_round(&fields).await?;
        info!(id = round.id, course = %round.course_name, "round created");
        Ok(round)
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn list_rounds(&self) -> Result<Vec<Round>, AppError> {
        self.storage.rounds().await
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn find_round(&self, id: i64) -> Result<Option<Round>, AppError> {
        self.storage.round(id).await
    }

    /// # Errors
    ///
    /// Will return `Err` if a given course name is blank or the store fails
    pub async fn update_round(
        &self,
        id: i64,
        update: RoundUpdate,
    ) -> Result<Option<Round>, AppError> {
        let update = update.validated()?;
        let round = self.storage.update_round(id, &update).await?;
        if round.is_some() {
            info!(id, "round updated");
        }
        Ok(round)
    }

    /// Removes the round and every score recorded against it.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store fails; nothing is removed in that case
    pub async fn delete_round(&self, id: i64) -> Result<bool, AppError> {
        let removed = self.storage.delete_round(id).await?;
        if removed {
            info!(id, "round deleted");
        }
        Ok(removed)
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn get_player_score(
        &self,
        round_id: i64,
        player_id: i64,
    ) -> Result<Option<i32>, AppError> {
        Ok(self
            .storage
            .scores_for_round(round_id)
            .await?
            .into_iter()
            .find(|s| s.player_id == player_id)
            .map(|s| s.value))
    }

    /// Every player with their score for the round, or `None` for an
    /// unknown round.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn scorecard(
        &self,
        round_id: i64,
    ) -> Result<Option<(Round, Vec<ScorecardLine>)>, AppError> {
        let Some(round) = self.storage.round(round_id).await? else {
            return Ok(None);
        };
        let scores = self.storage.scores_for_round(round_id).await?;
        let lines = self
            .storage
            .players()
            .await?
            .into_iter()
            .map(|player| {
                let score = scores
                    .iter()
                    .find(|s| s.player_id == player.id)
                    .map(|s| s.value);
                ScorecardLine { player, score }
            })
            .collect();
        Ok(Some((round, lines)))
    }

    /// With a round the score replaces any earlier score of the player for
    /// that round; without one a new free-standing score is added.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the player or round does not exist, or the store fails
    pub async fn record_score(
        &self,
        player_id: i64,
        value: i32,
        round_id: Option<i64>,
    ) -> Result<Score, AppError> {
        let score = match round_id {
            Some(round_id) => self
                .storage
                .upsert_round_scores(round_id, &[(player_id, value)])
                .await?
                .pop()
                .ok_or_else(|| AppError::Other("upsert returned no score".to_string()))?,
            None => self.storage.insert_score(player_id, value).await?,
        };
        info!(id = score.id, player_id, ?round_id, value, "score recorded");
        Ok(score)
    }

    /// Applies a whole score entry form for one round, all or nothing.
    /// Entries for players removed since the form was shown are skipped.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the round does not exist or the store fails
    pub async fn record_round_scores(
        &self,
        round_id: i64,
        entries: &[(i64, i32)],
    ) -> Result<Vec<Score>, AppError> {
        let known: AHashSet<i64> = self
            .storage
            .players()
            .await?
            .iter()
            .map(|p| p.id)
            .collect();
        let (current, stale): (Vec<(i64, i32)>, Vec<(i64, i32)>) = entries
            .iter()
            .copied()
            .partition(|(player_id, _)| known.contains(player_id));
        if !stale.is_empty() {
            let skipped: Vec<i64> = stale.iter().map(|(player_id, _)| *player_id).collect();
            warn!(round_id, ?skipped, "scores for unknown players skipped");
        }
        let scores = self.storage.upsert_round_scores(round_id, &current).await?;
        info!(round_id, count = scores.len(), "round scores recorded");
        Ok(scores)
    }

    /// Most recent first.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn list_scores(&self) -> Result<Vec<Score>, AppError> {
        self.storage.scores().await
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn find_score(&self, id: i64) -> Result<Option<Score>, AppError> {
        self.storage.score(id).await
    }

    /// Oldest first.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn list_scores_by_player(&self, player_id: i64) -> Result<Vec<Score>, AppError> {
        self.storage.scores_for_player(player_id).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn delete_score(&self, id: i64) -> Result<bool, AppError> {
        let removed = self.storage.delete_score(id).await?;
        if removed {
            info!(id, "score deleted");
        }
        Ok(removed)
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn reset_scores(&self) -> Result<usize, AppError> {
        let removed = self.storage.delete_all_scores().await?;
        info!(removed, "all scores deleted");
        Ok(removed)
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn reset_all(&self) -> Result<(), AppError> {
        self.storage.reset().await?;
        warn!("database reset");
        Ok(())
    }

    /// # Errors
    ///
    /// Will return `Err` if the store fails
    pub async fn leaderboard(&self) -> Result<Vec<PlayerTotals>, AppError> {
        let players = self.storage.players().await?;
        let mut scores = self.storage.scores().await?;
        scores.reverse();
        Ok(leaderboard(&players, &scores))
    }
}
