use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{Storage, missing_player, missing_round};
use crate::error::AppError;
use crate::model::{NewPlayer, Player, PlayerUpdate, Round, RoundFields, RoundUpdate, Score};

pub const DOCUMENT_FILE: &str = "golf.json";

/// Everything the club knows, serialized as a single document so that a
/// cascade or a multi-score submission is written in one rename.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ClubDocument {
    pub last_player_id: i64,
    pub last_round_id: i64,
    pub last_score_id: i64,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub scores: Vec<Score>,
}

impl ClubDocument {
    fn next_player_id(&mut self) -> i64 {
        self.last_player_id += 1;
        self.last_player_id
    }

    fn next_round_id(&mut self) -> i64 {
        self.last_round_id += 1;
        self.last_round_id
    }

    fn next_score_id(&mut self) -> i64 {
        self.last_score_id += 1;
        self.last_score_id
    }

    fn has_player(&self, id: i64) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    fn has_round(&self, id: i64) -> bool {
        self.rounds.iter().any(|r| r.id == id)
    }
}

/// Document store kept in memory and, unless created with
/// [`JsonStorage::in_memory`], mirrored to `<data dir>/golf.json`.
pub struct JsonStorage {
    path: Option<PathBuf>,
    doc: Mutex<ClubDocument>,
}

impl JsonStorage {
    /// # Errors
    ///
    /// Will return `Err` if the data directory cannot be created or the
    /// existing document cannot be read
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await?;
        let path = data_dir.join(DOCUMENT_FILE);

        let doc = if tokio::fs::try_exists(&path).await? {
            let text = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str::<ClubDocument>(&text)?
        } else {
            ClubDocument::default()
        };
        tracing::debug!(
            path = %path.display(),
            players = doc.players.len(),
            rounds = doc.rounds.len(),
            scores = doc.scores.len(),
            "json document loaded"
        );

        let storage = Self {
            path: Some(path),
            doc: Mutex::new(doc),
        };
        storage.persist(&*storage.doc.lock().await).await?;
        Ok(storage)
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            doc: Mutex::new(ClubDocument::default()),
        }
    }

    async fn persist(&self, doc: &ClubDocument) -> Result<(), AppError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = serde_json::to_string_pretty(doc)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Runs `f` against a copy of the document; the copy replaces the live
    /// document only once it has been written out.
    async fn mutate<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut ClubDocument) -> Result<T, AppError>,
    {
        let mut live = self.doc.lock().await;
        let mut draft = live.clone();
        let out = f(&mut draft)?;
        self.persist(&draft).await?;
        *live = draft;
        Ok(out)
    }
}

fn sort_players(players: &mut [Player]) {
    players.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

fn sort_rounds(rounds: &mut [Round]) {
    rounds.sort_by(|a, b| {
        a.play_date
            .cmp(&b.play_date)
            .then(a.tee_time.cmp(&b.tee_time))
            .then(a.id.cmp(&b.id))
    });
}

fn sort_scores_oldest_first(scores: &mut [Score]) {
    scores.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl Storage for JsonStorage {
    async fn insert_player(&self, player: &NewPlayer) -> Result<Player, AppError> {
        self.mutate(|doc| {
            let player = Player {
                id: doc.next_player_id(),
                name: player.name.clone(),
                handicap: player.handicap,
                created_at: Utc::now(),
            };
            doc.players.push(player.clone());
            Ok(player)
        })
        .await
    }

    async fn players(&self) -> Result<Vec<Player>, AppError> {
        let mut players = self.doc.lock().await.players.clone();
        sort_players(&mut players);
        Ok(players)
    }

    async fn player(&self, id: i64) -> Result<Option<Player>, AppError> {
        let doc = self.doc.lock().await;
        Ok(doc.players.iter().find(|p| p.id == id).cloned())
    }

    async fn update_player(
        &self,
        id: i64,
        update: &PlayerUpdate,
    ) -> Result<Option<Player>, AppError> {
        self.mutate(|doc| {
            let player = doc.players.iter_mut().find(|p| p.id == id);
            Ok(player.map(|player| {
                update.apply_to(player);
                player.clone()
            }))
        })
        .await
    }

    async fn delete_player(&self, id: i64) -> Result<bool, AppError> {
        self.mutate(|doc| {
            if !doc.has_player(id) {
                return Ok(false);
            }
            doc.scores.retain(|s| s.player_id != id);
            doc.players.retain(|p| p.id != id);
            Ok(true)
        })
        .await
    }

    async fn insert_round(&self, round: &RoundFields) -> Result<Round, AppError> {
        self.mutate(|doc| {
            let round = Round {
                id: doc.next_round_id(),
                course_name: round.course_name.clone(),
                play_date: round.play_date,
                tee_time: round.tee_time,
                pick_up: round.pick_up.clone(),
                created_at: Utc::now(),
            };
            doc.rounds.push(round.clone());
            Ok(round)
        })
        .await
    }

    async fn rounds(&self) -> Result<Vec<Round>, AppError> {
        let mut rounds = self.doc.lock().await.rounds.clone();
        sort_rounds(&mut rounds);
        Ok(rounds)
    }

    async fn round(&self, id: i64) -> Result<Option<Round>, AppError> {
        let doc = self.doc.lock().await;
        Ok(doc.rounds.iter().find(|r| r.id == id).cloned())
    }

    async fn update_round(
        &self,
        id: i64,
        update: &RoundUpdate,
    ) -> Result<Option<Round>, AppError> {
        self.mutate(|doc| {
            let round = doc.rounds.iter_mut().find(|r| r.id == id);
            Ok(round.map(|round| {
                update.apply_to(round);
                round.clone()
            }))
        })
        .await
    }

    async fn delete_round(&self, id: i64) -> Result<bool, AppError> {
        self.mutate(|doc| {
            if !doc.has_round(id) {
                return Ok(false);
            }
            doc.scores.retain(|s| s.round_id != Some(id));
            doc.rounds.retain(|r| r.id != id);
            Ok(true)
        })
        .await
    }

    async fn insert_score(&self, player_id: i64, value: i32) -> Result<Score, AppError> {
        self.mutate(|doc| {
            if !doc.has_player(player_id) {
                return Err(missing_player(player_id));
            }
            let score = Score {
                id: doc.next_score_id(),
                player_id,
                round_id: None,
                value,
                recorded_at: Utc::now(),
            };
            doc.scores.push(score.clone());
            Ok(score)
        })
        .await
    }

    async fn upsert_round_scores(
        &self,
        round_id: i64,
        entries: &[(i64, i32)],
    ) -> Result<Vec<Score>, AppError> {
        self.mutate(|doc| {
            if !doc.has_round(round_id) {
                return Err(missing_round(round_id));
            }
            let mut stored = Vec::with_capacity(entries.len());
            for &(player_id, value) in entries {
                if !doc.has_player(player_id) {
                    return Err(missing_player(player_id));
                }
                let existing = doc
                    .scores
                    .iter_mut()
                    .find(|s| s.round_id == Some(round_id) && s.player_id == player_id);
                let score = if let Some(existing) = existing {
                    existing.value = value;
                    existing.clone()
                } else {
                    let score = Score {
                        id: doc.next_score_id(),
                        player_id,
                        round_id: Some(round_id),
                        value,
                        recorded_at: Utc::now(),
                    };
                    doc.scores.push(score.clone());
                    score
                };
                stored.push(score);
            }
            Ok(stored)
        })
        .await
    }

    async fn scores(&self) -> Result<Vec<Score>, AppError> {
        let mut scores = self.doc.lock().await.scores.clone();
        sort_scores_oldest_first(&mut scores);
        scores.reverse();
        Ok(scores)
    }

    async fn score(&self, id: i64) -> Result<Option<Score>, AppError> {
        let doc = self.doc.lock().await;
        Ok(doc.scores.iter().find(|s| s.id == id).cloned())
    }

    async fn scores_for_player(&self, player_id: i64) -> Result<Vec<Score>, AppError> {
        let doc = self.doc.lock().await;
        let mut scores: Vec<Score> = doc
            .scores
            .iter()
            .filter(|s| s.player_id == player_id)
            .cloned()
            .collect();
        sort_scores_oldest_first(&mut scores);
        Ok(scores)
    }

    async fn scores_for_round(&self, round_id: i64) -> Result<Vec<Score>, AppError> {
        let doc = self.doc.lock().await;
        let mut scores: Vec<Score> = doc
            .scores
            .iter()
            .filter(|s| s.round_id == Some(round_id))
            .cloned()
            .collect();
        scores.sort_by_key(|s| s.player_id);
        Ok(scores)
    }

    async fn delete_score(&self, id: i64) -> Result<bool, AppError> {
        self.mutate(|doc| {
            let before = doc.scores.len();
            doc.scores.retain(|s| s.id != id);
            Ok(doc.scores.len() < before)
        })
        .await
    }

    async fn delete_all_scores(&self) -> Result<usize, AppError> {
        self.mutate(|doc| {
            let removed = doc.scores.len();
            doc.scores.clear();
            Ok(removed)
        })
        .await
    }

    async fn reset(&self) -> Result<(), AppError> {
        self.mutate(|doc| {
            *doc = ClubDocument::default();
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_mutation_leaves_document_untouched() {
        let storage = JsonStorage::in_memory();
        let player = storage
            .insert_player(&NewPlayer::new("Anna", 5.0).unwrap())
            .await
            .unwrap();

        let err = storage.insert_score(player.id + 1, 80).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(storage.scores().await.unwrap().is_empty());
        // the failed insert must not have consumed an id
        let score = storage.insert_score(player.id, 80).await.unwrap();
        assert_eq!(score.id, 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let storage = JsonStorage::in_memory();
        let first = storage
            .insert_player(&NewPlayer::new("Anna", 5.0).unwrap())
            .await
            .unwrap();
        assert!(storage.delete_player(first.id).await.unwrap());
        let second = storage
            .insert_player(&NewPlayer::new("Bo", 10.0).unwrap())
            .await
            .unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_deletes_report_one_removal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = std::sync::Arc::new(JsonStorage::open(dir.path()).await.unwrap());
        let player = storage
            .insert_player(&NewPlayer::new("Anna", 5.0).unwrap())
            .await
            .unwrap();
        let score = storage.insert_score(player.id, 80).await.unwrap();

        let score_deletes: Vec<_> = (0..8)
            .map(|_| {
                let storage = std::sync::Arc::clone(&storage);
                tokio::spawn(async move { storage.delete_score(score.id).await })
            })
            .collect();
        let mut removed = 0;
        for handle in score_deletes {
            if handle.await.unwrap().unwrap() {
                removed += 1;
            }
        }
        assert_eq!(removed, 1);

        let player_deletes: Vec<_> = (0..8)
            .map(|_| {
                let storage = std::sync::Arc::clone(&storage);
                tokio::spawn(async move { storage.delete_player(player.id).await })
            })
            .collect();
        let mut removed = 0;
        for handle in player_deletes {
            if handle.await.unwrap().unwrap() {
                removed += 1;
            }
        }
        assert_eq!(removed, 1);
        assert!(storage.players().await.unwrap().is_empty());
    }
}
