use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use std::sync::{Arc, Mutex};

use super::{Storage, missing_player, missing_round};
use crate::error::AppError;
use crate::model::{NewPlayer, Player, PlayerUpdate, Round, RoundFields, RoundUpdate, Score};

const PLAYER_COLUMNS: &str = "id, name, handicap, created_at";
const ROUND_COLUMNS: &str = "id, course_name, play_date, tee_time, pick_up, created_at";
const SCORE_COLUMNS: &str = "id, player_id, round_id, value, recorded_at";

/// SQLite-backed store. One connection is shared behind a mutex and driven
/// from tokio's blocking pool.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

#[must_use]
pub fn schema_sql() -> String {
    [
        include_str!("../sql/schema/sqlite/01_players.sql"),
        include_str!("../sql/schema/sqlite/02_rounds.sql"),
        include_str!("../sql/schema/sqlite/03_scores.sql"),
    ]
    .join("\n")
}

impl SqliteStorage {
    /// Opens (or creates) the database file at `path`; `:memory:` gives a
    /// private in-memory database.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be opened or the schema cannot be created
    pub fn open(path: &str) -> Result<Self, AppError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(&schema_sql())?;
        tracing::debug!(path, "sqlite schema ready");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// # Errors
    ///
    /// Will return `Err` if the schema cannot be created
    pub fn in_memory() -> Result<Self, AppError> {
        Self::open(":memory:")
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| AppError::Db(format!("connection lock poisoned: {e}")))?;
            f(&mut *guard)
        })
        .await?
    }
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        handicap: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn round_from_row(row: &Row<'_>) -> rusqlite::Result<Round> {
    Ok(Round {
        id: row.get(0)?,
        course_name: row.get(1)?,
        play_date: row.get(2)?,
        tee_time: row.get(3)?,
        pick_up: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn score_from_row(row: &Row<'_>) -> rusqlite::Result<Score> {
    Ok(Score {
        id: row.get(0)?,
        player_id: row.get(1)?,
        round_id: row.get(2)?,
        value: row.get(3)?,
        recorded_at: row.get(4)?,
    })
}

fn find_player(tx: &Transaction<'_>, id: i64) -> Result<Option<Player>, AppError> {
    let query = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");
    Ok(tx.query_row(&query, [id], player_from_row).optional()?)
}

fn find_round(tx: &Transaction<'_>, id: i64) -> Result<Option<Round>, AppError> {
    let query = format!("SELECT {ROUND_COLUMNS} FROM rounds WHERE id = ?1");
    Ok(tx.query_row(&query, [id], round_from_row).optional()?)
}

fn query_scores(
    conn: &Connection,
    filter_and_order: &str,
    id: Option<i64>,
) -> Result<Vec<Score>, AppError> {
    let query = format!("SELECT {SCORE_COLUMNS} FROM scores {filter_and_order}");
    let mut stmt = conn.prepare(&query)?;
    let rows = match id {
        Some(id) => stmt.query_map([id], score_from_row)?,
        None => stmt.query_map([], score_from_row)?,
    };
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn insert_player(&self, player: &NewPlayer) -> Result<Player, AppError> {
        let player = player.clone();
        self.with_conn(move |conn| {
            let created_at = Utc::now();
            conn.execute(
                "INSERT INTO players (name, handicap, created_at) VALUES (?1, ?2, ?3)",
                params![player.name, player.handicap, created_at],
            )?;
            Ok(Player {
                id: conn.last_insert_rowid(),
                name: player.name,
                handicap: player.handicap,
                created_at,
            })
        })
        .await
    }

    async fn players(&self) -> Result<Vec<Player>, AppError> {
        self.with_conn(|conn| {
            let query = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY name, id");
            let mut stmt = conn.prepare(&query)?;
            let players = stmt
                .query_map([], player_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(players)
        })
        .await
    }

    async fn player(&self, id: i64) -> Result<Option<Player>, AppError> {
        self.with_conn(move |conn| {
            let query = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");
            Ok(conn.query_row(&query, [id], player_from_row).optional()?)
        })
        .await
    }

    async fn update_player(
        &self,
        id: i64,
        update: &PlayerUpdate,
    ) -> Result<Option<Player>, AppError> {
        let update = update.clone();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let Some(mut player) = find_player(&tx, id)? else {
                return Ok(None);
            };
            update.apply_to(&mut player);
            tx.execute(
                "UPDATE players SET name = ?1, handicap = ?2 WHERE id = ?3",
                params![player.name, player.handicap, id],
            )?;
            tx.commit()?;
            Ok(Some(player))
        })
        .await
    }

    async fn delete_player(&self, id: i64) -> Result<bool, AppError> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let scores = tx.execute("DELETE FROM scores WHERE player_id = ?1", [id])?;
            let players = tx.execute("DELETE FROM players WHERE id = ?1", [id])?;
            tx.commit()?;
            if players > 0 {
                tracing::debug!(id, scores, "player and scores removed");
            }
            Ok(players > 0)
        })
        .await
    }

    async fn insert_round(&self, round: &RoundFields) -> Result<Round, AppError> {
        let round = round.clone();
        self.with_conn(move |conn| {
            let created_at = Utc::now();
            conn.execute(
                "INSERT INTO rounds (course_name, play_date, tee_time, pick_up, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    round.course_name,
                    round.play_date,
                    round.tee_time,
                    round.pick_up,
                    created_at
                ],
            )?;
            Ok(Round {
                id: conn.last_insert_rowid(),
                course_name: round.course_name,
                play_date: round.play_date,
                tee_time: round.tee_time,
                pick_up: round.pick_up,
                created_at,
            })
        })
        .await
    }

    async fn rounds(&self) -> Result<Vec<Round>, AppError> {
        self.with_conn(|conn| {
            let query =
                format!("SELECT {ROUND_COLUMNS} FROM rounds ORDER BY play_date, tee_time, id");
            let mut stmt = conn.prepare(&query)?;
            let rounds = stmt
                .query_map([], round_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rounds)
        })
        .await
    }

    async fn round(&self, id: i64) -> Result<Option<Round>, AppError> {
        self.with_conn(move |conn| {
            let query = format!("SELECT {ROUND_COLUMNS} FROM rounds WHERE id = ?1");
            Ok(conn.query_row(&query, [id], round_from_row).optional()?)
        })
        .await
    }

    async fn update_round(
        &self,
        id: i64,
        update: &RoundUpdate,
    ) -> Result<Option<Round>, AppError> {
        let update = update.clone();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let Some(mut round) = find_round(&tx, id)? else {
                return Ok(None);
            };
            update.apply_to(&mut round);
            tx.execute(
                "UPDATE rounds SET course_name = ?1, play_date = ?2, tee_time = ?3, pick_up = ?4
                 WHERE id = ?5",
                params![
                    round.course_name,
                    round.play_date,
                    round.tee_time,
                    round.pick_up,
                    id
                ],
            )?;
            tx.commit()?;
            Ok(Some(round))
        })
        .await
    }

    async fn delete_round(&self, id: i64) -> Result<bool, AppError> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM scores WHERE round_id = ?1", [id])?;
            let rounds = tx.execute("DELETE FROM rounds WHERE id = ?1", [id])?;
            tx.commit()?;
            Ok(rounds > 0)
        })
        .await
    }

    async fn insert_score(&self, player_id: i64, value: i32) -> Result<Score, AppError> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            if find_player(&tx, player_id)?.is_none() {
                return Err(missing_player(player_id));
            }
            let recorded_at = Utc::now();
            tx.execute(
                "INSERT INTO scores (player_id, round_id, value, recorded_at)
                 VALUES (?1, NULL, ?2, ?3)",
                params![player_id, value, recorded_at],
            )?;
            let score = Score {
                id: tx.last_insert_rowid(),
                player_id,
                round_id: None,
                value,
                recorded_at,
            };
            tx.commit()?;
            Ok(score)
        })
        .await
    }

    async fn upsert_round_scores(
        &self,
        round_id: i64,
        entries: &[(i64, i32)],
    ) -> Result<Vec<Score>, AppError> {
        let entries = entries.to_vec();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            if find_round(&tx, round_id)?.is_none() {
                return Err(missing_round(round_id));
            }
            let mut stored = Vec::with_capacity(entries.len());
            {
                let query = format!(
                    "INSERT INTO scores (player_id, round_id, value, recorded_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(round_id, player_id) DO UPDATE SET value = excluded.value
                     RETURNING {SCORE_COLUMNS}"
                );
                let mut stmt = tx.prepare(&query)?;
                for (player_id, value) in entries {
                    if find_player(&tx, player_id)?.is_none() {
                        return Err(missing_player(player_id));
                    }
                    let score = stmt.query_row(
                        params![player_id, round_id, value, Utc::now()],
                        score_from_row,
                    )?;
                    stored.push(score);
                }
            }
            tx.commit()?;
            Ok(stored)
        })
        .await
    }

    async fn scores(&self) -> Result<Vec<Score>, AppError> {
        self.with_conn(|conn| query_scores(conn, "ORDER BY recorded_at DESC, id DESC", None))
            .await
    }

    async fn score(&self, id: i64) -> Result<Option<Score>, AppError> {
        self.with_conn(move |conn| Ok(query_scores(conn, "WHERE id = ?1", Some(id))?.pop()))
            .await
    }

    async fn scores_for_player(&self, player_id: i64) -> Result<Vec<Score>, AppError> {
        self.with_conn(move |conn| {
            query_scores(
                conn,
                "WHERE player_id = ?1 ORDER BY recorded_at, id",
                Some(player_id),
            )
        })
        .await
    }

    async fn scores_for_round(&self, round_id: i64) -> Result<Vec<Score>, AppError> {
        self.with_conn(move |conn| {
            query_scores(conn, "WHERE round_id = ?1 ORDER BY player_id", Some(round_id))
        })
        .await
    }

    async fn delete_score(&self, id: i64) -> Result<bool, AppError> {
        self.with_conn(move |conn| Ok(conn.execute("DELETE FROM scores WHERE id = ?1", [id])? > 0))
            .await
    }

    async fn delete_all_scores(&self) -> Result<usize, AppError> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM scores", [])?))
            .await
    }

    async fn reset(&self) -> Result<(), AppError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute_batch(include_str!("../sql/schema/sqlite/00_table_drop.sql"))?;
            tx.execute_batch(&schema_sql())?;
            tx.commit()?;
            Ok(())
        })
        .await
    }
}
