#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;

use rusty_golf_club::GolfRepository;
use rusty_golf_club::error::AppError;
use rusty_golf_club::model::{NewRound, parse_play_date, parse_tee_time};
use rusty_golf_club::storage::json::JsonStorage;
use rusty_golf_club::storage::sqlite::SqliteStorage;

/// A repository over one backend. The temp dir, if any, lives as long as
/// the repository.
pub struct TestBackend {
    pub name: &'static str,
    pub repo: GolfRepository,
    _dir: Option<TempDir>,
}

pub async fn sqlite_backend() -> Result<TestBackend, AppError> {
    Ok(TestBackend {
        name: "sqlite",
        repo: GolfRepository::new(Arc::new(SqliteStorage::in_memory()?)),
        _dir: None,
    })
}

pub async fn json_backend() -> Result<TestBackend, AppError> {
    let dir = tempfile::tempdir()?;
    let storage = JsonStorage::open(dir.path()).await?;
    Ok(TestBackend {
        name: "json",
        repo: GolfRepository::new(Arc::new(storage)),
        _dir: Some(dir),
    })
}

pub fn memory_backend() -> TestBackend {
    TestBackend {
        name: "memory",
        repo: GolfRepository::new(Arc::new(JsonStorage::in_memory())),
        _dir: None,
    }
}

pub async fn all_backends() -> Result<Vec<TestBackend>, AppError> {
    Ok(vec![
        sqlite_backend().await?,
        json_backend().await?,
        memory_backend(),
    ])
}

pub fn new_round(course: &str, date: &str, tee: &str) -> NewRound {
    NewRound {
        course_name: course.to_string(),
        play_date: parse_play_date(date),
        tee_time: parse_tee_time(tee),
        pick_up: None,
    }
}
