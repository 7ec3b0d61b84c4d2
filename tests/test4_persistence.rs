use std::sync::Arc;

use rusty_golf_club::GolfRepository;
use rusty_golf_club::model::{NewRound, parse_play_date, parse_tee_time};
use rusty_golf_club::storage::json::{DOCUMENT_FILE, JsonStorage};
use rusty_golf_club::storage::sqlite::SqliteStorage;

fn oslo_round() -> NewRound {
    NewRound {
        course_name: "Oslo GK".to_string(),
        play_date: parse_play_date("2024-06-01"),
        tee_time: parse_tee_time("09:30"),
        pick_up: Some("07:45".to_string()),
    }
}

async fn fill(repo: &GolfRepository) -> Result<(i64, i64), Box<dyn std::error::Error>> {
    let anna = repo.register("Anna", 12.5).await?;
    let round = repo.create_round(oslo_round()).await?;
    repo.record_score(anna.id, 85, Some(round.id)).await?;
    repo.record_score(anna.id, 90, None).await?;
    Ok((anna.id, round.id))
}

async fn check(
    repo: &GolfRepository,
    anna_id: i64,
    round_id: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let anna = repo.find_player(anna_id).await?.expect("player survives");
    assert_eq!(anna.name, "Anna");
    assert!((anna.handicap - 12.5).abs() < f64::EPSILON);

    let round = repo.find_round(round_id).await?.expect("round survives");
    assert_eq!(round.pick_up.as_deref(), Some("07:45"));

    assert_eq!(repo.get_player_score(round_id, anna_id).await?, Some(85));
    assert_eq!(repo.list_scores_by_player(anna_id).await?.len(), 2);

    let next = repo.register("Bo", 0.0).await?;
    assert!(next.id > anna_id);
    Ok(())
}

#[tokio::test]
async fn test4_sqlite_survives_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("golf.db");
    let path = path.to_str().expect("utf-8 temp path");

    let (anna_id, round_id) = {
        let repo = GolfRepository::new(Arc::new(SqliteStorage::open(path)?));
        fill(&repo).await?
    };

    let repo = GolfRepository::new(Arc::new(SqliteStorage::open(path)?));
    check(&repo, anna_id, round_id).await
}

#[tokio::test]
async fn test4_json_survives_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    let (anna_id, round_id) = {
        let repo = GolfRepository::new(Arc::new(JsonStorage::open(dir.path()).await?));
        fill(&repo).await?
    };
    assert!(dir.path().join(DOCUMENT_FILE).exists());

    let repo = GolfRepository::new(Arc::new(JsonStorage::open(dir.path()).await?));
    check(&repo, anna_id, round_id).await
}
