mod common;

use common::new_round;
use rusty_golf_club::model::{NewRound, RoundUpdate, parse_play_date, parse_tee_time};

#[tokio::test]
async fn test2_round_requires_every_field() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        repo.create_round(new_round("Oslo GK", "2024-06-01", "09:30"))
            .await?;

        let missing_tee = NewRound {
            course_name: "Bogstad".to_string(),
            play_date: parse_play_date("2024-06-02"),
            tee_time: None,
            pick_up: None,
        };
        let err = repo.create_round(missing_tee).await.unwrap_err();
        assert!(err.is_validation(), "{}", backend.name);
        assert!(err.to_string().contains("Tee time"));

        let blank_course = new_round(" ", "2024-06-02", "10:00");
        assert!(repo.create_round(blank_course).await.unwrap_err().is_validation());

        assert_eq!(repo.list_rounds().await?.len(), 1, "{}", backend.name);
    }
    Ok(())
}

#[tokio::test]
async fn test2_rounds_ordered_by_date_and_tee_time() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let late = repo
            .create_round(new_round("C", "2024-06-02", "08:00"))
            .await?;
        let second = repo
            .create_round(new_round("B", "2024-06-01", "13:10"))
            .await?;
        let first = repo
            .create_round(new_round("A", "2024-06-01", "09:00"))
            .await?;

        let ids: Vec<i64> = repo.list_rounds().await?.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id, late.id], "{}", backend.name);
    }
    Ok(())
}

#[tokio::test]
async fn test2_update_round_keeps_absent_fields() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let mut input = new_round("Oslo GK", "2024-06-01", "09:30");
        input.pick_up = Some("07:45 at the hotel".to_string());
        let round = repo.create_round(input).await?;

        let updated = repo
            .update_round(
                round.id,
                RoundUpdate {
                    tee_time: parse_tee_time("10:40"),
                    ..RoundUpdate::default()
                },
            )
            .await?
            .expect("round exists");
        assert_eq!(updated.course_name, "Oslo GK");
        assert_eq!(updated.tee_time, parse_tee_time("10:40").unwrap());
        assert_eq!(updated.pick_up.as_deref(), Some("07:45 at the hotel"));

        let cleared = repo
            .update_round(
                round.id,
                RoundUpdate {
                    pick_up: Some(String::new()),
                    ..RoundUpdate::default()
                },
            )
            .await?
            .expect("round exists");
        assert_eq!(cleared.pick_up, None, "{}", backend.name);

        let err = repo
            .update_round(
                round.id,
                RoundUpdate {
                    course_name: Some("  ".to_string()),
                    ..RoundUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());

        assert!(
            repo.update_round(round.id + 50, RoundUpdate::default())
                .await?
                .is_none()
        );
    }
    Ok(())
}

#[tokio::test]
async fn test2_round_score_is_upserted() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let bo = repo.register("Bo", 10.0).await?;
        let round = repo
            .create_round(new_round("Oslo GK", "2024-06-01", "09:30"))
            .await?;

        let first = repo.record_score(bo.id, 80, Some(round.id)).await?;
        let second = repo.record_score(bo.id, 0, Some(round.id)).await?;

        assert_eq!(first.id, second.id, "{}", backend.name);
        assert_eq!(first.recorded_at, second.recorded_at);

        let scores = repo.list_scores_by_player(bo.id).await?;
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].value, 0);
        assert_eq!(repo.get_player_score(round.id, bo.id).await?, Some(0));
    }
    Ok(())
}

#[tokio::test]
async fn test2_missing_parent_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let anna = repo.register("Anna", 0.0).await?;

        let err = repo.record_score(anna.id + 9, 80, None).await.unwrap_err();
        assert!(err.is_not_found(), "{}: {err}", backend.name);

        let err = repo.record_score(anna.id, 80, Some(42)).await.unwrap_err();
        assert!(err.is_not_found(), "{}: {err}", backend.name);

        assert!(repo.list_scores().await?.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn test2_round_submission_skips_removed_players() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let anna = repo.register("Anna", 0.0).await?;
        let bo = repo.register("Bo", 0.0).await?;
        let cato = repo.register("Cato", 0.0).await?;
        let round = repo
            .create_round(new_round("Oslo GK", "2024-06-01", "09:30"))
            .await?;

        // Bo leaves after the score card was handed out
        repo.delete_player(bo.id).await?;
        let saved = repo
            .record_round_scores(round.id, &[(anna.id, 85), (bo.id, 90), (cato.id, 88)])
            .await?;
        assert_eq!(saved.len(), 2, "{}", backend.name);
        assert_eq!(repo.get_player_score(round.id, anna.id).await?, Some(85));
        assert_eq!(repo.get_player_score(round.id, cato.id).await?, Some(88));
        assert_eq!(repo.get_player_score(round.id, bo.id).await?, None);

        let (_, lines) = repo.scorecard(round.id).await?.expect("round exists");
        let card: Vec<(&str, Option<i32>)> = lines
            .iter()
            .map(|l| (l.player.name.as_str(), l.score))
            .collect();
        assert_eq!(card, vec![("Anna", Some(85)), ("Cato", Some(88))]);
        assert!(repo.scorecard(round.id + 1).await?.is_none());
    }
    Ok(())
}

#[tokio::test]
async fn test2_round_submission_for_missing_round() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let anna = repo.register("Anna", 0.0).await?;

        let err = repo
            .record_round_scores(42, &[(anna.id, 85)])
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "{}", backend.name);
        assert!(repo.list_scores().await?.is_empty(), "{}", backend.name);
    }
    Ok(())
}

#[tokio::test]
async fn test2_delete_round_cascades() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let anna = repo.register("Anna", 0.0).await?;
        let round = repo
            .create_round(new_round("Oslo GK", "2024-06-01", "09:30"))
            .await?;
        let other_round = repo
            .create_round(new_round("Bogstad", "2024-06-02", "09:30"))
            .await?;

        let gone = repo.record_score(anna.id, 85, Some(round.id)).await?;
        let kept = repo.record_score(anna.id, 90, Some(other_round.id)).await?;
        let free = repo.record_score(anna.id, 70, None).await?;

        assert!(repo.delete_round(round.id).await?);
        assert!(repo.find_round(round.id).await?.is_none());
        assert!(repo.find_score(gone.id).await?.is_none(), "{}", backend.name);
        assert!(repo.find_score(kept.id).await?.is_some());
        assert!(repo.find_score(free.id).await?.is_some());
        assert!(repo.find_player(anna.id).await?.is_some());

        assert!(!repo.delete_round(round.id).await?);
    }
    Ok(())
}

#[tokio::test]
async fn test2_score_listing_order_and_resets() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let anna = repo.register("Anna", 0.0).await?;
        let a = repo.record_score(anna.id, 90, None).await?;
        let b = repo.record_score(anna.id, 85, None).await?;
        let c = repo.record_score(anna.id, 88, None).await?;

        let newest_first: Vec<i64> = repo.list_scores().await?.iter().map(|s| s.id).collect();
        assert_eq!(newest_first, vec![c.id, b.id, a.id], "{}", backend.name);

        let oldest_first: Vec<i64> = repo
            .list_scores_by_player(anna.id)
            .await?
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(oldest_first, vec![a.id, b.id, c.id]);

        assert!(repo.delete_score(b.id).await?);
        assert!(!repo.delete_score(b.id).await?);
        assert_eq!(repo.list_scores().await?.len(), 2);

        assert_eq!(repo.reset_scores().await?, 2);
        assert!(repo.list_scores().await?.is_empty());
        assert_eq!(repo.list_players().await?.len(), 1);

        repo.create_round(new_round("Oslo GK", "2024-06-01", "09:30"))
            .await?;
        repo.reset_all().await?;
        assert!(repo.list_players().await?.is_empty(), "{}", backend.name);
        assert!(repo.list_rounds().await?.is_empty());
    }
    Ok(())
}
