mod common;

use common::new_round;

#[tokio::test]
async fn test3_zero_scores_are_not_played() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let anna = repo.register("Anna", 12.0).await?;
        let bo = repo.register("Bo", 10.0).await?;
        repo.register("Cato", 3.0).await?;

        for value in [0, 85, 90] {
            repo.record_score(anna.id, value, None).await?;
        }
        let round = repo
            .create_round(new_round("Oslo GK", "2024-06-01", "09:30"))
            .await?;
        repo.record_score(bo.id, 80, Some(round.id)).await?;
        repo.record_score(bo.id, 0, Some(round.id)).await?;

        let board = repo.leaderboard().await?;
        assert_eq!(board.len(), 1, "{}", backend.name);
        assert_eq!(board[0].name, "Anna");
        assert_eq!(board[0].total, 175);
        assert!((board[0].average - 87.5).abs() < f64::EPSILON);
        assert_eq!(board[0].scores, vec![85, 90]);
    }
    Ok(())
}

#[tokio::test]
async fn test3_sorted_by_total_then_name() -> Result<(), Box<dyn std::error::Error>> {
    for backend in common::all_backends().await? {
        let repo = &backend.repo;
        let cato = repo.register("Cato", 0.0).await?;
        let bo = repo.register("Bo", 0.0).await?;
        let anna = repo.register("Anna", 0.0).await?;

        repo.record_score(cato.id, 170, None).await?;
        repo.record_score(bo.id, 80, None).await?;
        repo.record_score(bo.id, 81, None).await?;
        repo.record_score(anna.id, 161, None).await?;

        let names: Vec<String> = repo
            .leaderboard()
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Cato", "Anna", "Bo"], "{}", backend.name);
    }
    Ok(())
}
