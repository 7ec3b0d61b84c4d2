use ahash::AHashMap;

use super::{Player, PlayerTotals, Score, round_to_one_decimal};

/// Builds the leaderboard: one entry per player with at least one played
/// (non-zero) score, highest total first.
#[must_use]
pub fn leaderboard(players: &[Player], scores: &[Score]) -> Vec<PlayerTotals> {
    let mut played_by_player: AHashMap<i64, Vec<i32>> = AHashMap::new();
    for score in scores.iter().filter(|s| s.is_played()) {
        played_by_player
            .entry(score.player_id)
            .or_default()
            .push(score.value);
    }

    let mut totals: Vec<PlayerTotals> = players
        .iter()
        .filter_map(|player| {
            let played = played_by_player.remove(&player.id)?;
            let total: i64 = played.iter().map(|&v| i64::from(v)).sum();
            #[allow(clippy::cast_precision_loss)]
            let average = round_to_one_decimal(total as f64 / played.len() as f64);
            Some(PlayerTotals {
                player_id: player.id,
                name: player.name.clone(),
                total,
                average,
                scores: played,
            })
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    totals
}
