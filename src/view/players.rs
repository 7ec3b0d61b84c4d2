use maud::{Markup, html};

use super::layout::{render_messages, render_page, render_post_button};
use crate::model::{MAX_HANDICAP, Player, Score, format_play_date, format_timestamp};

/// What the user typed, kept so a rejected form can be shown again.
#[derive(Debug, Clone, Default)]
pub struct PlayerFormValues {
    pub name: String,
    pub handicap: String,
}

impl From<&Player> for PlayerFormValues {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            handicap: format!("{:.1}", player.handicap),
        }
    }
}

fn render_player_fields(values: &PlayerFormValues) -> Markup {
    html! {
        label for="player_name" { "Name" }
        input type="text" id="player_name" name="player_name" required value=(values.name);
        label for="handicap" { "Handicap (max " (MAX_HANDICAP) ")" }
        input type="number" id="handicap" name="handicap" step="0.1" value=(values.handicap);
    }
}

#[must_use]
pub fn render_register_player(values: &PlayerFormValues, error: Option<&str>) -> Markup {
    let content = html! {
        (render_messages(None, error))
        form method="post" action="/add_player" {
            (render_player_fields(values))
            button type="submit" { "Register" }
        }
    };
    render_page("Register player", &content)
}

#[must_use]
pub fn render_update_player(
    player: &Player,
    values: &PlayerFormValues,
    error: Option<&str>,
) -> Markup {
    let content = html! {
        (render_messages(None, error))
        form method="post" action=(format!("/player/{}/update", player.id)) {
            (render_player_fields(values))
            button type="submit" { "Save" }
        }
        p { a href="/players" { "Back to players" } }
    };
    render_page(&format!("Update {}", player.name), &content)
}

#[must_use]
pub fn render_player_list(players: &[Player]) -> Markup {
    let content = html! {
        @if players.is_empty() {
            p { "No players yet. " a href="/register" { "Register the first one." } }
        } @else {
            table class="styled-table" {
                thead {
                    tr {
                        th { "Name" }
                        th { "Handicap" }
                        th { "Registered" }
                        th { "" }
                    }
                }
                tbody {
                    @for player in players {
                        tr {
                            td class="player-name" { (player.name) }
                            td { (format!("{:.1}", player.handicap)) }
                            td { (format_timestamp(player.created_at)) }
                            td class="actions" {
                                a href=(format!("/player/{}/update", player.id)) { "Edit" }
                                " "
                                a href=(format!("/player/{}/scores", player.id)) { "Scores" }
                                " "
                                (render_post_button(
                                    &format!("/player/{}/delete", player.id),
                                    "Delete",
                                    "Delete this player and all of their scores?",
                                ))
                            }
                        }
                    }
                }
            }
        }
    };
    render_page("Players", &content)
}

/// Scores are expected oldest first; `round_labels` maps a round id to the
/// text shown for it.
#[must_use]
pub fn render_player_scores(
    player: &Player,
    scores: &[Score],
    round_labels: &[(i64, String)],
    error: Option<&str>,
) -> Markup {
    let label_for = |round_id: Option<i64>| -> String {
        round_id
            .and_then(|id| round_labels.iter().find(|(rid, _)| *rid == id))
            .map_or_else(|| "-".to_string(), |(_, label)| label.clone())
    };
    let content = html! {
        (render_messages(None, error))
        @if scores.is_empty() {
            p { "No scores recorded." }
        } @else {
            table class="styled-table" {
                thead {
                    tr {
                        th { "Recorded" }
                        th { "Round" }
                        th { "Score" }
                        th { "" }
                    }
                }
                tbody {
                    @for score in scores {
                        tr {
                            td { (format_timestamp(score.recorded_at)) }
                            td { (label_for(score.round_id)) }
                            td class="score" { (score.value) }
                            td {
                                (render_post_button(
                                    &format!("/score/{}/delete", score.id),
                                    "Delete",
                                    "Delete this score?",
                                ))
                            }
                        }
                    }
                }
            }
        }
        h3 { "Record a score" }
        form method="post" action=(format!("/player/{}/scores", player.id)) {
            label for="score" { "Score" }
            input type="number" id="score" name="score" required;
            button type="submit" { "Save" }
        }
        p { a href="/players" { "Back to players" } }
    };
    render_page(&format!("Scores for {}", player.name), &content)
}

#[must_use]
pub fn round_label(course_name: &str, play_date: chrono::NaiveDate) -> String {
    format!("{course_name} ({})", format_play_date(play_date))
}
