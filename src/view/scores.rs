use maud::{Markup, html};

use super::layout::{render_messages, render_page, render_post_button};
use crate::model::PlayerTotals;

#[must_use]
pub fn render_leaderboard(
    totals: &[PlayerTotals],
    message: Option<&str>,
    error: Option<&str>,
) -> Markup {
    let content = html! {
        (render_messages(message, error))
        @if totals.is_empty() {
            p { "No scores registered yet." }
        } @else {
            table class="styled-table" id="leaderboard" {
                thead {
                    tr {
                        th { "PLACE" }
                        th { "PLAYER" }
                        th { "ROUNDS" }
                        th { "TOTAL" }
                        th { "AVERAGE" }
                    }
                }
                tbody {
                    @for (idx, entry) in totals.iter().enumerate() {
                        tr {
                            td { (idx + 1) }
                            td class="player-name" { (entry.name) }
                            td {
                                (entry.scores.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))
                            }
                            td class="total" { (entry.total) }
                            td class="average" { (format!("{:.1}", entry.average)) }
                        }
                    }
                }
            }
        }
        (render_post_button("/scores/reset", "Delete all scores", "Delete every registered score?"))
    };
    render_page("Scores", &content)
}
