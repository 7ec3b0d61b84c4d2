use maud::{Markup, html};

use super::layout::{render_messages, render_page, render_post_button};

#[must_use]
pub fn render_index_template(message: Option<&str>, error: Option<&str>) -> Markup {
    let content = html! {
        (render_messages(message, error))
        p { "Register players, set up rounds and keep track of the scores." }
        ul class="menu" {
            li { a href="/register" { "Register a player" } }
            li { a href="/players" { "Players" } }
            li { a href="/round/new" { "New round" } }
            li { a href="/rounds" { "Rounds and score entry" } }
            li { a href="/scores" { "Leaderboard" } }
            li { a href="/ai-story" { "Golf joke of the day" } }
        }
        h3 { "Admin" }
        (render_post_button("/admin/db/reset", "Reset database", "Delete every player, round and score?"))
    };
    render_page("Golf", &content)
}
