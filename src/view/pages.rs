use actix_web::http::StatusCode;
use maud::{Markup, html};

use super::layout::{render_messages, render_page};

#[must_use]
pub fn render_flights() -> Markup {
    let content = html! {
        p { "Flights are set the evening before each round. Tee times are on the " a href="/rounds" { "rounds page" } "." }
        table class="styled-table" {
            thead {
                tr {
                    th { "Day" }
                    th { "Format" }
                    th { "Flights" }
                }
            }
            tbody {
                tr { td { "Day 1" } td { "Stroke play" } td { "By handicap, lowest first" } }
                tr { td { "Day 2" } td { "Best ball" } td { "Pairs drawn at dinner" } }
                tr { td { "Day 3" } td { "Stroke play" } td { "By total score, leaders last" } }
            }
        }
    };
    render_page("Flights", &content)
}

#[must_use]
pub fn render_dress_code() -> Markup {
    let content = html! {
        ul {
            li { "Collared shirts on the course." }
            li { "No denim." }
            li { "Soft spikes only." }
            li { "Team polo at the final dinner." }
        }
    };
    render_page("Dress code", &content)
}

#[must_use]
pub fn render_local_rules() -> Markup {
    let content = html! {
        ol {
            li { "Winter rules: lift, clean and place within one club length in your own fairway." }
            li { "Maximum score per hole is double par." }
            li { "Ready golf. Keep up with the group in front." }
            li { "A score of 0 on the score sheet means the round was not played." }
        }
    };
    render_page("Local rules", &content)
}

#[must_use]
pub fn render_story(story: Option<&str>, error: Option<&str>) -> Markup {
    let content = html! {
        (render_messages(None, error))
        @if let Some(story) = story {
            blockquote class="story" { (story) }
        }
        p { a href="/ai-story" { "Another one" } }
    };
    render_page("Golf joke", &content)
}

#[must_use]
pub fn render_not_found() -> Markup {
    let content = html! {
        p { "Sorry, we can't find that page." }
        p { a href="/" { "Back to the start" } }
    };
    render_page("404 Not Found", &content)
}

#[must_use]
pub fn render_error_page(status: StatusCode, message: &str) -> Markup {
    let content = html! {
        @if status.is_server_error() {
            p { "Something went wrong on our side. Please try again." }
        } @else {
            p class="error" { (message) }
        }
        p { a href="/" { "Back to the start" } }
    };
    render_page(&status.to_string(), &content)
}
