use maud::{DOCTYPE, Markup, html};

const NAV: [(&str, &str); 8] = [
    ("/", "Home"),
    ("/players", "Players"),
    ("/register", "Register"),
    ("/rounds", "Rounds"),
    ("/scores", "Scores"),
    ("/flights", "Flights"),
    ("/dress-code", "Dress code"),
    ("/local-rules", "Local rules"),
];

#[must_use]
pub fn render_page(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="stylesheet" type="text/css" href="/static/styles.css";
                title { (title) " | Golf" }
            }
            body {
                nav {
                    @for (href, label) in NAV {
                        a href=(href) { (label) }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

#[must_use]
pub fn render_messages(message: Option<&str>, error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class="message" { (message) }
        }
        @if let Some(error) = error {
            p class="error" { (error) }
        }
    }
}

/// A one-button form, used for the delete and reset actions.
#[must_use]
pub fn render_post_button(action: &str, label: &str, confirm: &str) -> Markup {
    html! {
        form class="inline" method="post" action=(action)
            onsubmit=(format!("return confirm('{confirm}');")) {
            button type="submit" { (label) }
        }
    }
}
