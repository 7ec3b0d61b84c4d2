use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::web::{self, Data};
use std::collections::HashMap;
use tracing::warn;

use super::response::{html, html_with_status};
use super::score::database_reset_outcome;
use super::story::StoryClient;
use crate::view::index::render_index_template;
use crate::view::pages::{
    render_dress_code, render_flights, render_local_rules, render_not_found, render_story,
};

pub async fn home(query: web::Query<HashMap<String, String>>) -> HttpResponse {
    let (message, error) = database_reset_outcome(&query);
    html(render_index_template(message, error))
}

pub async fn flights() -> HttpResponse {
    html(render_flights())
}

pub async fn dress_code() -> HttpResponse {
    html(render_dress_code())
}

pub async fn local_rules() -> HttpResponse {
    html(render_local_rules())
}

/// Upstream failures are shown on the page rather than turned into a 5xx.
pub async fn ai_story(story: Data<dyn StoryClient>) -> HttpResponse {
    match story.golf_joke().await {
        Ok(joke) => html(render_story(Some(&joke), None)),
        Err(e) => {
            warn!(error = %e, "golf joke unavailable");
            html(render_story(
                None,
                Some(&format!("Could not fetch a golf joke: {e}")),
            ))
        }
    }
}

pub async fn not_found() -> HttpResponse {
    html_with_status(StatusCode::NOT_FOUND, render_not_found())
}
