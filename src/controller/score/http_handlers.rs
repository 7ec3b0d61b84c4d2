use actix_web::HttpResponse;
use actix_web::web::{self, Data};
use std::collections::HashMap;
use tracing::error;

use crate::controller::response::{html, redirect};
use crate::error::AppError;
use crate::repository::GolfRepository;
use crate::view::scores::render_leaderboard;

/// Outcome of a reset, carried through the redirect as `?reset=1` or
/// `?reset=failed`.
fn reset_outcome(
    query: &HashMap<String, String>,
    done: &'static str,
    failed: &'static str,
) -> (Option<&'static str>, Option<&'static str>) {
    match query.get("reset").map(String::as_str) {
        Some("1") => (Some(done), None),
        Some("failed") => (None, Some(failed)),
        _ => (None, None),
    }
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn list_scores(
    repo: Data<GolfRepository>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let (message, failure) = reset_outcome(
        &query,
        "All scores have been deleted",
        "Could not delete scores",
    );
    let totals = repo.leaderboard().await?;
    Ok(html(render_leaderboard(&totals, message, failure)))
}

pub async fn reset_scores(repo: Data<GolfRepository>) -> HttpResponse {
    match repo.reset_scores().await {
        Ok(_) => redirect("/scores?reset=1"),
        Err(e) => {
            error!(error = %e, "score reset failed");
            redirect("/scores?reset=failed")
        }
    }
}

pub async fn reset_database(repo: Data<GolfRepository>) -> HttpResponse {
    match repo.reset_all().await {
        Ok(()) => redirect("/?reset=1"),
        Err(e) => {
            error!(error = %e, "database reset failed");
            redirect("/?reset=failed")
        }
    }
}

/// Flash text for the start page after a database reset.
#[must_use]
pub fn database_reset_outcome(
    query: &HashMap<String, String>,
) -> (Option<&'static str>, Option<&'static str>) {
    reset_outcome(
        query,
        "The database has been reset",
        "Could not reset the database",
    )
}
