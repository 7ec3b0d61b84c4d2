use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::web::{self, Data};
use serde::Deserialize;

use super::response::{html, html_with_status, non_blank, redirect};
use crate::error::AppError;
use crate::model::{Player, PlayerUpdate};
use crate::repository::GolfRepository;
use crate::view::players::{
    PlayerFormValues, render_player_list, render_player_scores, render_register_player,
    render_update_player, round_label,
};

#[derive(Deserialize, Debug, Default)]
pub struct PlayerForm {
    pub player_name: Option<String>,
    pub handicap: Option<String>,
}

impl PlayerForm {
    fn values(&self, fallback: Option<&Player>) -> PlayerFormValues {
        let stored = fallback.map(PlayerFormValues::from).unwrap_or_default();
        PlayerFormValues {
            name: self.player_name.clone().unwrap_or(stored.name),
            handicap: self.handicap.clone().unwrap_or(stored.handicap),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ScoreForm {
    pub score: String,
}

/// Blank means "not given". Commas are accepted as decimal separators.
///
/// # Errors
///
/// Will return `Err` if a value is given but is not a number
pub fn parse_handicap(raw: Option<&String>) -> Result<Option<f64>, AppError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    raw.replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("Handicap must be a number, got '{raw}'")))
}

/// # Errors
///
/// Will return `Err` if the value is not a whole number
pub fn parse_score(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation(format!("Score must be a whole number, got '{raw}'")))
}

pub async fn register_form() -> HttpResponse {
    html(render_register_player(&PlayerFormValues::default(), None))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn add_player(
    repo: Data<GolfRepository>,
    form: web::Form<PlayerForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let values = form.values(None);
    let Some(name) = non_blank(form.player_name.as_ref()) else {
        return Ok(redirect("/"));
    };

    let result = match parse_handicap(form.handicap.as_ref()) {
        Ok(handicap) => repo.register(name, handicap.unwrap_or(0.0)).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => Ok(redirect("/")),
        Err(e) if e.is_validation() => Ok(html_with_status(
            StatusCode::BAD_REQUEST,
            render_register_player(&values, Some(&e.to_string())),
        )),
        Err(e) => Err(e),
    }
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn list_players(repo: Data<GolfRepository>) -> Result<HttpResponse, AppError> {
    let players = repo.list_players().await?;
    Ok(html(render_player_list(&players)))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn delete_player(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    repo.delete_player(path.into_inner()).await?;
    Ok(redirect("/players"))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn update_player_form(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let Some(player) = repo.find_player(path.into_inner()).await? else {
        return Ok(redirect("/players"));
    };
    Ok(html(render_update_player(
        &player,
        &PlayerFormValues::from(&player),
        None,
    )))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn update_player(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
    form: web::Form<PlayerForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let Some(player) = repo.find_player(id).await? else {
        return Ok(redirect("/players"));
    };
    let form = form.into_inner();

    let result = match parse_handicap(form.handicap.as_ref()) {
        Ok(handicap) => {
            let update = PlayerUpdate {
                name: form.player_name.clone(),
                handicap,
            };
            repo.update_player(id, update).await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => Ok(redirect("/players")),
        Err(e) if e.is_validation() => Ok(html_with_status(
            StatusCode::BAD_REQUEST,
            render_update_player(&player, &form.values(Some(&player)), Some(&e.to_string())),
        )),
        Err(e) => Err(e),
    }
}

async fn render_scores_page(
    repo: &GolfRepository,
    player: &Player,
    error: Option<&str>,
) -> Result<maud::Markup, AppError> {
    let scores = repo.list_scores_by_player(player.id).await?;
    let round_labels: Vec<(i64, String)> = repo
        .list_rounds()
        .await?
        .iter()
        .map(|r| (r.id, round_label(&r.course_name, r.play_date)))
        .collect();
    Ok(render_player_scores(player, &scores, &round_labels, error))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn player_scores(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let Some(player) = repo.find_player(path.into_inner()).await? else {
        return Ok(redirect("/players"));
    };
    Ok(html(render_scores_page(&repo, &player, None).await?))
}

/// Records a score that is not tied to a round.
///
/// # Errors
///
/// Will return `Err` if the store fails
pub async fn record_player_score(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
    form: web::Form<ScoreForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let Some(player) = repo.find_player(id).await? else {
        return Ok(redirect("/players"));
    };

    let result = match parse_score(&form.score) {
        Ok(value) => repo.record_score(id, value, None).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => Ok(redirect(&format!("/player/{id}/scores"))),
        Err(e) if e.is_validation() => Ok(html_with_status(
            StatusCode::BAD_REQUEST,
            render_scores_page(&repo, &player, Some(&e.to_string())).await?,
        )),
        Err(e) if e.is_not_found() => Ok(redirect("/players")),
        Err(e) => Err(e),
    }
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn delete_score(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let back = match repo.find_score(id).await? {
        Some(score) => format!("/player/{}/scores", score.player_id),
        None => "/scores".to_string(),
    };
    repo.delete_score(id).await?;
    Ok(redirect(&back))
}
