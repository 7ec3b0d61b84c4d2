use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::web::{self, Data};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::response::{html, html_with_status, non_blank, redirect};
use crate::error::AppError;
use crate::model::{NewRound, Round, RoundUpdate, parse_play_date, parse_tee_time};
use crate::repository::GolfRepository;
use crate::view::rounds::{
    RoundFormValues, render_add_round, render_round_list, render_scorecard, render_update_round,
};

#[derive(Deserialize, Debug, Default)]
pub struct RoundForm {
    pub course_name: Option<String>,
    pub play_date: Option<String>,
    pub tee_time: Option<String>,
    pub pick_up: Option<String>,
}

impl RoundForm {
    fn values(&self, fallback: Option<&Round>) -> RoundFormValues {
        let stored = fallback.map(RoundFormValues::from).unwrap_or_default();
        RoundFormValues {
            course_name: self.course_name.clone().unwrap_or(stored.course_name),
            play_date: self.play_date.clone().unwrap_or(stored.play_date),
            tee_time: self.tee_time.clone().unwrap_or(stored.tee_time),
            pick_up: self.pick_up.clone().unwrap_or(stored.pick_up),
        }
    }

    fn to_new_round(&self) -> NewRound {
        NewRound {
            course_name: self.course_name.clone().unwrap_or_default(),
            play_date: non_blank(self.play_date.as_ref()).and_then(parse_play_date),
            tee_time: non_blank(self.tee_time.as_ref()).and_then(parse_tee_time),
            pick_up: self.pick_up.clone(),
        }
    }

    /// Blank date and time fields keep the stored values.
    fn to_update(&self) -> Result<RoundUpdate, AppError> {
        let play_date = non_blank(self.play_date.as_ref())
            .map(|raw| {
                parse_play_date(raw).ok_or_else(|| {
                    AppError::Validation(format!("Play date must be YYYY-MM-DD, got '{raw}'"))
                })
            })
            .transpose()?;
        let tee_time = non_blank(self.tee_time.as_ref())
            .map(|raw| {
                parse_tee_time(raw).ok_or_else(|| {
                    AppError::Validation(format!("Tee time must be HH:MM, got '{raw}'"))
                })
            })
            .transpose()?;
        Ok(RoundUpdate {
            course_name: self.course_name.clone(),
            play_date,
            tee_time,
            pick_up: self.pick_up.clone(),
        })
    }
}

/// Pulls `(player id, score)` pairs out of a score entry form. Fields other
/// than `score_<id>` are ignored, as are blank scores.
///
/// # Errors
///
/// Will return `Err` if a non-blank score is not a whole number
///
/// # Panics
///
/// Will panic if the regex is invalid
pub fn parse_score_fields(form: &HashMap<String, String>) -> Result<Vec<(i64, i32)>, AppError> {
    static FIELD: OnceLock<Regex> = OnceLock::new();
    let re = FIELD.get_or_init(|| {
        Regex::new(r"^score_(\d+)$").expect("Invalid regex pattern - this is a programming error")
    });

    let mut entries = Vec::new();
    for (key, value) in form {
        let Some(player_id) = re
            .captures(key)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i64>().ok())
        else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let score = value.parse::<i32>().map_err(|_| {
            AppError::Validation(format!("Score must be a whole number, got '{value}'"))
        })?;
        entries.push((player_id, score));
    }
    entries.sort_unstable();
    Ok(entries)
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn list_rounds(repo: Data<GolfRepository>) -> Result<HttpResponse, AppError> {
    let rounds = repo.list_rounds().await?;
    Ok(html(render_round_list(&rounds)))
}

pub async fn new_round_form() -> HttpResponse {
    html(render_add_round(&RoundFormValues::default(), None))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn add_round(
    repo: Data<GolfRepository>,
    form: web::Form<RoundForm>,
) -> Result<HttpResponse, AppError> {
    match repo.create_round(form.to_new_round()).await {
        Ok(_) => Ok(redirect("/rounds")),
        Err(e) if e.is_validation() => Ok(html_with_status(
            StatusCode::BAD_REQUEST,
            render_add_round(&form.values(None), Some(&e.to_string())),
        )),
        Err(e) => Err(e),
    }
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn delete_round(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    repo.delete_round(path.into_inner()).await?;
    Ok(redirect("/rounds"))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn update_round_form(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let Some(round) = repo.find_round(path.into_inner()).await? else {
        return Ok(redirect("/rounds"));
    };
    Ok(html(render_update_round(
        &round,
        &RoundFormValues::from(&round),
        None,
    )))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn update_round(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
    form: web::Form<RoundForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let Some(round) = repo.find_round(id).await? else {
        return Ok(redirect("/rounds"));
    };

    let result = match form.to_update() {
        Ok(update) => repo.update_round(id, update).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => Ok(redirect("/rounds")),
        Err(e) if e.is_validation() => Ok(html_with_status(
            StatusCode::BAD_REQUEST,
            render_update_round(&round, &form.values(Some(&round)), Some(&e.to_string())),
        )),
        Err(e) => Err(e),
    }
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn scorecard_form(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let Some((round, lines)) = repo.scorecard(path.into_inner()).await? else {
        return Ok(redirect("/rounds"));
    };
    Ok(html(render_scorecard(&round, &lines, None)))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn save_scorecard(
    repo: Data<GolfRepository>,
    path: web::Path<i64>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let round_id = path.into_inner();
    let result = match parse_score_fields(&form) {
        Ok(entries) => repo.record_round_scores(round_id, &entries).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => Ok(redirect("/rounds")),
        Err(e) if e.is_validation() => {
            let Some((round, lines)) = repo.scorecard(round_id).await? else {
                return Ok(redirect("/rounds"));
            };
            Ok(html_with_status(
                StatusCode::BAD_REQUEST,
                render_scorecard(&round, &lines, Some(&e.to_string())),
            ))
        }
        Err(e) if e.is_not_found() => Ok(redirect("/rounds")),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_fields_skip_blanks_and_other_keys() {
        let form: HashMap<String, String> = [
            ("score_2", "90"),
            ("score_1", " 85 "),
            ("score_3", ""),
            ("csrf", "x"),
            ("score_x", "70"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(parse_score_fields(&form).unwrap(), vec![(1, 85), (2, 90)]);
    }

    #[test]
    fn score_fields_reject_non_numbers() {
        let form: HashMap<String, String> =
            [("score_1".to_string(), "eighty".to_string())].into_iter().collect();
        assert!(parse_score_fields(&form).unwrap_err().is_validation());
    }

    #[test]
    fn update_keeps_blank_date_and_time() {
        let form = RoundForm {
            course_name: Some("Oslo GK".to_string()),
            play_date: Some(String::new()),
            tee_time: Some("  ".to_string()),
            pick_up: None,
        };
        let update = form.to_update().unwrap();
        assert_eq!(update.play_date, None);
        assert_eq!(update.tee_time, None);
    }

    #[test]
    fn update_rejects_bad_date() {
        let form = RoundForm {
            play_date: Some("June 1st".to_string()),
            ..RoundForm::default()
        };
        assert!(form.to_update().unwrap_err().is_validation());
    }
}
