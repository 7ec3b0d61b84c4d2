use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Round {
    pub id: i64,
    pub course_name: String,
    pub play_date: NaiveDate,
    pub tee_time: NaiveTime,
    pub pick_up: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for a new round. Any of the required fields may be missing here;
/// [`NewRound::validate`] decides whether the round can be created.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewRound {
    pub course_name: String,
    pub play_date: Option<NaiveDate>,
    pub tee_time: Option<NaiveTime>,
    pub pick_up: Option<String>,
}

/// Round fields that passed validation and can be stored as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundFields {
    pub course_name: String,
    pub play_date: NaiveDate,
    pub tee_time: NaiveTime,
    pub pick_up: Option<String>,
}

impl NewRound {
    /// # Errors
    ///
    /// Will return `Err` if the course name, play date or tee time is missing
    pub fn validate(self) -> Result<RoundFields, AppError> {
        let course_name = self.course_name.trim().to_string();
        if course_name.is_empty() {
            return Err(AppError::Validation("Course name is required".to_string()));
        }
        let play_date = self
            .play_date
            .ok_or_else(|| AppError::Validation("Play date is required (YYYY-MM-DD)".to_string()))?;
        let tee_time = self
            .tee_time
            .ok_or_else(|| AppError::Validation("Tee time is required (HH:MM)".to_string()))?;
        Ok(RoundFields {
            course_name,
            play_date,
            tee_time,
            pick_up: normalize_pick_up(self.pick_up.as_deref()),
        })
    }
}

/// `None` keeps the stored value. A `pick_up` of `Some("")` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundUpdate {
    pub course_name: Option<String>,
    pub play_date: Option<NaiveDate>,
    pub tee_time: Option<NaiveTime>,
    pub pick_up: Option<String>,
}

impl RoundUpdate {
    /// # Errors
    ///
    /// Will return `Err` if a given course name is blank
    pub fn validated(self) -> Result<Self, AppError> {
        let course_name = match self.course_name {
            Some(name) if name.trim().is_empty() => {
                return Err(AppError::Validation("Course name is required".to_string()));
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };
        Ok(Self {
            course_name,
            ..self
        })
    }

    pub fn apply_to(&self, round: &mut Round) {
        if let Some(course_name) = &self.course_name {
            round.course_name.clone_from(course_name);
        }
        if let Some(play_date) = self.play_date {
            round.play_date = play_date;
        }
        if let Some(tee_time) = self.tee_time {
            round.tee_time = tee_time;
        }
        if let Some(pick_up) = &self.pick_up {
            round.pick_up = normalize_pick_up(Some(pick_up));
        }
    }
}

fn normalize_pick_up(pick_up: Option<&str>) -> Option<String> {
    pick_up
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[must_use]
pub fn parse_play_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Accepts `HH:MM`, and `HH:MM:SS` as sent by some browsers.
#[must_use]
pub fn parse_tee_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()
}
