use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

pub const MAX_HANDICAP: f64 = 36.0;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub handicap: f64,
    pub created_at: DateTime<Utc>,
}

/// Raised when a handicap is above [`MAX_HANDICAP`] or is not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct HandicapError {
    pub handicap: f64,
}

impl fmt::Display for HandicapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.handicap.is_finite() {
            write!(f, "Handicap cannot be greater than {MAX_HANDICAP}")
        } else {
            write!(f, "Handicap must be a number")
        }
    }
}

impl std::error::Error for HandicapError {}

/// # Errors
///
/// Will return `Err` if the handicap is above the ceiling or not finite
pub fn check_handicap(handicap: f64) -> Result<f64, HandicapError> {
    if !handicap.is_finite() || handicap > MAX_HANDICAP {
        return Err(HandicapError { handicap });
    }
    Ok(handicap)
}

/// # Errors
///
/// Will return `Err` if the name is blank
pub fn check_player_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Player name is required".to_string()));
    }
    Ok(trimmed.to_string())
}

/// A validated registration, ready to be stored.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub handicap: f64,
}

impl NewPlayer {
    /// # Errors
    ///
    /// Will return `Err` if the name is blank or the handicap is out of range
    pub fn new(name: &str, handicap: f64) -> Result<Self, AppError> {
        let name = check_player_name(name)?;
        let handicap = check_handicap(handicap)?;
        Ok(Self { name, handicap })
    }
}

/// Fields left as `None` keep their stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub handicap: Option<f64>,
}

impl PlayerUpdate {
    /// # Errors
    ///
    /// Will return `Err` if a given name is blank or a given handicap is out of range
    pub fn validated(self) -> Result<Self, AppError> {
        let name = self.name.as_deref().map(check_player_name).transpose()?;
        let handicap = self.handicap.map(check_handicap).transpose()?;
        Ok(Self { name, handicap })
    }

    pub fn apply_to(&self, player: &mut Player) {
        if let Some(name) = &self.name {
            player.name.clone_from(name);
        }
        if let Some(handicap) = self.handicap {
            player.handicap = handicap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handicap_ceiling_is_inclusive() {
        assert_eq!(check_handicap(36.0), Ok(36.0));
        assert!(check_handicap(36.1).is_err());
        assert_eq!(check_handicap(-2.5), Ok(-2.5));
    }

    #[test]
    fn handicap_must_be_finite() {
        let err = check_handicap(f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "Handicap must be a number");
        assert!(check_handicap(f64::INFINITY).is_err());
    }

    #[test]
    fn handicap_error_message_names_the_ceiling() {
        let err = check_handicap(40.0).unwrap_err();
        assert_eq!(err.to_string(), "Handicap cannot be greater than 36");
        let app_err: AppError = err.into();
        assert!(app_err.is_validation());
    }

    #[test]
    fn new_player_trims_and_rejects_blank_names() {
        let player = NewPlayer::new("  Anna ", 12.0).unwrap();
        assert_eq!(player.name, "Anna");
        assert!(NewPlayer::new("   ", 12.0).unwrap_err().is_validation());
    }

    #[test]
    fn update_keeps_missing_fields() {
        let mut player = Player {
            id: 1,
            name: "Bo".to_string(),
            handicap: 10.0,
            created_at: Utc::now(),
        };
        let update = PlayerUpdate {
            name: None,
            handicap: Some(8.4),
        }
        .validated()
        .unwrap();
        update.apply_to(&mut player);
        assert_eq!(player.name, "Bo");
        assert!((player.handicap - 8.4).abs() < f64::EPSILON);
    }

    #[test]
    fn update_rejects_out_of_range_handicap() {
        let update = PlayerUpdate {
            name: Some("Bo".to_string()),
            handicap: Some(36.5),
        };
        assert!(update.validated().unwrap_err().is_validation());
    }
}
