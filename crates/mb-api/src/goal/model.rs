use chrono::NaiveDate;
use mb_db::models::{GoalDraft, Priority};
use serde::Deserialize;

use crate::{
    error::ApiError,
    validation::{non_blank, optional_date},
};

/// Days ahead of today that count as an upcoming deadline
pub const UPCOMING_WINDOW_DAYS: u64 = 7;

/// Last calendar date that still counts as upcoming when seen from `today`.
///
/// Overdue goals fall before the horizon as well, so they are always upcoming
/// until completed.
pub fn upcoming_horizon(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(chrono::Days::new(UPCOMING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Goal fields accepted from clients for creation and partial updates
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "optional_date")]
    pub target_date: Option<NaiveDate>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

impl GoalPayload {
    pub fn into_draft(self) -> Result<GoalDraft, ApiError> {
        let (Some(title), Some(target_date)) = (non_blank(self.title), self.target_date) else {
            return Err(ApiError::Validation(
                "Title and target date are required".to_string(),
            ));
        };

        Ok(GoalDraft {
            title,
            description: self.description.unwrap_or_default(),
            target_date,
            completed: self.completed.unwrap_or(false),
            priority: self.priority.unwrap_or_default(),
        })
    }

    /// Merge the provided fields over `current`. A blank `targetDate` leaves
    /// the stored date unchanged.
    pub fn merge_into(self, current: GoalDraft) -> Result<GoalDraft, ApiError> {
        let title = match self.title {
            Some(title) => non_blank(Some(title))
                .ok_or_else(|| ApiError::Validation("Title cannot be empty".to_string()))?,
            None => current.title,
        };

        Ok(GoalDraft {
            title,
            description: self.description.unwrap_or(current.description),
            target_date: self.target_date.unwrap_or(current.target_date),
            completed: self.completed.unwrap_or(current.completed),
            priority: self.priority.unwrap_or(current.priority),
        })
    }
}
