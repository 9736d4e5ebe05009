use mb_db::models::{Category, TopicDraft, TopicStatus};
use serde::Deserialize;

use crate::{
    error::ApiError,
    validation::{non_blank, validate_progress},
};

/// Topic fields accepted from clients, used both for creation and for
/// partial updates. Unknown fields such as `owner` or `id` are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicPayload {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub status: Option<TopicStatus>,
    pub progress: Option<i32>,
    pub notes: Option<String>,
    pub code_snippet: Option<String>,
}

impl TopicPayload {
    /// Build a new topic, filling unspecified optional fields with their defaults.
    pub fn into_draft(self) -> Result<TopicDraft, ApiError> {
        let (Some(name), Some(category)) = (non_blank(self.name), self.category) else {
            return Err(ApiError::Validation(
                "Name and category are required".to_string(),
            ));
        };

        Ok(TopicDraft {
            name,
            category,
            status: self.status.unwrap_or_default(),
            progress: validate_progress(self.progress.unwrap_or(0))?,
            notes: self.notes.unwrap_or_default(),
            code_snippet: self.code_snippet.unwrap_or_default(),
        })
    }

    /// Merge the provided fields over `current` and validate the result.
    pub fn merge_into(self, current: TopicDraft) -> Result<TopicDraft, ApiError> {
        let name = match self.name {
            Some(name) => non_blank(Some(name))
                .ok_or_else(|| ApiError::Validation("Name cannot be empty".to_string()))?,
            None => current.name,
        };

        Ok(TopicDraft {
            name,
            category: self.category.unwrap_or(current.category),
            status: self.status.unwrap_or(current.status),
            progress: validate_progress(self.progress.unwrap_or(current.progress))?,
            notes: self.notes.unwrap_or(current.notes),
            code_snippet: self.code_snippet.unwrap_or(current.code_snippet),
        })
    }
}
