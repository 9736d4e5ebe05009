use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a string is not a member of one of the closed sets below.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// MERN stack category a topic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "topic_category", rename_all = "lowercase")]
pub enum Category {
    Mongodb,
    Express,
    React,
    Nodejs,
}

impl Category {
    /// Every category, in dashboard display order
    pub const ALL: [Self; 4] = [Self::Mongodb, Self::Express, Self::React, Self::Nodejs];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mongodb => "mongodb",
            Self::Express => "express",
            Self::React => "react",
            Self::Nodejs => "nodejs",
        }
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learning status of a topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "topic_status", rename_all = "kebab-case")]
pub enum TopicStatus {
    #[default]
    NotStarted,
    Learning,
    Completed,
}

/// Priority of a goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "goal_priority", rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Topic model - one learning subject tracked by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique topic identifier
    pub id: Uuid,
    /// User who created the topic, never mutated
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,
    pub name: String,
    pub category: Category,
    pub status: TopicStatus,
    /// Self-reported progress in percent, always within 0..=100
    pub progress: i32,
    pub notes: String,
    pub code_snippet: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Goal model - a dated learning target
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique goal identifier
    pub id: Uuid,
    /// User who created the goal, never mutated
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, writable fields of a topic.
///
/// Used for both inserts and updates so a merged patch goes through the same
/// write path as a fresh record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDraft {
    pub name: String,
    pub category: Category,
    pub status: TopicStatus,
    pub progress: i32,
    pub notes: String,
    pub code_snippet: String,
}

impl From<Topic> for TopicDraft {
    fn from(topic: Topic) -> Self {
        Self {
            name: topic.name,
            category: topic.category,
            status: topic.status,
            progress: topic.progress,
            notes: topic.notes,
            code_snippet: topic.code_snippet,
        }
    }
}

/// Validated, writable fields of a goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    pub completed: bool,
    pub priority: Priority,
}

impl From<Goal> for GoalDraft {
    fn from(goal: Goal) -> Self {
        Self {
            title: goal.title,
            description: goal.description,
            target_date: goal.target_date,
            completed: goal.completed,
            priority: goal.priority,
        }
    }
}

/// Login lookup row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Public view of a user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
