use chrono::NaiveDate;
use mb_db::models::{Category, Goal, Topic, TopicStatus};
use serde::Serialize;

use crate::goal::model::upcoming_horizon;

/// Average progress per category, rounded to the nearest percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub mongodb: u32,
    pub express: u32,
    pub react: u32,
    pub nodejs: u32,
}

impl CategoryProgress {
    fn slot(&mut self, category: Category) -> &mut u32 {
        match category {
            Category::Mongodb => &mut self.mongodb,
            Category::Express => &mut self.express,
            Category::React => &mut self.react,
            Category::Nodejs => &mut self.nodejs,
        }
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Mongodb => self.mongodb,
            Category::Express => self.express,
            Category::React => self.react,
            Category::Nodejs => self.nodejs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_topics: usize,
    pub completed_topics: usize,
    pub in_progress_topics: usize,
    /// Share of topics marked completed, in percent
    pub overall_progress: u32,
    pub category_progress: CategoryProgress,
    pub active_goals: usize,
    pub upcoming_deadlines: usize,
}

/// Percentage rounded half up, 0 when the denominator is 0.
fn rounded_ratio(numerator: i64, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 / denominator as f64).round() as u32
}

impl DashboardStats {
    /// Aggregate the caller's collections as seen on `today`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use mb_api::stats::DashboardStats;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let stats = DashboardStats::compute(&[], &[], today);
    /// assert_eq!(stats.total_topics, 0);
    /// assert_eq!(stats.overall_progress, 0);
    /// ```
    pub fn compute(topics: &[Topic], goals: &[Goal], today: NaiveDate) -> Self {
        let completed_topics = topics
            .iter()
            .filter(|t| t.status == TopicStatus::Completed)
            .count();
        let in_progress_topics = topics
            .iter()
            .filter(|t| t.status == TopicStatus::Learning)
            .count();

        let mut category_progress = CategoryProgress::default();
        for category in Category::ALL {
            let (sum, count) = topics
                .iter()
                .filter(|t| t.category == category)
                .fold((0i64, 0usize), |(sum, count), t| {
                    (sum + i64::from(t.progress), count + 1)
                });
            *category_progress.slot(category) = rounded_ratio(sum, count);
        }

        let horizon = upcoming_horizon(today);
        let open_goals = goals.iter().filter(|g| !g.completed);

        Self {
            total_topics: topics.len(),
            completed_topics,
            in_progress_topics,
            overall_progress: rounded_ratio(100 * completed_topics as i64, topics.len()),
            category_progress,
            active_goals: open_goals.clone().count(),
            upcoming_deadlines: open_goals.filter(|g| g.target_date <= horizon).count(),
        }
    }
}
