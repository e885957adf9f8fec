//! Lesson and challenge progress records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a progress submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Completed,
    InProgress,
}

impl ProgressStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "completed" => Some(ProgressStatus::Completed),
            "in_progress" => Some(ProgressStatus::InProgress),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Completed => "completed",
            ProgressStatus::InProgress => "in_progress",
        }
    }
}

/// What a progress row refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTarget {
    Lesson(Uuid),
    Challenge(Uuid),
}

/// Progress submission body
///
/// Points are awarded server-side; a `points_earned` field sent by the
/// client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressRequest {
    #[serde(default)]
    pub status: String,
}

/// Response after recording progress
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub msg: String,
    pub status: ProgressStatus,
    pub points_earned: i32,
}

/// Points row used for leaderboard aggregation
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PointsRecord {
    pub user_id: Uuid,
    pub points_earned: i32,
}

/// Recently completed lesson shown on the dashboard
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentLesson {
    pub lesson_id: Uuid,
    pub title: String,
    pub topic: String,
    pub completed_at: DateTime<Utc>,
}

/// Per-user counts that drive badge eligibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub has_budget: bool,
    pub has_goal: bool,
    pub completed_lessons: i64,
    pub completed_challenges: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(ProgressStatus::parse("completed"), Some(ProgressStatus::Completed));
        assert_eq!(ProgressStatus::parse("in_progress"), Some(ProgressStatus::InProgress));
        assert_eq!(ProgressStatus::parse("done"), None);
        assert_eq!(ProgressStatus::InProgress.as_str(), "in_progress");
    }

    #[test]
    fn test_client_points_are_ignored() {
        let request: ProgressRequest = serde_json::from_value(serde_json::json!({
            "status": "completed",
            "points_earned": 1_000_000
        }))
        .unwrap();

        assert_eq!(request.status, "completed");
    }
}
