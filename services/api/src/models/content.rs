//! Lesson and challenge content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Content difficulty tier, stored as lower-case text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse the stored text form; unknown values count as beginner
    pub fn from_db(value: &str) -> Self {
        match value {
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Beginner,
        }
    }
}

/// Lesson row as listed in the catalogue
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LessonSummary {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub difficulty: String,
    pub estimated_duration: i32,
}

/// Full lesson row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Lesson {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub difficulty: String,
    pub estimated_duration: i32,
    pub content_json: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Lesson with its interactive elements lifted out of the content body
#[derive(Debug, Clone, Serialize)]
pub struct LessonDetail {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub interactive_elements: serde_json::Value,
}

impl From<Lesson> for LessonDetail {
    fn from(lesson: Lesson) -> Self {
        let interactive_elements = lesson
            .content_json
            .get("interactive_elements")
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        Self {
            lesson,
            interactive_elements,
        }
    }
}

/// Challenge row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Challenge {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub content_json: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(content: serde_json::Value) -> Lesson {
        Lesson {
            id: Uuid::new_v4(),
            title: "Budgeting Basics".to_string(),
            topic: "budgeting".to_string(),
            difficulty: "beginner".to_string(),
            estimated_duration: 10,
            content_json: content,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_detail_lifts_interactive_elements() {
        let detail = LessonDetail::from(lesson(serde_json::json!({
            "sections": ["intro"],
            "interactive_elements": ["expense-sorter"]
        })));
        let value = serde_json::to_value(&detail).unwrap();

        assert_eq!(value["interactive_elements"], serde_json::json!(["expense-sorter"]));
        assert_eq!(value["title"], "Budgeting Basics");
    }

    #[test]
    fn test_detail_without_interactive_elements() {
        let detail = LessonDetail::from(lesson(serde_json::json!({"sections": []})));

        assert!(detail.interactive_elements.is_null());
    }

    #[test]
    fn test_difficulty_from_db() {
        assert_eq!(Difficulty::from_db("advanced"), Difficulty::Advanced);
        assert_eq!(Difficulty::from_db("intermediate"), Difficulty::Intermediate);
        assert_eq!(Difficulty::from_db("something"), Difficulty::Beginner);
    }
}
