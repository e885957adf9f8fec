//! Badges, rewards and leaderboard entries

use serde::Serialize;
use uuid::Uuid;

/// An achievement shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Something users can redeem with points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub points_required: i64,
}

/// A ranked user
///
/// The id is only used for grouping and never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub username: String,
    pub total_points: i64,
}
