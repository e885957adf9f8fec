//! Gamification catalog: badge rules, rewards and point awards
//!
//! Built once at startup and shared read-only through the application state.

use crate::models::{
    content::Difficulty,
    gamification::{Badge, Reward},
    progress::{ActivityCounts, ProgressStatus, ProgressTarget},
};

/// Condition that unlocks a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    HasBudget,
    HasGoal,
    CompletedLessons(i64),
    CompletedChallenges(i64),
}

impl BadgeRule {
    pub fn is_met(&self, counts: &ActivityCounts) -> bool {
        match *self {
            BadgeRule::HasBudget => counts.has_budget,
            BadgeRule::HasGoal => counts.has_goal,
            BadgeRule::CompletedLessons(min) => counts.completed_lessons >= min,
            BadgeRule::CompletedChallenges(min) => counts.completed_challenges >= min,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BadgeDefinition {
    pub badge: Badge,
    pub rule: BadgeRule,
}

/// Points per difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyPoints {
    pub beginner: i32,
    pub intermediate: i32,
    pub advanced: i32,
}

impl DifficultyPoints {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> i32 {
        match difficulty {
            Difficulty::Beginner => self.beginner,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }
}

/// Server-side point awards for completed content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRules {
    pub lesson: DifficultyPoints,
    pub challenge: DifficultyPoints,
}

impl PointRules {
    /// Points for a progress submission; only completions earn anything
    pub fn points_for(
        &self,
        target: ProgressTarget,
        difficulty: Difficulty,
        status: ProgressStatus,
    ) -> i32 {
        if status != ProgressStatus::Completed {
            return 0;
        }

        match target {
            ProgressTarget::Lesson(_) => self.lesson.for_difficulty(difficulty),
            ProgressTarget::Challenge(_) => self.challenge.for_difficulty(difficulty),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GamificationCatalog {
    pub badges: Vec<BadgeDefinition>,
    pub rewards: Vec<Reward>,
    pub points: PointRules,
}

impl GamificationCatalog {
    /// Badges whose rule `counts` satisfies, in catalog order
    pub fn earned_badges(&self, counts: &ActivityCounts) -> Vec<Badge> {
        self.badges
            .iter()
            .filter(|definition| definition.rule.is_met(counts))
            .map(|definition| definition.badge.clone())
            .collect()
    }
}

fn badge(id: &str, name: &str, description: &str, rule: BadgeRule) -> BadgeDefinition {
    BadgeDefinition {
        badge: Badge {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        },
        rule,
    }
}

impl Default for GamificationCatalog {
    fn default() -> Self {
        Self {
            badges: vec![
                badge(
                    "budget_beginner",
                    "Budget Beginner",
                    "Create your first budget.",
                    BadgeRule::HasBudget,
                ),
                badge(
                    "lesson_learner",
                    "Lesson Learner",
                    "Complete 5 lessons.",
                    BadgeRule::CompletedLessons(5),
                ),
                badge(
                    "challenge_champion",
                    "Challenge Champion",
                    "Complete 3 challenges.",
                    BadgeRule::CompletedChallenges(3),
                ),
                badge(
                    "goal_setter",
                    "Goal Setter",
                    "Set up your first financial goal.",
                    BadgeRule::HasGoal,
                ),
            ],
            rewards: vec![
                Reward {
                    id: "discount_1".to_string(),
                    name: "10% off Financial Planning Course".to_string(),
                    points_required: 1000,
                },
                Reward {
                    id: "ebook_1".to_string(),
                    name: "Free eBook on Investing Basics".to_string(),
                    points_required: 500,
                },
            ],
            points: PointRules {
                lesson: DifficultyPoints {
                    beginner: 50,
                    intermediate: 100,
                    advanced: 150,
                },
                challenge: DifficultyPoints {
                    beginner: 75,
                    intermediate: 150,
                    advanced: 250,
                },
            },
        }
    }
}
