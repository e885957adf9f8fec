//! Application state shared across handlers

use std::sync::Arc;

use common::token::TokenService;
use sqlx::PgPool;

use crate::{
    advisor::AdviceProvider,
    catalog::GamificationCatalog,
    repositories::{
        BudgetRepository, ChallengeRepository, GoalRepository, LessonRepository,
        ProgressRepository, UserRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub token_service: TokenService,
    pub budget_repository: BudgetRepository,
    pub goal_repository: GoalRepository,
    pub lesson_repository: LessonRepository,
    pub challenge_repository: ChallengeRepository,
    pub progress_repository: ProgressRepository,
    pub user_repository: UserRepository,
    pub catalog: Arc<GamificationCatalog>,
    pub advisor: Arc<dyn AdviceProvider>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        token_service: TokenService,
        catalog: GamificationCatalog,
        advisor: Arc<dyn AdviceProvider>,
    ) -> Self {
        Self {
            budget_repository: BudgetRepository::new(pool.clone()),
            goal_repository: GoalRepository::new(pool.clone()),
            lesson_repository: LessonRepository::new(pool.clone()),
            challenge_repository: ChallengeRepository::new(pool.clone()),
            progress_repository: ProgressRepository::new(pool.clone()),
            user_repository: UserRepository::new(pool.clone()),
            db_pool: pool,
            token_service,
            catalog: Arc::new(catalog),
            advisor,
        }
    }
}
