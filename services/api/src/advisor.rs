//! Financial advisor chat
//!
//! Handlers talk to an [`AdviceProvider`]; the built-in [`RuleBasedAdvisor`]
//! answers from keyword rules and the caller's own budget and goals. A
//! model-backed provider can be swapped in through the application state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{budget::BudgetSummary, goal::Goal};

/// What the advisor knows about the caller
#[derive(Debug, Clone, Default)]
pub struct AdviceContext {
    pub budget: BudgetSummary,
    /// Active goals, oldest first
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub reply: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[async_trait]
pub trait AdviceProvider: Send + Sync {
    async fn advise(&self, message: &str, context: &AdviceContext) -> anyhow::Result<Advice>;
}

/// Keyword-driven advisor
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedAdvisor;

impl RuleBasedAdvisor {
    fn reply(message: &str, context: &AdviceContext) -> String {
        let lowered = message.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|word| lowered.contains(word));

        if mentions(&["budget"]) {
            let budget = &context.budget;
            return format!(
                "Based on your budget, your total income is R{:.2} and your total expenses are R{:.2}. \
                 You are saving R{:.2} per month. How can I help you optimise this?",
                budget.income,
                budget.total_expenses(),
                budget.monthly_savings()
            );
        }

        if mentions(&["goal"]) {
            return match context.goals.first() {
                Some(goal) => format!(
                    "I see you have a goal to {}. You have saved R{:.2} out of R{:.2}. You are doing great!",
                    goal.goal_type, goal.current_amount, goal.target_amount
                ),
                None => "You don't have any active goals. Would you like to set one up?".to_string(),
            };
        }

        if mentions(&["invest", "stock", "portfolio"]) {
            return "Start with a diversified, low-cost index fund and invest a fixed amount every \
                    month. Keep an emergency fund of three to six months of expenses before taking \
                    on market risk."
                .to_string();
        }

        if mentions(&["expense", "save"]) {
            return "Try the 50/30/20 rule: 50% of income for needs, 30% for wants and 20% for \
                    savings and debt repayment."
                .to_string();
        }

        if mentions(&["security", "password", "hack"]) {
            return "Use a unique password for every financial account, turn on two-factor \
                    authentication and never share one-time PINs, even with someone claiming to be \
                    your bank."
                .to_string();
        }

        if mentions(&["scan", "link", "url"]) {
            return "Paste the link or message you are unsure about and I'll check it for common \
                    phishing signs."
                .to_string();
        }

        format!(
            "You said: \"{}\". I'm a mock advisor. A full assistant would provide a more detailed \
             financial analysis.",
            message
        )
    }
}

#[async_trait]
impl AdviceProvider for RuleBasedAdvisor {
    async fn advise(&self, message: &str, context: &AdviceContext) -> anyhow::Result<Advice> {
        Ok(Advice {
            reply: Self::reply(message, context),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn context_with_goal() -> AdviceContext {
        AdviceContext {
            budget: BudgetSummary {
                income: 5000.0,
                expenses_json: [("rent".to_string(), 2000.0), ("food".to_string(), 1000.0)]
                    .into_iter()
                    .collect(),
            },
            goals: vec![Goal {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                goal_type: "buy a car".to_string(),
                target_amount: 80000.0,
                current_amount: 12000.0,
                status: "active".to_string(),
                target_date: None,
                created_at: Utc::now(),
            }],
        }
    }

    async fn ask(message: &str, context: &AdviceContext) -> String {
        RuleBasedAdvisor.advise(message, context).await.unwrap().reply
    }

    #[tokio::test]
    async fn test_budget_summary_uses_context() {
        let reply = ask("How is my BUDGET looking?", &context_with_goal()).await;

        assert!(reply.contains("R5000.00"));
        assert!(reply.contains("R3000.00"));
        assert!(reply.contains("R2000.00 per month"));
    }

    #[tokio::test]
    async fn test_goal_replies() {
        let reply = ask("any goal tips?", &context_with_goal()).await;
        assert!(reply.contains("buy a car"));
        assert!(reply.contains("R12000.00 out of R80000.00"));

        let reply = ask("any goal tips?", &AdviceContext::default()).await;
        assert!(reply.contains("don't have any active goals"));
    }

    #[tokio::test]
    async fn test_rule_order() {
        let context = AdviceContext::default();

        // "budget" wins over "invest" when both appear
        assert!(ask("budget to invest", &context).await.starts_with("Based on your budget"));
        assert!(ask("Should I buy stocks?", &context).await.contains("index fund"));
        assert!(ask("how do I save more", &context).await.contains("50/30/20"));
        assert!(ask("I think I got hacked", &context).await.contains("two-factor"));
        assert!(ask("is this link safe", &context).await.contains("phishing"));
    }

    #[tokio::test]
    async fn test_fallback_echoes_message() {
        let reply = ask("hello there", &AdviceContext::default()).await;

        assert!(reply.starts_with("You said: \"hello there\"."));
        assert!(reply.contains("mock"));
    }
}
