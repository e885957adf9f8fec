//! Scenario and calculator payloads

use serde::{Deserialize, Serialize};

/// A numeric field that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    /// Resolve to a finite number, naming `field` in the error
    pub fn resolve(&self, field: &str) -> Result<f64, String> {
        let value = match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{} must be a number", field))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("{} must be a number", field))
        }
    }
}

fn resolve_or(input: &Option<NumberInput>, field: &str, default: f64) -> Result<f64, String> {
    match input {
        Some(value) => value.resolve(field),
        None => Ok(default),
    }
}

/// Savings projection request; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub current_savings: Option<NumberInput>,
    pub monthly_contribution: Option<NumberInput>,
    pub annual_return: Option<NumberInput>,
    pub years: Option<NumberInput>,
}

/// Validated simulation inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationInput {
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return: f64,
    pub years: u32,
}

pub const MAX_SIMULATION_YEARS: u32 = 100;

impl SimulationRequest {
    /// Apply defaults (0, 0, 5%, 10 years) and range checks
    pub fn into_input(self) -> Result<SimulationInput, String> {
        let current_savings = resolve_or(&self.current_savings, "currentSavings", 0.0)?;
        let monthly_contribution =
            resolve_or(&self.monthly_contribution, "monthlyContribution", 0.0)?;
        let annual_return = resolve_or(&self.annual_return, "annualReturn", 0.05)?;
        let years = resolve_or(&self.years, "years", 10.0)?.trunc();

        if years < 0.0 || years > f64::from(MAX_SIMULATION_YEARS) {
            return Err(format!(
                "years must be between 0 and {}",
                MAX_SIMULATION_YEARS
            ));
        }

        Ok(SimulationInput {
            current_savings,
            monthly_contribution,
            annual_return,
            years: years as u32,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub message: String,
    pub final_amount: f64,
}

/// Loan repayment request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub principal: NumberInput,
    /// Annual interest rate as a fraction (0.11 for 11%)
    pub annual_rate: NumberInput,
    pub years: NumberInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub monthly_payment: f64,
    pub total_paid: f64,
}

/// Lump-sum investment growth request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    pub principal: NumberInput,
    /// Annual interest rate as a fraction
    pub annual_rate: NumberInput,
    pub years: NumberInput,
    pub compounds_per_year: Option<NumberInput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentResponse {
    pub future_value: f64,
}
