//! Savings projection and loan/investment calculators

use crate::models::scenario::{
    InvestmentRequest, InvestmentResponse, LoanRequest, LoanResponse, SimulationInput,
    SimulationRequest, SimulationResponse,
};

/// Project savings month by month
///
/// Each month the contribution is added and the balance then grows by
/// `annual_return / 12`.
pub fn run_simulation(input: &SimulationInput) -> f64 {
    let monthly_rate = input.annual_return / 12.0;
    let mut future_value = input.current_savings;

    for _ in 0..input.years * 12 {
        future_value = (future_value + input.monthly_contribution) * (1.0 + monthly_rate);
    }

    future_value
}

/// Amortised monthly repayment (EMI)
pub fn loan_payment(principal: f64, annual_rate: f64, years: f64) -> f64 {
    let months = years * 12.0;
    let monthly_rate = annual_rate / 12.0;

    if monthly_rate == 0.0 {
        return principal / months;
    }

    let growth = (1.0 + monthly_rate).powf(months);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Lump sum compounded `compounds_per_year` times a year
pub fn investment_future_value(
    principal: f64,
    annual_rate: f64,
    years: f64,
    compounds_per_year: f64,
) -> f64 {
    principal * (1.0 + annual_rate / compounds_per_year).powf(compounds_per_year * years)
}

/// Reject results that overflowed to infinity or NaN
fn finite(value: f64) -> Result<f64, String> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err("Inputs produce a result too large to represent".to_string())
    }
}

/// Validate a simulation request and describe the outcome
pub fn simulate(request: SimulationRequest) -> Result<SimulationResponse, String> {
    let input = request.into_input()?;
    let final_amount = finite(run_simulation(&input))?;

    Ok(SimulationResponse {
        message: format!(
            "After {} years, your savings could be worth R {:.2}.",
            input.years, final_amount
        ),
        final_amount,
    })
}

pub fn quote_loan(request: &LoanRequest) -> Result<LoanResponse, String> {
    let principal = request.principal.resolve("principal")?;
    let annual_rate = request.annual_rate.resolve("annualRate")?;
    let years = request.years.resolve("years")?;

    if principal <= 0.0 {
        return Err("principal must be greater than zero".to_string());
    }
    if annual_rate < 0.0 {
        return Err("annualRate must not be negative".to_string());
    }
    if years <= 0.0 {
        return Err("years must be greater than zero".to_string());
    }

    let monthly_payment = finite(loan_payment(principal, annual_rate, years))?;

    Ok(LoanResponse {
        monthly_payment,
        total_paid: finite(monthly_payment * years * 12.0)?,
    })
}

pub fn project_investment(request: &InvestmentRequest) -> Result<InvestmentResponse, String> {
    let principal = request.principal.resolve("principal")?;
    let annual_rate = request.annual_rate.resolve("annualRate")?;
    let years = request.years.resolve("years")?;
    let compounds_per_year = match &request.compounds_per_year {
        Some(value) => value.resolve("compoundsPerYear")?,
        None => 12.0,
    };

    if principal < 0.0 {
        return Err("principal must not be negative".to_string());
    }
    if annual_rate < 0.0 {
        return Err("annualRate must not be negative".to_string());
    }
    if years < 0.0 {
        return Err("years must not be negative".to_string());
    }
    if compounds_per_year <= 0.0 {
        return Err("compoundsPerYear must be greater than zero".to_string());
    }

    let future_value = investment_future_value(principal, annual_rate, years, compounds_per_year);

    Ok(InvestmentResponse {
        future_value: finite(future_value)?,
    })
}
