//! Financial health score (0-100).
//!
//! Three components are summed and capped at 100:
//!
//! | Component              | Points                                   |
//! |------------------------|------------------------------------------|
//! | Savings rate           | >=20% -> 40, >=10% -> 25, else 10         |
//! | Debt-to-asset ratio    | <=30% -> 30, <=60% -> 15, else 5          |
//! | Emergency fund (3 mo.) | covered -> 30, half -> 15, else 5        |

use serde::Serialize;

use crate::finance::EMERGENCY_FUND_MONTHS;
use crate::money::format_money_grouped;

pub const MAX_SCORE: u32 = 100;

/// Figures the score is computed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthInputs {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub has_goals: bool,
    pub has_debts: bool,
    pub average_monthly_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    pub score: u32,
    /// One human-readable line per component.
    pub details: Vec<String>,
}

impl HealthScore {
    pub fn evaluate(inputs: &HealthInputs) -> Self {
        if is_blank(inputs) {
            return Self {
                score: 0,
                details: vec![
                    "No financial data recorded yet. Add some data to see your score!".to_string(),
                ],
            };
        }

        // Savings are what the goals hold.
        let savings = inputs.total_assets;
        let mut details = Vec::with_capacity(4);

        let (savings_rate, savings_points) = savings_rate_points(savings, inputs.total_income);
        details.push(format!(
            "Savings Rate: {}% ({savings_points} points)",
            percent(savings_rate)
        ));

        let (ratio, debt_points) = debt_ratio_points(inputs.total_liabilities, inputs.total_assets);
        let total_debt = format_money_grouped(inputs.total_liabilities);
        details.push(match ratio {
            Some(r) => format!(
                "Debt-to-Asset Ratio: {}% ({debt_points} points) - Total Debt: {total_debt}",
                percent(r)
            ),
            None => format!(
                "Debt-to-Asset Ratio: Infinite% ({debt_points} points) - Total Debt: {total_debt}"
            ),
        });

        let fund_points = emergency_fund_points(savings, inputs.average_monthly_expenses);
        details.push(format!(
            "Emergency Fund Coverage (vs 3 months avg expenses {}): Current Savings: {} ({fund_points} points)",
            format_money_grouped(inputs.average_monthly_expenses),
            format_money_grouped(savings),
        ));

        details.push(format!(
            "Net Worth: {}",
            format_money_grouped(inputs.total_assets - inputs.total_liabilities)
        ));

        Self {
            score: (savings_points + debt_points + fund_points).min(MAX_SCORE),
            details,
        }
    }
}

/// Rounded to two places with trailing zeros dropped, keeping one decimal:
/// `20.0`, `12.5`, `33.33`.
fn percent(value: f64) -> String {
    format!("{:?}", (value * 100.0).round() / 100.0)
}

fn is_blank(inputs: &HealthInputs) -> bool {
    inputs.total_income == 0.0
        && inputs.total_expenses == 0.0
        && inputs.total_assets == 0.0
        && inputs.total_liabilities == 0.0
        && !inputs.has_goals
        && !inputs.has_debts
}

fn savings_rate_points(savings: f64, income: f64) -> (f64, u32) {
    if income <= 0.0 {
        return (0.0, 0);
    }
    let rate = savings / income * 100.0;
    let points = if rate >= 20.0 {
        40
    } else if rate >= 10.0 {
        25
    } else {
        10
    };
    (rate, points)
}

/// Returns `None` for the ratio when there is debt but no assets.
fn debt_ratio_points(liabilities: f64, assets: f64) -> (Option<f64>, u32) {
    if liabilities == 0.0 && assets == 0.0 {
        return (Some(0.0), 30);
    }
    if assets <= 0.0 {
        return (None, 5);
    }
    let ratio = liabilities / assets * 100.0;
    let points = if ratio <= 30.0 {
        30
    } else if ratio <= 60.0 {
        15
    } else {
        5
    };
    (Some(ratio), points)
}

fn emergency_fund_points(savings: f64, average_monthly_expenses: f64) -> u32 {
    if average_monthly_expenses <= 0.0 {
        return 0;
    }
    let target = average_monthly_expenses * EMERGENCY_FUND_MONTHS;
    if savings >= target {
        30
    } else if savings >= target * 0.5 {
        15
    } else {
        5
    }
}
