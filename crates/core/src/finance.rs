//! Finance records and the metrics aggregated from them.
//!
//! [`FinancialSnapshot`] is everything stored for one user.
//! [`FinancialMetrics::compute`] turns it into the figures the alert rules
//! and the health score read.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::health::{HealthInputs, HealthScore};
use crate::types::{DbId, YearMonth};

/// Number of months of average expenses an emergency fund should cover.
pub const EMERGENCY_FUND_MONTHS: f64 = 3.0;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A savings goal as stored: `amount` saved so far toward `target_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalRecord {
    pub id: DbId,
    pub goal: String,
    pub amount: f64,
    pub target_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DbId,
    pub debt_name: String,
    pub current_balance: f64,
    pub due_date: Option<NaiveDate>,
}

/// All finance records for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub incomes: Vec<f64>,
    pub expenses: Vec<Expense>,
    pub budgets: Vec<BudgetLine>,
    pub savings_goals: Vec<SavingsGoalRecord>,
    pub debts: Vec<Debt>,
}

// ---------------------------------------------------------------------------
// Derived figures
// ---------------------------------------------------------------------------

/// A savings goal with its progress computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsGoal {
    pub id: DbId,
    pub goal: String,
    pub current_amount: f64,
    /// `0.0` when the stored target is missing.
    pub target_amount: f64,
    /// Percent of target reached, capped at 100 and rounded to 2 decimals.
    pub progress_percentage: f64,
}

impl From<&SavingsGoalRecord> for SavingsGoal {
    fn from(record: &SavingsGoalRecord) -> Self {
        let target_amount = record.target_amount.unwrap_or(0.0);
        let progress_percentage = if target_amount <= 0.0 {
            0.0
        } else {
            let pct = (record.amount / target_amount * 100.0).min(100.0);
            (pct * 100.0).round() / 100.0
        };
        Self {
            id: record.id,
            goal: record.goal.clone(),
            current_amount: record.amount,
            target_amount,
            progress_percentage,
        }
    }
}

/// Budgeted vs spent for one category in the current month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialMetrics {
    pub total_income: f64,
    pub total_expenses: f64,
    pub cash_flow: f64,
    /// Sum of saved amounts across goals.
    pub total_assets: f64,
    /// Sum of outstanding debt balances.
    pub total_liabilities: f64,
    pub savings_goals: Vec<SavingsGoal>,
    pub debts: Vec<Debt>,
    /// Current-month budget per category, ordered by category name.
    pub budget_vs_actual: BTreeMap<String, BudgetStatus>,
    pub average_monthly_expenses: f64,
    pub emergency_fund_target: f64,
    /// Months of average expenses covered by savings.
    pub emergency_fund_coverage_months: f64,
    pub health: HealthScore,
}

impl FinancialMetrics {
    /// Aggregate a snapshot. `today` selects the budget month.
    pub fn compute(snapshot: &FinancialSnapshot, today: NaiveDate) -> Self {
        let savings_goals: Vec<SavingsGoal> =
            snapshot.savings_goals.iter().map(SavingsGoal::from).collect();

        let total_income: f64 = snapshot.incomes.iter().sum();
        let total_expenses: f64 = snapshot.expenses.iter().map(|e| e.amount).sum();
        let total_assets: f64 = savings_goals.iter().map(|g| g.current_amount).sum();
        let total_liabilities: f64 = snapshot.debts.iter().map(|d| d.current_balance).sum();

        let budget_vs_actual = budget_vs_actual(snapshot, YearMonth::of(today));

        let expense_months: BTreeSet<YearMonth> = snapshot
            .expenses
            .iter()
            .map(|e| YearMonth::of(e.date))
            .collect();
        let average_monthly_expenses = if expense_months.is_empty() {
            0.0
        } else {
            total_expenses / expense_months.len() as f64
        };
        let emergency_fund_target = average_monthly_expenses * EMERGENCY_FUND_MONTHS;
        let emergency_fund_coverage_months = if average_monthly_expenses > 0.0 {
            total_assets / average_monthly_expenses
        } else {
            0.0
        };

        let health = HealthScore::evaluate(&HealthInputs {
            total_income,
            total_expenses,
            total_assets,
            total_liabilities,
            has_goals: !savings_goals.is_empty(),
            has_debts: !snapshot.debts.is_empty(),
            average_monthly_expenses,
        });

        Self {
            total_income,
            total_expenses,
            cash_flow: total_income - total_expenses,
            total_assets,
            total_liabilities,
            savings_goals,
            debts: snapshot.debts.clone(),
            budget_vs_actual,
            average_monthly_expenses,
            emergency_fund_target,
            emergency_fund_coverage_months,
            health,
        }
    }

    /// Categories spent past their budget this month.
    pub fn over_budget_categories(&self) -> Vec<&str> {
        self.budget_vs_actual
            .iter()
            .filter(|(_, s)| s.remaining < 0.0)
            .map(|(c, _)| c.as_str())
            .collect()
    }
}

fn budget_vs_actual(snapshot: &FinancialSnapshot, month: YearMonth) -> BTreeMap<String, BudgetStatus> {
    let mut map: BTreeMap<String, BudgetStatus> = BTreeMap::new();

    for line in snapshot.budgets.iter().filter(|b| month.contains(b.date)) {
        map.entry(line.category.clone()).or_default().budgeted += line.amount;
    }
    for expense in snapshot.expenses.iter().filter(|e| month.contains(e.date)) {
        map.entry(expense.category.clone()).or_default().spent += expense.amount;
    }
    for status in map.values_mut() {
        status.remaining = status.budgeted - status.spent;
    }
    map
}
