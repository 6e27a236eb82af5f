//! Alert derivation.
//!
//! [`derive_alerts`] is a pure function of [`FinancialMetrics`] and the
//! current date. Rules run independently, in a fixed order:
//!
//! 1. debts due within a week (and recently overdue)
//! 2. budget categories (over budget, untouched)
//! 3. savings goals
//! 4. cash flow
//! 5. aggregate debt
//! 6. emergency fund coverage
//! 7. health score summary
//!
//! Dismissal filtering and severity ordering happen in the caller.

use chrono::NaiveDate;

use crate::alert::{
    icons, Alert, AlertKey, AlertKind, CashFlowTier, DebtTier, EmergencyFundTier, SavingsTier,
};
use crate::finance::{BudgetStatus, FinancialMetrics, SavingsGoal};
use crate::money::format_money;
use crate::types::YearMonth;

/// A debt due this many days ahead (inclusive) raises a "due soon" alert.
pub const DEBT_DUE_WINDOW_DAYS: i64 = 7;

/// A debt overdue by fewer days than this raises an "overdue" alert.
pub const DEBT_OVERDUE_WINDOW_DAYS: i64 = 30;

/// Cash flow below this (but not negative) is "tight".
pub const TIGHT_CASH_FLOW: f64 = 100.0;

pub const HIGH_DEBT_WARNING: f64 = 5_000.0;
pub const HIGH_DEBT_DANGER: f64 = 15_000.0;

/// Progress (percent) thresholds for savings goal tiers.
const GOAL_ALMOST_PERCENT: f64 = 75.0;
const GOAL_PROGRESS_PERCENT: f64 = 25.0;

/// Derive every alert that applies to `metrics` as of `today`.
pub fn derive_alerts(metrics: &FinancialMetrics, today: NaiveDate) -> Vec<Alert> {
    let month = YearMonth::of(today);
    let mut alerts = Vec::new();

    alerts.extend(debt_due_alerts(metrics, today));
    alerts.extend(
        metrics
            .budget_vs_actual
            .iter()
            .filter_map(|(category, status)| budget_alert(category, status, month)),
    );
    alerts.extend(metrics.savings_goals.iter().filter_map(savings_alert));
    alerts.push(cash_flow_alert(metrics.cash_flow, month));
    alerts.extend(debt_status_alert(metrics));
    alerts.push(emergency_fund_alert(metrics));
    alerts.extend(health_summary_alert(metrics));

    alerts
}

fn debt_due_alerts(metrics: &FinancialMetrics, today: NaiveDate) -> Vec<Alert> {
    metrics
        .debts
        .iter()
        .filter_map(|debt| {
            let due_date = debt.due_date?;
            let days = (due_date - today).num_days();
            let key = AlertKey::Debt {
                debt_id: debt.id,
                due_date,
            };

            if (0..=DEBT_DUE_WINDOW_DAYS).contains(&days) {
                Some(Alert::new(
                    AlertKind::Danger,
                    format!(
                        "Action Required: Your **{}** payment of **{}** is due in **{days} day(s)**! Don't miss it!",
                        debt.debt_name,
                        format_money(debt.current_balance),
                    ),
                    icons::DEBT_DUE,
                    &key,
                ))
            } else if days < 0 && -days < DEBT_OVERDUE_WINDOW_DAYS {
                Some(Alert::new(
                    AlertKind::Danger,
                    format!(
                        "Urgent: Your **{}** payment was due **{} day(s) ago**. Please address this promptly!",
                        debt.debt_name, -days,
                    ),
                    icons::DEBT_OVERDUE,
                    &key,
                ))
            } else {
                None
            }
        })
        .collect()
}

fn budget_alert(category: &str, status: &BudgetStatus, month: YearMonth) -> Option<Alert> {
    let key = AlertKey::Budget {
        category: category.to_string(),
        month,
    };

    if status.remaining < 0.0 {
        Some(Alert::new(
            AlertKind::Warning,
            format!(
                "Heads up! You're **{} over budget** for **{category}** this month. Time to adjust?",
                format_money(status.remaining.abs()),
            ),
            icons::OVER_BUDGET,
            &key,
        ))
    } else if status.budgeted > 0.0 && status.spent == 0.0 {
        Some(Alert::new(
            AlertKind::Info,
            format!(
                "Great start! You've budgeted **{}** for **{category}** and haven't spent anything yet.",
                format_money(status.budgeted),
            ),
            icons::BUDGET_UNTOUCHED,
            &key,
        ))
    } else {
        None
    }
}

pub fn savings_tier(goal: &SavingsGoal) -> SavingsTier {
    if goal.target_amount <= 0.0 {
        SavingsTier::NoTarget
    } else if goal.current_amount >= goal.target_amount {
        SavingsTier::Smashed
    } else if goal.progress_percentage >= GOAL_ALMOST_PERCENT {
        SavingsTier::SeventyFivePercent
    } else if goal.progress_percentage >= GOAL_PROGRESS_PERCENT {
        SavingsTier::TwentyFivePercent
    } else if goal.current_amount > 0.0 {
        SavingsTier::InitialProgress
    } else {
        SavingsTier::Initial
    }
}

fn savings_alert(goal: &SavingsGoal) -> Option<Alert> {
    let tier = savings_tier(goal);
    let name = &goal.goal;
    let pct = goal.progress_percentage;

    let (kind, message, icon) = match tier {
        SavingsTier::Smashed => (
            AlertKind::Success,
            format!("Fantastic! You've **smashed your {name} goal**! Consider setting a new one!"),
            icons::GOAL_SMASHED,
        ),
        SavingsTier::SeventyFivePercent => (
            AlertKind::Info,
            format!("Almost there! Your **{name} goal is {pct:.0}% complete**. Keep pushing!"),
            icons::GOAL_ALMOST,
        ),
        SavingsTier::TwentyFivePercent => (
            AlertKind::Info,
            format!("Good progress on **{name}!** You're at **{pct:.0}%** of your target."),
            icons::GOAL_PROGRESS,
        ),
        SavingsTier::InitialProgress => (
            AlertKind::Info,
            format!(
                "Great start on your **{name} goal**! You've already saved **{}**. Keep going!",
                format_money(goal.current_amount),
            ),
            icons::GOAL_STARTED,
        ),
        SavingsTier::NoTarget => (
            AlertKind::Info,
            format!(
                "Your savings goal '{name}' doesn't have a target amount. Set one to track your progress!"
            ),
            icons::GOAL_NO_TARGET,
        ),
        SavingsTier::Initial => return None,
    };

    Some(Alert::new(
        kind,
        message,
        icon,
        &AlertKey::Savings {
            goal_id: goal.id,
            tier,
        },
    ))
}

pub fn cash_flow_tier(cash_flow: f64) -> CashFlowTier {
    if cash_flow < 0.0 {
        CashFlowTier::Negative
    } else if cash_flow < TIGHT_CASH_FLOW {
        CashFlowTier::Tight
    } else {
        CashFlowTier::Healthy
    }
}

fn cash_flow_alert(cash_flow: f64, month: YearMonth) -> Alert {
    let tier = cash_flow_tier(cash_flow);
    let amount = format_money(cash_flow);

    let (kind, message, icon) = match tier {
        CashFlowTier::Negative => (
            AlertKind::Danger,
            format!(
                "Warning! Your **net cash flow is negative ({amount})**. Let's find ways to boost income or cut expenses."
            ),
            icons::CASH_FLOW_NEGATIVE,
        ),
        CashFlowTier::Tight => (
            AlertKind::Warning,
            format!(
                "Your cash flow is a bit tight (**{amount}**). Small changes can make a big difference!"
            ),
            icons::CASH_FLOW_TIGHT,
        ),
        CashFlowTier::Healthy => (
            AlertKind::Success,
            format!(
                "Excellent cash flow! You're adding **{amount}** to your financial cushion. Keep it up!"
            ),
            icons::CASH_FLOW_HEALTHY,
        ),
    };

    Alert::new(kind, message, icon, &AlertKey::CashFlow { tier, month })
}

pub fn debt_tier(total_liabilities: f64, total_income: f64) -> DebtTier {
    if total_liabilities > HIGH_DEBT_DANGER {
        DebtTier::Critical
    } else if total_liabilities > HIGH_DEBT_WARNING {
        DebtTier::Warning
    } else if total_liabilities == 0.0 && total_income > 0.0 {
        DebtTier::DebtFree
    } else {
        DebtTier::LowOrNone
    }
}

fn debt_status_alert(metrics: &FinancialMetrics) -> Option<Alert> {
    let tier = debt_tier(metrics.total_liabilities, metrics.total_income);
    let total = format_money(metrics.total_liabilities);

    let (kind, message, icon) = match tier {
        DebtTier::Critical => (
            AlertKind::Danger,
            format!(
                "Critical Debt Alert! Your total liabilities are **{total}**. Let's strategize a robust repayment plan!"
            ),
            icons::DEBT_CRITICAL,
        ),
        DebtTier::Warning => (
            AlertKind::Warning,
            format!(
                "Your total debt is **{total}**. It's manageable, but keeping an eye on it is key!"
            ),
            icons::DEBT_WARNING,
        ),
        DebtTier::DebtFree => (
            AlertKind::Success,
            "Congratulations! You are **debt-free**! That's a huge financial win!".to_string(),
            icons::DEBT_FREE,
        ),
        DebtTier::LowOrNone => return None,
    };

    Some(Alert::new(kind, message, icon, &AlertKey::DebtStatus { tier }))
}

pub fn emergency_fund_tier(metrics: &FinancialMetrics) -> EmergencyFundTier {
    if metrics.average_monthly_expenses <= 0.0 {
        EmergencyFundTier::NoExpenseData
    } else if metrics.total_assets >= metrics.emergency_fund_target {
        EmergencyFundTier::Strong
    } else if metrics.total_assets >= metrics.emergency_fund_target * 0.5 {
        EmergencyFundTier::Growing
    } else {
        EmergencyFundTier::Low
    }
}

fn emergency_fund_alert(metrics: &FinancialMetrics) -> Alert {
    let tier = emergency_fund_tier(metrics);
    let target = metrics.emergency_fund_target;

    let (kind, message, icon) = match tier {
        EmergencyFundTier::Strong => (
            AlertKind::Success,
            "Your **emergency fund is strong**! You have at least 3 months of expenses covered. Financial security unlocked!".to_string(),
            icons::EMERGENCY_STRONG,
        ),
        EmergencyFundTier::Growing => {
            let progress = if target > 0.0 {
                (metrics.total_assets / target * 100.0).round()
            } else {
                0.0
            };
            (
                AlertKind::Warning,
                format!(
                    "Your **emergency fund is growing**! You're at {progress:.0}% of your 3-month target. Keep saving!"
                ),
                icons::EMERGENCY_GROWING,
            )
        }
        EmergencyFundTier::Low => (
            AlertKind::Danger,
            format!(
                "Focus on your **emergency fund**. It's currently below 50% of your 3-month target ({}).",
                format_money(target),
            ),
            icons::EMERGENCY_LOW,
        ),
        EmergencyFundTier::NoExpenseData => (
            AlertKind::Info,
            "To assess your emergency fund, please record some expenses first. Then we can calculate your target!".to_string(),
            icons::EMERGENCY_NO_DATA,
        ),
    };

    Alert::new(kind, message, icon, &AlertKey::EmergencyFund { tier })
}

fn health_summary_alert(metrics: &FinancialMetrics) -> Option<Alert> {
    if metrics.health.score == 0 {
        return None;
    }
    Some(Alert::new(
        AlertKind::Info,
        format!(
            "Your overall financial health score is **{}/100**. Click 'View Savings & Financial Health Overview' for details!",
            metrics.health.score
        ),
        icons::HEALTH_SUMMARY,
        &AlertKey::HealthSummary,
    ))
}
