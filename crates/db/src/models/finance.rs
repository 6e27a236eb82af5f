//! Row types for the finance tables.
//!
//! Money columns are `NUMERIC` in the schema and are cast to
//! `DOUBLE PRECISION` in the repository queries, so rows carry `f64`.

use cashcompass_core::finance::{BudgetLine, Debt, Expense, SavingsGoalRecord};
use cashcompass_core::types::DbId;
use chrono::NaiveDate;
use sqlx::FromRow;

/// A row from the `expenses` table.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRow {
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Self {
            category: row.category,
            amount: row.amount,
            date: row.date,
        }
    }
}

/// A row from the `budget` table.
#[derive(Debug, Clone, FromRow)]
pub struct BudgetRow {
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl From<BudgetRow> for BudgetLine {
    fn from(row: BudgetRow) -> Self {
        Self {
            category: row.category,
            amount: row.amount,
            date: row.date,
        }
    }
}

/// A row from the `savings` table.
#[derive(Debug, Clone, FromRow)]
pub struct SavingsRow {
    pub id: DbId,
    pub goal: String,
    pub amount: f64,
    pub target_amount: Option<f64>,
}

impl From<SavingsRow> for SavingsGoalRecord {
    fn from(row: SavingsRow) -> Self {
        Self {
            id: row.id,
            goal: row.goal,
            amount: row.amount,
            target_amount: row.target_amount,
        }
    }
}

/// A row from the `debt` table (only the columns alerts read).
#[derive(Debug, Clone, FromRow)]
pub struct DebtRow {
    pub id: DbId,
    pub debt_name: String,
    pub current_balance: f64,
    pub due_date: Option<NaiveDate>,
}

impl From<DebtRow> for Debt {
    fn from(row: DebtRow) -> Self {
        Self {
            id: row.id,
            debt_name: row.debt_name,
            current_balance: row.current_balance,
            due_date: row.due_date,
        }
    }
}
