//! Read-only repository over the `income`, `expenses`, `budget`, `savings`
//! and `debt` tables.

use cashcompass_core::finance::FinancialSnapshot;
use cashcompass_core::types::DbId;
use sqlx::PgPool;

use crate::models::finance::{BudgetRow, DebtRow, ExpenseRow, SavingsRow};

/// Loads a user's finance records.
pub struct FinanceRepo;

impl FinanceRepo {
    /// Amounts of every income entry for a user.
    pub async fn list_income_amounts(pool: &PgPool, user_id: DbId) -> Result<Vec<f64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT amount::DOUBLE PRECISION FROM income WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_expenses(pool: &PgPool, user_id: DbId) -> Result<Vec<ExpenseRow>, sqlx::Error> {
        sqlx::query_as::<_, ExpenseRow>(
            "SELECT category, amount::DOUBLE PRECISION AS amount, date \
             FROM expenses WHERE user_id = $1 ORDER BY date, id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_budget_lines(pool: &PgPool, user_id: DbId) -> Result<Vec<BudgetRow>, sqlx::Error> {
        sqlx::query_as::<_, BudgetRow>(
            "SELECT category, amount::DOUBLE PRECISION AS amount, date \
             FROM budget WHERE user_id = $1 ORDER BY date, id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_savings_goals(pool: &PgPool, user_id: DbId) -> Result<Vec<SavingsRow>, sqlx::Error> {
        sqlx::query_as::<_, SavingsRow>(
            "SELECT id, goal, amount::DOUBLE PRECISION AS amount, \
                    target_amount::DOUBLE PRECISION AS target_amount \
             FROM savings WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_debts(pool: &PgPool, user_id: DbId) -> Result<Vec<DebtRow>, sqlx::Error> {
        sqlx::query_as::<_, DebtRow>(
            "SELECT id, debt_name, current_balance::DOUBLE PRECISION AS current_balance, due_date \
             FROM debt WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Load all of a user's records. The five queries run concurrently.
    pub async fn load_snapshot(pool: &PgPool, user_id: DbId) -> Result<FinancialSnapshot, sqlx::Error> {
        let (incomes, expenses, budgets, savings, debts) = tokio::try_join!(
            Self::list_income_amounts(pool, user_id),
            Self::list_expenses(pool, user_id),
            Self::list_budget_lines(pool, user_id),
            Self::list_savings_goals(pool, user_id),
            Self::list_debts(pool, user_id),
        )?;

        Ok(FinancialSnapshot {
            incomes,
            expenses: expenses.into_iter().map(Into::into).collect(),
            budgets: budgets.into_iter().map(Into::into).collect(),
            savings_goals: savings.into_iter().map(Into::into).collect(),
            debts: debts.into_iter().map(Into::into).collect(),
        })
    }
}
