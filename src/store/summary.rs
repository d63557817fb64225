//! Monthly totals derived from a [MoneyTracker].
//!
//! Nothing here is cached, every figure is computed from the tracker's current
//! categories and transactions.

use std::collections::HashMap;

use time::Date;

use crate::{Category, CategoryName, Month, MoneyTracker, RecordId};

/// The total amount for each category ID.
pub type CategorySums = HashMap<RecordId, f64>;

/// One category's total for a month.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    /// The category's ID.
    pub id: RecordId,
    /// The category's name.
    pub name: CategoryName,
    /// The sum of the category's transactions in the month.
    pub total: f64,
}

/// Income and expenses for one month, per category and in total.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// The month the figures cover.
    pub month: Month,
    /// Income categories in the order they were created.
    pub income: Vec<CategorySummary>,
    /// Expense categories in the order they were created.
    pub expenses: Vec<CategorySummary>,
    /// The sum over all income categories.
    pub total_income: f64,
    /// The sum over all expense categories.
    pub total_expense: f64,
    /// Total income minus total expenses.
    pub net_income: f64,
}

impl MoneyTracker {
    /// Whether `date` falls in `month`.
    pub fn is_in_month(date: Date, month: Month) -> bool {
        month.contains(date)
    }

    /// The sum of each income category's transactions in `month`.
    ///
    /// Every income category has an entry, categories without transactions
    /// in the month map to zero.
    pub fn income_category_sums(&self, month: Month) -> CategorySums {
        self.category_sums(self.income_categories(), month)
    }

    /// The sum of each expense category's transactions in `month`.
    ///
    /// Every expense category has an entry, categories without transactions
    /// in the month map to zero.
    pub fn expense_category_sums(&self, month: Month) -> CategorySums {
        self.category_sums(self.expense_categories(), month)
    }

    /// The total of all income in `month`.
    pub fn total_income(&self, month: Month) -> f64 {
        self.income_category_sums(month).values().sum()
    }

    /// The total of all expenses in `month`.
    pub fn total_expense(&self, month: Month) -> f64 {
        self.expense_category_sums(month).values().sum()
    }

    /// Income minus expenses in `month`.
    pub fn net_income(&self, month: Month) -> f64 {
        self.total_income(month) - self.total_expense(month)
    }

    /// Collect the figures for the dashboard.
    pub fn monthly_summary(&self, month: Month) -> MonthlySummary {
        let income = self.summarise(self.income_categories(), month);
        let expenses = self.summarise(self.expense_categories(), month);
        let total_income: f64 = income.iter().map(|row| row.total).sum();
        let total_expense: f64 = expenses.iter().map(|row| row.total).sum();

        MonthlySummary {
            month,
            income,
            expenses,
            total_income,
            total_expense,
            net_income: total_income - total_expense,
        }
    }

    fn category_sums(&self, categories: &[Category], month: Month) -> CategorySums {
        categories
            .iter()
            .map(|category| (category.id.clone(), self.category_total(category, month)))
            .collect()
    }

    fn summarise(&self, categories: &[Category], month: Month) -> Vec<CategorySummary> {
        categories
            .iter()
            .map(|category| CategorySummary {
                id: category.id.clone(),
                name: category.name.clone(),
                total: self.category_total(category, month),
            })
            .collect()
    }

    fn category_total(&self, category: &Category, month: Month) -> f64 {
        self.transactions_by_category(&category.id)
            .into_iter()
            .filter(|transaction| Self::is_in_month(transaction.date, month))
            .map(|transaction| transaction.amount)
            .sum()
    }
}
