//! The logged-in user's categories and transactions, and the operations that
//! change them.
//!
//! A [MoneyTracker] is built for each request from the REST API. Every
//! mutation goes to the API first and the local copy is only updated once the
//! API has accepted the change, so a failed operation leaves the tracker as it
//! was before the call.

mod summary;

pub use summary::{CategorySummary, CategorySums, MonthlySummary};

use time::Date;

use crate::{
    ApiClient, Category, CategoryName, Error, NewCategory, NewTransaction, RecordId, Transaction,
    User, transaction::validate_amount,
};

/// A user's categories and transactions, kept in sync with the REST API.
#[derive(Debug, Clone)]
pub struct MoneyTracker {
    api: ApiClient,
    user: User,
    categories: Vec<Category>,
    income_categories: Vec<Category>,
    expense_categories: Vec<Category>,
    transactions: Vec<Transaction>,
}

impl MoneyTracker {
    /// Create an empty tracker for `user`.
    ///
    /// Call [MoneyTracker::fetch_categories] and
    /// [MoneyTracker::fetch_transactions], or use [MoneyTracker::load], to
    /// populate it.
    pub fn new(api: ApiClient, user: User) -> Self {
        Self {
            api,
            user,
            categories: Vec::new(),
            income_categories: Vec::new(),
            expense_categories: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Create a tracker for `user` with their categories and transactions.
    ///
    /// # Errors
    ///
    /// Returns an API error if either collection could not be fetched.
    pub async fn load(api: ApiClient, user: User) -> Result<Self, Error> {
        let mut tracker = Self::new(api, user);
        tracker.fetch_categories().await?;
        tracker.fetch_transactions().await?;

        Ok(tracker)
    }

    /// The user whose data this is.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// All of the user's categories in the order the API returned them.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The categories for money coming in.
    pub fn income_categories(&self) -> &[Category] {
        &self.income_categories
    }

    /// The categories for money going out.
    pub fn expense_categories(&self) -> &[Category] {
        &self.expense_categories
    }

    /// All of the user's transactions.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Find one of the user's categories by ID.
    pub fn find_category(&self, id: &RecordId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    /// Find one of the user's transactions by ID.
    pub fn find_transaction(&self, id: &RecordId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| &transaction.id == id)
    }

    /// Replace the local categories with the user's categories from the API.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails. The local categories are
    /// left untouched in that case.
    pub async fn fetch_categories(&mut self) -> Result<(), Error> {
        let categories = self.api.get_categories(&self.user.id).await?;

        let (income_categories, expense_categories) = categories
            .iter()
            .cloned()
            .partition(|category| category.is_income);

        self.categories = categories;
        self.income_categories = income_categories;
        self.expense_categories = expense_categories;

        Ok(())
    }

    /// Replace the local transactions with the user's transactions from the API.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails. The local transactions are
    /// left untouched in that case.
    pub async fn fetch_transactions(&mut self) -> Result<(), Error> {
        self.transactions = self.api.get_transactions(&self.user.id).await?;

        Ok(())
    }

    /// Create a category and add it to the local lists.
    ///
    /// # Errors
    ///
    /// Returns an API error if the category could not be created.
    pub async fn add_category(
        &mut self,
        name: CategoryName,
        is_income: bool,
    ) -> Result<Category, Error> {
        let new_category = NewCategory::new(name, is_income, self.user.id.clone());
        let category = self.api.create_category(&new_category).await?;

        tracing::debug!("Created category {} ({})", category.name, category.id);

        if category.is_income {
            self.income_categories.push(category.clone());
        } else {
            self.expense_categories.push(category.clone());
        }
        self.categories.push(category.clone());

        Ok(category)
    }

    /// The transactions filed under `category_id`.
    ///
    /// An empty ID matches no transactions.
    pub fn transactions_by_category(&self, category_id: &RecordId) -> Vec<&Transaction> {
        if category_id.is_empty() {
            return Vec::new();
        }

        self.transactions
            .iter()
            .filter(|transaction| &transaction.category_id == category_id)
            .collect()
    }

    /// Create a transaction and then reload the local transactions so that
    /// they match the API.
    ///
    /// Once the API has created the transaction this succeeds. If reloading
    /// fails, the error is logged and the created transaction is added to the
    /// local transactions instead.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] or [Error::InvalidCategory] without
    /// contacting the API if the transaction is invalid, otherwise an API
    /// error if the transaction could not be created.
    pub async fn add_transaction(
        &mut self,
        date: Date,
        is_income: bool,
        amount: f64,
        memo: &str,
        category_id: RecordId,
    ) -> Result<(), Error> {
        let new_transaction = NewTransaction {
            user_id: self.user.id.clone(),
            date,
            is_income,
            amount,
            memo: memo.to_owned(),
            category_id,
        };
        self.validate(&new_transaction)?;

        let transaction = self.api.create_transaction(&new_transaction).await?;
        tracing::debug!("Created transaction {}", transaction.id);

        if let Err(error) = self.fetch_transactions().await {
            tracing::error!(
                "Could not reload transactions after creating transaction {}: {error}",
                transaction.id
            );
            self.transactions.push(transaction);
        }

        Ok(())
    }

    /// Replace the transaction `id` with `data`.
    ///
    /// The local copy of the transaction is replaced with the record the API
    /// returns. If there is no local transaction with the ID, the local
    /// transactions are not changed.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] or [Error::InvalidCategory] without
    /// contacting the API if `data` is invalid,
    /// [Error::UpdateMissingTransaction] if the API has no such transaction,
    /// or another API error if the request fails.
    pub async fn edit_transaction(
        &mut self,
        id: &RecordId,
        data: &NewTransaction,
    ) -> Result<Transaction, Error> {
        self.validate(data)?;

        let updated = self
            .api
            .update_transaction(id, data)
            .await
            .map_err(|error| match error {
                Error::NotFound => Error::UpdateMissingTransaction,
                error => error,
            })?;

        if let Some(transaction) = self
            .transactions
            .iter_mut()
            .find(|transaction| &transaction.id == id)
        {
            *transaction = updated.clone();
        }

        Ok(updated)
    }

    /// Delete the transaction `id` from the API and the local transactions.
    ///
    /// # Errors
    ///
    /// Returns [Error::DeleteMissingTransaction] if the API has no such
    /// transaction, or another API error if the request fails.
    pub async fn delete_transaction(&mut self, id: &RecordId) -> Result<(), Error> {
        self.api
            .delete_transaction(id)
            .await
            .map_err(|error| match error {
                Error::NotFound => Error::DeleteMissingTransaction,
                error => error,
            })?;

        self.transactions.retain(|transaction| &transaction.id != id);

        Ok(())
    }

    fn validate(&self, transaction: &NewTransaction) -> Result<(), Error> {
        validate_amount(transaction.amount)?;

        if self.find_category(&transaction.category_id).is_none() {
            return Err(Error::InvalidCategory(transaction.category_id.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
impl MoneyTracker {
    /// A tracker with local data only, for tests that do not touch the API.
    pub(crate) fn with_data(
        user: User,
        categories: Vec<Category>,
        transactions: Vec<Transaction>,
    ) -> Self {
        let (income_categories, expense_categories) = categories
            .iter()
            .cloned()
            .partition(|category| category.is_income);

        Self {
            api: ApiClient::new("http://localhost:0"),
            user,
            categories,
            income_categories,
            expense_categories,
            transactions,
        }
    }
}
