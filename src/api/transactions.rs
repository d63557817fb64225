//! Fetching, creating, updating and deleting transactions.

use crate::{
    Error, NewTransaction, RecordId, Transaction,
    api::{ApiClient, TRANSACTIONS, check_record_status, check_status},
};

impl ApiClient {
    /// Get all transactions owned by `user_id`, in the order the API returns them.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails.
    pub async fn get_transactions(&self, user_id: &RecordId) -> Result<Vec<Transaction>, Error> {
        let response = self
            .http
            .get(self.collection_url(TRANSACTIONS))
            .query(&[("user_id", user_id.as_str())])
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not request transactions: {error}"))?;

        let transactions = check_status(response)?
            .json::<Vec<Transaction>>()
            .await
            .inspect_err(|error| tracing::error!("Could not decode transactions: {error}"))?;

        Ok(transactions)
    }

    /// Create a transaction and return the record the API created.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails.
    pub async fn create_transaction(
        &self,
        new_transaction: &NewTransaction,
    ) -> Result<Transaction, Error> {
        let response = self
            .http
            .post(self.collection_url(TRANSACTIONS))
            .json(new_transaction)
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not send new transaction: {error}"))?;

        let transaction = check_status(response)?
            .json::<Transaction>()
            .await
            .inspect_err(|error| tracing::error!("Could not decode new transaction: {error}"))?;

        Ok(transaction)
    }

    /// Replace the transaction `id` with `data` and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if the API has no such
    /// transaction, or an API error if the request fails.
    pub async fn update_transaction(
        &self,
        id: &RecordId,
        data: &NewTransaction,
    ) -> Result<Transaction, Error> {
        let response = self
            .http
            .put(self.record_url(TRANSACTIONS, id.as_str()))
            .json(data)
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not send transaction {id}: {error}"))?;

        let transaction = check_record_status(response)?
            .json::<Transaction>()
            .await
            .inspect_err(|error| tracing::error!("Could not decode transaction {id}: {error}"))?;

        Ok(transaction)
    }

    /// Delete the transaction `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if the API has no such
    /// transaction, or an API error if the request fails.
    pub async fn delete_transaction(&self, id: &RecordId) -> Result<(), Error> {
        let response = self
            .http
            .delete(self.record_url(TRANSACTIONS, id.as_str()))
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not delete transaction {id}: {error}"))?;

        check_record_status(response)?;

        Ok(())
    }
}
