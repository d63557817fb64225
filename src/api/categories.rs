//! Fetching and creating categories.

use crate::{
    Category, Error, NewCategory, RecordId,
    api::{ApiClient, CATEGORIES, check_status},
};

impl ApiClient {
    /// Get all categories owned by `user_id`, in the order the API returns them.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails.
    pub async fn get_categories(&self, user_id: &RecordId) -> Result<Vec<Category>, Error> {
        let response = self
            .http
            .get(self.collection_url(CATEGORIES))
            .query(&[("user_id", user_id.as_str())])
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not request categories: {error}"))?;

        let categories = check_status(response)?
            .json::<Vec<Category>>()
            .await
            .inspect_err(|error| tracing::error!("Could not decode categories: {error}"))?;

        Ok(categories)
    }

    /// Create a category and return the record the API created.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails.
    pub async fn create_category(&self, new_category: &NewCategory) -> Result<Category, Error> {
        let response = self
            .http
            .post(self.collection_url(CATEGORIES))
            .json(new_category)
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not send new category: {error}"))?;

        let category = check_status(response)?
            .json::<Category>()
            .await
            .inspect_err(|error| tracing::error!("Could not decode new category: {error}"))?;

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        CategoryName, NewCategory, RecordId,
        test_utils::spawn_mock_api,
    };

    #[tokio::test]
    async fn get_categories_only_returns_users_categories() {
        let api = spawn_mock_api().await;
        api.seed(
            "categories",
            json!({"name": "Salary", "is_income": true, "user_id": 1, "transaction_ids": []}),
        );
        api.seed(
            "categories",
            json!({"name": "Food", "is_income": false, "user_id": 1, "transaction_ids": []}),
        );
        api.seed(
            "categories",
            json!({"name": "Other user", "is_income": false, "user_id": 2, "transaction_ids": []}),
        );

        let categories = api
            .client()
            .get_categories(&RecordId::from(1))
            .await
            .unwrap();

        let names: Vec<_> = categories.iter().map(|c| c.name.to_string()).collect();
        assert_eq!(names, ["Salary", "Food"]);
    }

    #[tokio::test]
    async fn create_category_returns_created_record() {
        let api = spawn_mock_api().await;
        let body = NewCategory::new(CategoryName::new_unchecked("Rent"), false, RecordId::from(1));

        let category = api.client().create_category(&body).await.unwrap();

        assert_eq!(category.id, RecordId::from(1));
        assert_eq!(category.name, CategoryName::new_unchecked("Rent"));
        assert!(!category.is_income);
        assert_eq!(category.user_id, RecordId::from(1));
        assert_eq!(api.records("categories")[0]["transaction_ids"], json!([]));
    }
}
