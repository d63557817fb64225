//! The endpoint that deletes a transaction.

use axum::{
    Extension,
    extract::{FromRef, Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, Error, MoneyTracker, RecordId, User,
    alert::Alert,
    api::ApiClient,
    transaction::list::{CategoryFilter, transactions_table},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub api: ApiClient,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Responds with the refreshed transactions table, filtered by the same
/// category as the page it was deleted from, and a success alert.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<RecordId>,
    Query(filter): Query<CategoryFilter>,
) -> Response {
    let mut tracker = match MoneyTracker::load(state.api, user).await {
        Ok(tracker) => tracker,
        Err(error) => {
            tracing::error!("Could not load transactions: {error}");
            return error.into_alert_response();
        }
    };

    if tracker.find_transaction(&transaction_id).is_none() {
        return Error::DeleteMissingTransaction.into_alert_response();
    }

    if let Err(error) = tracker.delete_transaction(&transaction_id).await {
        tracing::error!("Could not delete transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    let alert = Alert::SuccessSimple {
        message: "Transaction deleted".to_owned(),
    };

    // The status code has to be 200 OK or HTMX will not swap in the table.
    Html(
        html! {
            (transactions_table(&tracker, filter.category_id()))
            (alert.into_markup())
        }
        .into_string(),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use serde_json::json;

    use crate::{
        RecordId,
        test_utils::{
            MockApi, must_select_text, parse_html_fragment, seed_categories, spawn_mock_api,
            test_user,
        },
        transaction::{
            delete::{DeleteTransactionState, delete_transaction_endpoint},
            list::CategoryFilter,
        },
    };

    async fn seeded_api() -> (MockApi, RecordId) {
        let api = spawn_mock_api().await;
        seed_categories(&api);
        let id = api.seed(
            "transactions",
            json!({"user_id": 1, "date": "2024-03-02", "is_income": false,
                   "amount": 12.5, "memo": "lunch", "category_id": 2}),
        );
        api.seed(
            "transactions",
            json!({"user_id": 1, "date": "2024-03-01", "is_income": true,
                   "amount": 1000, "memo": "pay", "category_id": 1}),
        );
        (api, id)
    }

    #[tokio::test]
    async fn deletes_and_returns_refreshed_table() {
        let (api, id) = seeded_api().await;
        let state = DeleteTransactionState { api: api.client() };

        let response = delete_transaction_endpoint(
            State(state),
            Extension(test_user()),
            Path(id),
            Query(CategoryFilter::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            must_select_text(&html, "#transactions-table tbody td:nth-child(3)"),
            ["pay"]
        );
        assert_eq!(
            must_select_text(&html, "div[role=status] p"),
            ["Transaction deleted"]
        );
        assert_eq!(api.records("transactions").len(), 1);
    }

    #[tokio::test]
    async fn keeps_category_filter() {
        let (api, id) = seeded_api().await;
        let state = DeleteTransactionState { api: api.client() };

        let response = delete_transaction_endpoint(
            State(state),
            Extension(test_user()),
            Path(id),
            Query(CategoryFilter {
                category_id: Some(RecordId::from(2)),
            }),
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(
            must_select_text(&html, "#transactions-table tbody td"),
            ["No transactions yet."]
        );
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let (api, _) = seeded_api().await;
        let state = DeleteTransactionState { api: api.client() };

        let response = delete_transaction_endpoint(
            State(state),
            Extension(test_user()),
            Path(RecordId::from(99)),
            Query(CategoryFilter::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(api.records("transactions").len(), 2);
    }
}
