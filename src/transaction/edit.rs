//! The edit transaction page and the endpoint that saves the changes.

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error, MoneyTracker, NewTransaction, RecordId, Transaction, User,
    api::ApiClient,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::form::{FormTarget, TransactionForm, TransactionFormDefaults, transaction_form},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub api: ApiClient,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Render the form for editing one of the user's transactions.
///
/// Responds with the 404 page if the user has no transaction with the ID.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<RecordId>,
) -> Result<Response, Error> {
    let tracker = MoneyTracker::load(state.api, user)
        .await
        .inspect_err(|error| tracing::error!("Could not load transactions: {error}"))?;

    let transaction = tracker
        .find_transaction(&transaction_id)
        .ok_or(Error::NotFound)?;

    Ok(edit_transaction_view(&tracker, transaction).into_response())
}

/// Replace a transaction with the submitted form.
///
/// Whether the transaction is income is decided by its category. On success
/// the client is redirected to the transactions page.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<RecordId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut tracker = match MoneyTracker::load(state.api, user).await {
        Ok(tracker) => tracker,
        Err(error) => {
            tracing::error!("Could not load transactions: {error}");
            return error.into_alert_response();
        }
    };

    if tracker.find_transaction(&transaction_id).is_none() {
        return Error::UpdateMissingTransaction.into_alert_response();
    }

    let Some(is_income) = tracker
        .find_category(&form.category_id)
        .map(|category| category.is_income)
    else {
        return Error::InvalidCategory(form.category_id).into_alert_response();
    };

    let data = NewTransaction {
        user_id: tracker.user().id.clone(),
        date: form.date,
        is_income,
        amount: form.amount,
        memo: form.memo,
        category_id: form.category_id,
    };

    match tracker.edit_transaction(&transaction_id, &data).await {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_transaction_view(tracker: &MoneyTracker, transaction: &Transaction) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION_VIEW, &tracker.user().username).into_html();
    let update_endpoint = format_endpoint(endpoints::TRANSACTION, &transaction.id);
    let defaults = TransactionFormDefaults {
        date: transaction.date,
        amount: Some(transaction.amount),
        memo: &transaction.memo,
        category_id: Some(&transaction.category_id),
    };
    let form = transaction_form(
        FormTarget::Update(&update_endpoint),
        &defaults,
        tracker.income_categories(),
        tracker.expense_categories(),
        "Save Changes",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Edit Transaction" }
            (form)
        }
    };

    base("Edit Transaction", &content)
}
