//! The new transaction page and the endpoint that creates transactions.

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, MoneyTracker, User,
    api::ApiClient,
    endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::form::{FormTarget, TransactionForm, TransactionFormDefaults, transaction_form},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub api: ApiClient,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Seoul".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the page for recording a new transaction, dated today.
pub async fn get_new_transaction_page(
    State(state): State<CreateTransactionState>,
    Extension(user): Extension<User>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;
    let today = time::OffsetDateTime::now_utc().to_offset(local_offset).date();

    let mut tracker = MoneyTracker::new(state.api, user);
    tracker
        .fetch_categories()
        .await
        .inspect_err(|error| tracing::error!("Could not load categories: {error}"))?;

    Ok(new_transaction_view(&tracker, today).into_response())
}

/// Create a transaction from the submitted form.
///
/// Whether the transaction is income is decided by its category. On success
/// the client is redirected to the transactions page.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user): Extension<User>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut tracker = MoneyTracker::new(state.api, user);

    if let Err(error) = tracker.fetch_categories().await {
        tracing::error!("Could not load categories: {error}");
        return error.into_alert_response();
    }

    let Some(is_income) = tracker
        .find_category(&form.category_id)
        .map(|category| category.is_income)
    else {
        return Error::InvalidCategory(form.category_id).into_alert_response();
    };

    match tracker
        .add_transaction(
            form.date,
            is_income,
            form.amount,
            &form.memo,
            form.category_id,
        )
        .await
    {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}

fn new_transaction_view(tracker: &MoneyTracker, today: Date) -> Markup {
    let nav_bar =
        NavBar::new(endpoints::NEW_TRANSACTION_VIEW, &tracker.user().username).into_html();
    let defaults = TransactionFormDefaults {
        date: today,
        amount: None,
        memo: "",
        category_id: None,
    };
    let form = transaction_form(
        FormTarget::Create(endpoints::TRANSACTIONS_API),
        &defaults,
        tracker.income_categories(),
        tracker.expense_categories(),
        "Create Transaction",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "New Transaction" }

            @if tracker.categories().is_empty() {
                p class="mb-4 text-sm text-gray-500 dark:text-gray-400"
                {
                    "You need a category before you can record a transaction. "
                    a href=(endpoints::NEW_CATEGORY_VIEW) class="underline" { "Add a category" }
                }
            }

            (form)
        }
    };

    base("New Transaction", &content)
}
