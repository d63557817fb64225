//! The transactions page, optionally filtered to a single category.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error, MoneyTracker, RecordId, Transaction, User,
    api::ApiClient,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
};

/// Memos longer than this many characters are shortened in the table.
const MEMO_DISPLAY_LENGTH: usize = 40;

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub api: ApiClient,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The category the transactions are filtered by.
///
/// A missing or empty `category_id` shows every transaction.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilter {
    #[serde(default)]
    pub category_id: Option<RecordId>,
}

impl CategoryFilter {
    pub(super) fn category_id(&self) -> Option<&RecordId> {
        self.category_id.as_ref().filter(|id| !id.is_empty())
    }
}

/// Render the user's transactions, newest first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Extension(user): Extension<User>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Response, Error> {
    let tracker = MoneyTracker::load(state.api, user)
        .await
        .inspect_err(|error| tracing::error!("Could not load transactions: {error}"))?;

    Ok(transactions_view(&tracker, filter.category_id()).into_response())
}

/// The transactions shown for `category_id`, newest first.
fn filtered_transactions<'a>(
    tracker: &'a MoneyTracker,
    category_id: Option<&RecordId>,
) -> Vec<&'a Transaction> {
    let mut transactions = match category_id {
        Some(category_id) => tracker.transactions_by_category(category_id),
        None => tracker.transactions().iter().collect(),
    };

    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

    transactions
}

fn shorten_memo(memo: &str) -> String {
    let graphemes: Vec<&str> = memo.graphemes(true).collect();

    if graphemes.len() <= MEMO_DISPLAY_LENGTH {
        memo.to_owned()
    } else {
        format!("{}…", graphemes[..MEMO_DISPLAY_LENGTH].concat())
    }
}

/// The table of transactions that the delete endpoint swaps in after a
/// transaction is removed.
pub(super) fn transactions_table(tracker: &MoneyTracker, category_id: Option<&RecordId>) -> Markup {
    let transactions = filtered_transactions(tracker, category_id);
    let delete_query = category_id
        .map(|id| format!("?category_id={id}"))
        .unwrap_or_default();

    let table_row = |transaction: &Transaction| {
        let category_name = tracker
            .find_category(&transaction.category_id)
            .map(|category| category.name.to_string())
            .unwrap_or_else(|| "Unknown".to_owned());
        let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction.id);
        let delete_url = format!(
            "{}{delete_query}",
            format_endpoint(endpoints::TRANSACTION, &transaction.id)
        );
        let (sign, amount_style) = if transaction.is_income {
            ("+", "text-green-600 dark:text-green-400")
        } else {
            ("-", "text-red-600 dark:text-red-400")
        };

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (transaction.date) }
                td class=(TABLE_CELL_STYLE) { (category_name) }
                td class=(TABLE_CELL_STYLE) title=(transaction.memo) { (shorten_memo(&transaction.memo)) }
                td class={(TABLE_CELL_STYLE) " text-right " (amount_style)}
                {
                    (sign) (format_currency(transaction.amount))
                }
                td class={(TABLE_CELL_STYLE) " flex gap-4 justify-end"}
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm="Are you sure you want to delete this transaction?"
                        hx-target="#transactions-table"
                        hx-target-error="#alert-container"
                        hx-swap="outerHTML"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        )
    };

    html!(
        table
            id="transactions-table"
            class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Memo" }
                    th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                    th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                }
            }

            tbody
            {
                @for transaction in &transactions {
                    (table_row(transaction))
                }

                @if transactions.is_empty() {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td colspan="5" class={(TABLE_CELL_STYLE) " text-center"}
                        {
                            "No transactions yet."
                        }
                    }
                }
            }
        }
    )
}

fn category_filter_form(tracker: &MoneyTracker, category_id: Option<&RecordId>) -> Markup {
    html!(
        form method="get" action=(endpoints::TRANSACTIONS_VIEW) class="flex gap-2 items-center"
        {
            label for="category_id" class="text-sm" { "Category" }

            select
                id="category_id"
                name="category_id"
                onchange="this.form.submit()"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[category_id.is_none()] { "All" }

                @for category in tracker.categories() {
                    option
                        value=(category.id)
                        selected[category_id == Some(&category.id)]
                    {
                        (category.name)
                    }
                }
            }

            noscript
            {
                button type="submit" class=(LINK_STYLE) { "Filter" }
            }
        }
    )
}

fn transactions_view(tracker: &MoneyTracker, category_id: Option<&RecordId>) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW, &tracker.user().username).into_html();
    let heading = category_id
        .and_then(|id| tracker.find_category(id))
        .map(|category| format!("Transactions: {}", category.name))
        .unwrap_or_else(|| "Transactions".to_owned());

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-wrap justify-between items-center gap-4 w-full max-w-4xl mb-4"
            {
                h1 class="text-2xl font-bold" { (heading) }

                (category_filter_form(tracker, category_id))

                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE) { "Add Transaction" }
            }

            div class="w-full max-w-4xl overflow-x-auto"
            {
                (transactions_table(tracker, category_id))
            }
        }
    );

    base("Transactions", &content)
}
