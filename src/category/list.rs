//! Categories listing page.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, CategorySummary, Error, Month, MoneyTracker, User,
    api::ApiClient,
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    timezone::current_month,
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub api: ApiClient,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Seoul".
    pub local_timezone: String,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the user's income and expense categories with this month's totals.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
    Extension(user): Extension<User>,
) -> Result<Response, Error> {
    let month = current_month(&state.local_timezone)?;
    let tracker = MoneyTracker::load(state.api, user)
        .await
        .inspect_err(|error| tracing::error!("Could not load categories: {error}"))?;
    let summary = tracker.monthly_summary(month);

    Ok(categories_view(
        tracker.user(),
        month,
        &summary.income,
        &summary.expenses,
    )
    .into_response())
}

fn category_table(title: &str, month: Month, categories: &[CategorySummary]) -> Markup {
    let table_row = |category: &CategorySummary| {
        let transactions_url = format!(
            "{}?category_id={}",
            endpoints::TRANSACTIONS_VIEW,
            category.id
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    a href=(transactions_url) class=(LINK_STYLE) { (category.name) }
                }

                td class={(TABLE_CELL_STYLE) " text-right"}
                {
                    (format_currency(category.total))
                }
            }
        )
    };

    html!(
        section class="w-full max-w-2xl mb-8"
        {
            h2 class="text-xl font-semibold mb-2" { (title) }

            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { (month.label()) }
                    }
                }

                tbody
                {
                    @for category in categories {
                        (table_row(category))
                    }

                    @if categories.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="2" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No categories yet."
                            }
                        }
                    }
                }
            }
        }
    )
}

fn categories_view(
    user: &User,
    month: Month,
    income: &[CategorySummary],
    expenses: &[CategorySummary],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW, &user.username).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex justify-between items-center w-full max-w-2xl mb-4"
            {
                h1 class="text-2xl font-bold" { "Categories" }

                a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE) { "Add Category" }
            }

            (category_table("Income", month, income))
            (category_table("Expenses", month, expenses))
        }
    );

    base("Categories", &content)
}
