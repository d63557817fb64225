//! Dashboard HTTP handler and page layout.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, Month, MoneyTracker, MonthlySummary, User,
    api::ApiClient,
    dashboard::{cards::summary_cards_view, tables::category_totals_table},
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::current_month,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub api: ApiClient,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Seoul".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The month to summarise, written as "YYYY-MM".
///
/// The current month is used when it is missing or empty.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    #[serde(default)]
    pub month: Option<String>,
}

impl MonthQuery {
    fn month(&self, local_timezone: &str) -> Result<Month, Error> {
        match self.month.as_deref().map(str::trim) {
            Some(month) if !month.is_empty() => month.parse(),
            _ => current_month(local_timezone),
        }
    }
}

/// Display the income and expenses of a month, by category.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user): Extension<User>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month = query.month(&state.local_timezone)?;
    let tracker = MoneyTracker::load(state.api, user)
        .await
        .inspect_err(|error| tracing::error!("Could not load dashboard data: {error}"))?;
    let summary = tracker.monthly_summary(month);

    Ok(dashboard_view(tracker.user(), &summary).into_response())
}

fn month_url(month: Month) -> String {
    format!("{}?month={month}", endpoints::DASHBOARD_VIEW)
}

fn month_navigation(month: Month) -> Markup {
    html! {
        div class="flex justify-between items-center w-full max-w-4xl mb-6"
        {
            @if let Some(previous) = month.previous() {
                a href=(month_url(previous)) class=(LINK_STYLE) rel="prev"
                {
                    "← " (previous.label())
                }
            } @else {
                span {}
            }

            h1 class="text-2xl font-bold" { (month.label()) }

            @if let Some(next) = month.next() {
                a href=(month_url(next)) class=(LINK_STYLE) rel="next"
                {
                    (next.label()) " →"
                }
            } @else {
                span {}
            }
        }
    }
}

fn dashboard_view(user: &User, summary: &MonthlySummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW, &user.username).into_html();
    let has_categories = !summary.income.is_empty() || !summary.expenses.is_empty();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (month_navigation(summary.month))
            (summary_cards_view(summary))

            @if has_categories {
                div class="grid grid-cols-1 md:grid-cols-2 gap-6 w-full max-w-4xl"
                {
                    (category_totals_table("Income", &summary.income, summary.total_income))
                    (category_totals_table("Expenses", &summary.expenses, summary.total_expense))
                }
            } @else {
                p class="text-gray-500 dark:text-gray-400"
                {
                    "Nothing to summarise yet. Start by "
                    a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE) { "adding a category" }
                    "."
                }
            }
        }
    };

    base("Dashboard", &content)
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use serde_json::json;

    use crate::{
        dashboard::handlers::{DashboardState, MonthQuery, get_dashboard_page},
        test_utils::{
            MockApi, assert_valid_html, must_select_text, parse_html_document, seed_categories,
            spawn_mock_api, test_user,
        },
    };

    async fn seeded_api() -> MockApi {
        let api = spawn_mock_api().await;
        seed_categories(&api);
        api.seed(
            "transactions",
            json!({"user_id": 1, "date": "2024-03-01", "is_income": true,
                   "amount": 100, "memo": "pay", "category_id": 1}),
        );
        api.seed(
            "transactions",
            json!({"user_id": 1, "date": "2024-03-02", "is_income": false,
                   "amount": "12.5", "memo": "lunch", "category_id": 2}),
        );
        api.seed(
            "transactions",
            json!({"user_id": 1, "date": "2024-04-02", "is_income": false,
                   "amount": 40, "memo": "next month", "category_id": 2}),
        );
        api
    }

    fn state(api: &MockApi) -> DashboardState {
        DashboardState {
            api: api.client(),
            local_timezone: "UTC".to_owned(),
        }
    }

    fn query(month: &str) -> Query<MonthQuery> {
        Query(MonthQuery {
            month: Some(month.to_owned()),
        })
    }

    #[tokio::test]
    async fn summarises_selected_month() {
        let api = seeded_api().await;

        let response = get_dashboard_page(State(state(&api)), Extension(test_user()), query("2024-03"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(must_select_text(&html, "h1"), ["March 2024"]);
        assert_eq!(
            must_select_text(&html, "[data-summary] dd"),
            ["$100.00", "$12.50", "$87.50"]
        );
        assert_eq!(
            must_select_text(&html, "tbody tr"),
            ["Salary $100.00", "Food $12.50"]
        );
    }

    #[tokio::test]
    async fn links_to_adjacent_months() {
        let api = seeded_api().await;

        let response = get_dashboard_page(State(state(&api)), Extension(test_user()), query("2024-01"))
            .await
            .into_response();

        let html = parse_html_document(response).await;
        let links: Vec<_> = html
            .select(&scraper::Selector::parse("a[rel]").unwrap())
            .map(|link| link.value().attr("href").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(
            links,
            ["/dashboard?month=2023-12", "/dashboard?month=2024-02"]
        );
    }

    #[tokio::test]
    async fn rejects_malformed_month() {
        let api = seeded_api().await;

        let response = get_dashboard_page(State(state(&api)), Extension(test_user()), query("March"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_month_with_out_of_range_year() {
        let api = seeded_api().await;

        let response =
            get_dashboard_page(State(state(&api)), Extension(test_user()), query("2147483647-12"))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn last_month_has_no_next_link() {
        let api = seeded_api().await;

        let response = get_dashboard_page(State(state(&api)), Extension(test_user()), query("9999-12"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        let rels: Vec<_> = html
            .select(&scraper::Selector::parse("a[rel]").unwrap())
            .map(|link| link.value().attr("rel").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(rels, ["prev"]);
    }

    #[tokio::test]
    async fn defaults_to_current_month() {
        let api = seeded_api().await;

        let response = get_dashboard_page(
            State(state(&api)),
            Extension(test_user()),
            Query(MonthQuery::default()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn shows_error_page_when_api_fails() {
        let api = spawn_mock_api().await;
        api.set_failing(true);

        let response = get_dashboard_page(State(state(&api)), Extension(test_user()), query("2024-03"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
