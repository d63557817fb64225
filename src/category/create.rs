//! Category creation page and endpoint.

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, MoneyTracker, User,
    api::ApiClient,
    category::{CategoryName, domain::CategoryFormData},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub api: ApiClient,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Render the category creation page.
pub async fn get_new_category_page(Extension(user): Extension<User>) -> Response {
    new_category_view(&user).into_response()
}

/// Handle category creation form submission.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Extension(user): Extension<User>,
    Form(new_category): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&new_category.name) {
        Ok(name) => name,
        Err(error) => {
            return new_category_form_view(&format!("Error: {error}")).into_response();
        }
    };

    let mut tracker = MoneyTracker::new(state.api, user);

    match tracker
        .add_category(name, new_category.kind.is_income())
        .await
    {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_alert_response()
        }
    }
}

fn new_category_view(user: &User) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW, &user.username).into_html();
    let form = new_category_form_view("");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Category", &content)
}

fn new_category_form_view(error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::CATEGORIES_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Category Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Category Name"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            fieldset class="flex gap-6"
            {
                legend class=(FORM_LABEL_STYLE) { "Kind" }

                label class="flex items-center gap-2"
                {
                    input
                        type="radio"
                        name="kind"
                        value="expense"
                        checked
                        required
                        class=(FORM_RADIO_INPUT_STYLE);
                    "Expense"
                }

                label class="flex items-center gap-2"
                {
                    input
                        type="radio"
                        name="kind"
                        value="income"
                        required
                        class=(FORM_RADIO_INPUT_STYLE);
                    "Income"
                }
            }

            @if !error_message.is_empty() {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
        }
    }
}
