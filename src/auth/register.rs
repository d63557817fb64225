//! The registration page and the endpoint that signs up a new user.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error, NewUser,
    api::ApiClient,
    auth::cookie::set_auth_cookie,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        link, loading_spinner, log_in_register, password_input,
    },
};

/// The state needed to register a user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The client used to create the user.
    pub api: ApiClient,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            api: state.api.clone(),
        }
    }
}

impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the registration form.
#[derive(Clone, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Default)]
struct RegisterFormErrors<'a> {
    username: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
    general: Option<&'a str>,
}

fn register_form(username: &str, errors: RegisterFormErrors<'_>) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    type="text"
                    name="username"
                    id="username"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(username)
                    required
                    autofocus;

                @if let Some(error_message) = errors.username {
                    p class=(FORM_ERROR_STYLE) { (error_message) }
                }
            }

            (password_input("password", "Password", 1, errors.password))
            (password_input("confirm_password", "Confirm Password", 1, errors.confirm_password))

            @if let Some(error_message) = errors.general {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Create account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Already have an account? "
                (link(endpoints::LOG_IN_VIEW, "Log in here"))
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let form = register_form("", RegisterFormErrors::default());
    let content = log_in_register("Create an account", &form);

    base("Register", &content).into_response()
}

/// Create a user with the REST API and log them in.
///
/// On success the client is redirected to the dashboard, otherwise the form is
/// returned with an error message next to the field that needs fixing.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let new_user = match NewUser::new(&form.username, &form.password) {
        Ok(new_user) => new_user,
        Err(error @ Error::EmptyUsername) => {
            let message = error.to_string();
            return register_form(
                &form.username,
                RegisterFormErrors {
                    username: Some(&message),
                    ..Default::default()
                },
            )
            .into_response();
        }
        Err(error) => {
            let message = error.to_string();
            return register_form(
                &form.username,
                RegisterFormErrors {
                    password: Some(&message),
                    ..Default::default()
                },
            )
            .into_response();
        }
    };

    if form.password != form.confirm_password {
        let message = Error::PasswordsDoNotMatch.to_string();
        return register_form(
            &form.username,
            RegisterFormErrors {
                confirm_password: Some(&message),
                ..Default::default()
            },
        )
        .into_response();
    }

    let user = match state.api.signup(&new_user).await {
        Ok(user) => user,
        Err(error @ Error::DuplicateUsername(_)) => {
            let message = error.to_string();
            return register_form(
                &form.username,
                RegisterFormErrors {
                    username: Some(&message),
                    ..Default::default()
                },
            )
            .into_response();
        }
        Err(error) => {
            tracing::error!("Could not register user: {error}");
            return register_form(
                &form.username,
                RegisterFormErrors {
                    general: Some("Could not create your account. Please try again later."),
                    ..Default::default()
                },
            )
            .into_response();
        }
    };

    match set_auth_cookie(jar, &user, state.cookie_duration) {
        Ok(jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error setting auth cookie for new user: {error}");
            (
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod register_page_tests {
    use axum::http::StatusCode;

    use crate::{
        auth::register::get_register_page,
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    #[tokio::test]
    async fn render_register_page() {
        let response = get_register_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::USERS, "hx-post");
        assert_form_input(&form, "username", "text");
        assert_form_input(&form, "password", "password");
        assert_form_input(&form, "confirm_password", "password");
        assert_form_submit_button(&form, "Create account");
    }
}

#[cfg(test)]
mod register_user_tests {
    use axum::{Form, extract::State, http::StatusCode, response::Response};
    use axum_extra::extract::PrivateCookieJar;
    use serde_json::json;
    use time::Duration;

    use crate::{
        app_state::create_cookie_key,
        auth::{
            DEFAULT_COOKIE_DURATION,
            register::{RegisterForm, RegistrationState, register_user},
        },
        endpoints,
        test_utils::{
            MockApi, assert_form_error_message, assert_hx_redirect, must_get_form,
            parse_html_fragment, spawn_mock_api,
        },
    };

    async fn register(api: &MockApi, username: &str, password: &str, confirm: &str) -> Response {
        register_with_cookie_duration(api, username, password, confirm, DEFAULT_COOKIE_DURATION)
            .await
    }

    async fn register_with_cookie_duration(
        api: &MockApi,
        username: &str,
        password: &str,
        confirm: &str,
        cookie_duration: Duration,
    ) -> Response {
        let state = RegistrationState {
            cookie_key: create_cookie_key("foobar"),
            cookie_duration,
            api: api.client(),
        };
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let form = RegisterForm {
            username: username.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        };

        register_user(State(state), jar, Form(form)).await
    }

    #[tokio::test]
    async fn register_creates_user_and_logs_in() {
        let api = spawn_mock_api().await;

        let response = register(&api, "bob", "secret", "secret").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        assert!(response.headers().get("set-cookie").is_some());
        assert_eq!(api.records("users")[0]["username"], "bob");
    }

    #[tokio::test]
    async fn register_redirects_to_log_in_when_cookie_cannot_be_set() {
        let api = spawn_mock_api().await;

        let response =
            register_with_cookie_duration(&api, "bob", "secret", "secret", Duration::MAX).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::LOG_IN_VIEW);
        assert!(response.headers().get("set-cookie").is_none());
        assert_eq!(api.records("users")[0]["username"], "bob");
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords() {
        let api = spawn_mock_api().await;

        let response = register(&api, "bob", "secret", "secrets").await;

        let html = parse_html_fragment(response).await;
        assert_form_error_message(&must_get_form(&html), "Passwords do not match");
        assert!(api.records("users").is_empty());
    }

    #[tokio::test]
    async fn register_rejects_empty_username() {
        let api = spawn_mock_api().await;

        let response = register(&api, "  ", "secret", "secret").await;

        let html = parse_html_fragment(response).await;
        assert_form_error_message(&must_get_form(&html), "Username cannot be empty");
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let api = spawn_mock_api().await;
        api.seed("users", json!({"username": "bob", "password": "x"}));

        let response = register(&api, "bob", "secret", "secret").await;

        let html = parse_html_fragment(response).await;
        assert_form_error_message(
            &must_get_form(&html),
            "the username \"bob\" is already taken",
        );
        assert_eq!(api.records("users").len(), 1);
    }
}
