//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that HTMX swaps into the alert
//! container at the bottom of every page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// A success or error message, optionally with more details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    fn is_error(&self) -> bool {
        matches!(self, Alert::Error { .. } | Alert::ErrorSimple { .. })
    }

    fn message(&self) -> &str {
        match self {
            Alert::SuccessSimple { message }
            | Alert::Error { message, .. }
            | Alert::ErrorSimple { message } => message,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Alert::Error { details, .. } => Some(details),
            _ => None,
        }
    }

    pub fn into_markup(self) -> Markup {
        let container_style = if self.is_error() {
            "flex items-start p-4 mb-4 text-red-800 border border-red-300 rounded-lg \
            bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start p-4 mb-4 text-green-800 border border-green-300 rounded-lg \
            bg-green-50 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };
        let role = if self.is_error() { "alert" } else { "status" };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role=(role)
                {
                    div class="ms-3 text-sm font-medium"
                    {
                        p class="font-semibold" { (self.message()) }

                        @if let Some(details) = self.details() {
                            p { (details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex h-8 w-8"
                        aria-label="Close"
                        onclick="document.getElementById('alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    /// Render the alert with a status code other than 200 OK.
    ///
    /// HTMX only swaps error responses into the alert container when the
    /// request uses `hx-target-error`.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, self.into_html()).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
