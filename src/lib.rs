//! Money Tracker is a web app for tracking monthly income and expenses.
//!
//! Users, categories and transactions are stored by an external REST API.
//! This library talks to that API, keeps a per-request copy of the logged-in
//! user's data, and serves HTML pages with monthly summaries derived from it.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod auth;
mod category;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod month;
mod navigation;
mod not_found;
mod record_id;
mod routing;
mod store;
mod timezone;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use api::ApiClient;
pub use app_state::AppState;
pub use category::{Category, CategoryName, NewCategory};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::Month;
pub use record_id::RecordId;
pub use routing::build_router;
pub use store::{CategorySummary, CategorySums, MonthlySummary, MoneyTracker};
pub use transaction::{NewTransaction, Transaction};
pub use user::{NewUser, User};

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    not_found::NotFoundPage,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The auth token has expired or could not be read.
    #[error("the auth token is invalid or has expired")]
    InvalidToken,

    /// An empty string was used as a username.
    #[error("Username cannot be empty")]
    EmptyUsername,

    /// An empty string was used as a password.
    #[error("Password cannot be empty")]
    EmptyPassword,

    /// The password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordsDoNotMatch,

    /// Another user has already registered the username.
    #[error("the username \"{0}\" is already taken")]
    DuplicateUsername(String),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// A transaction amount was negative, infinite or not a number.
    ///
    /// Whether money comes in or goes out is given by the category, so
    /// amounts are always non-negative.
    #[error("{0} is not a valid amount, amounts must be zero or more")]
    InvalidAmount(f64),

    /// The category ID used for a transaction does not refer to one of the
    /// user's categories.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(crate::RecordId),

    /// A month query parameter was not of the form "YYYY-MM".
    #[error("invalid month \"{0}\", expected a month like 2024-03")]
    InvalidMonth(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error occurs when the REST API responds with 404 Not
    /// Found to a request for a single record.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The REST API responded with an unexpected status code.
    #[error("the API responded with status {0}")]
    ApiStatus(reqwest::StatusCode),

    /// The request to the REST API could not be sent or its response could
    /// not be decoded.
    #[error("could not complete the API request: {0}")]
    ApiRequest(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// A date-time could not be formatted.
    #[error("could not format date-time: {0}")]
    DateTimeFormatError(String),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that does not exist")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that does not exist")]
    DeleteMissingTransaction,
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(StatusCode::NOT_FOUND) => Error::NotFound,
            Some(status) => Error::ApiStatus(status),
            None => Error::ApiRequest(value.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundPage.into_response(),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view(
                        "Bad Request",
                        "400",
                        "Invalid Month",
                        &format!(
                            "\"{month}\" is not a valid month. Months are written like 2024-03."
                        ),
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::ApiStatus(_) | Error::ApiRequest(_) => InternalServerError {
                description: "Could Not Reach Your Data",
                fix: "The money tracker API did not respond as expected. Try again later.",
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => Alert::Error {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            Error::InvalidAmount(amount) => Alert::Error {
                message: "Invalid amount".to_owned(),
                details: format!("{amount} is not a valid amount. Enter an amount of zero or more."),
            }
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidCategory(category_id) => Alert::Error {
                message: "Invalid category".to_owned(),
                details: format!("Could not find a category with the ID {category_id}."),
            }
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::EmptyCategoryName => Alert::ErrorSimple {
                message: "Category name cannot be empty".to_owned(),
            }
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::UpdateMissingTransaction => Alert::Error {
                message: "Could not update transaction".to_owned(),
                details: "The transaction could not be found.".to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::DeleteMissingTransaction => Alert::Error {
                message: "Could not delete transaction".to_owned(),
                details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::ApiStatus(_) | Error::ApiRequest(_) => Alert::Error {
                message: "Could not save your changes".to_owned(),
                details: "The money tracker API did not respond as expected. Try again later."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::BAD_GATEWAY),
            _ => Alert::Error {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
