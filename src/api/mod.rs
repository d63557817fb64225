//! A typed client for the REST API that stores users, categories and transactions.
//!
//! The API follows the conventions of a JSON REST server: each resource is a
//! collection at `{base_url}/{resource}` that can be filtered with query
//! parameters, and single records live at `{base_url}/{resource}/{id}`.

mod categories;
mod transactions;
mod users;

use reqwest::{Response, StatusCode};

use crate::Error;

pub(crate) const USERS: &str = "users";
pub(crate) const CATEGORIES: &str = "categories";
pub(crate) const TRANSACTIONS: &str = "transactions";

/// A client for the money tracker REST API.
///
/// Cloning is cheap, clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`, e.g. "http://localhost:3000"
    /// or "https://example.com/api".
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client that sends requests with an existing `http` client.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The base URL all resource paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn record_url(&self, resource: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }
}

/// Map a response for a collection request to an error if the status is not 2xx.
fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        tracing::error!("API request to {} responded with {status}", response.url());
        Err(Error::ApiStatus(status))
    }
}

/// Like [check_status], but a 404 for a single record maps to [Error::NotFound].
fn check_record_status(response: Response) -> Result<Response, Error> {
    if response.status() == StatusCode::NOT_FOUND {
        tracing::warn!("API request to {} found no record", response.url());
        return Err(Error::NotFound);
    }

    check_status(response)
}
