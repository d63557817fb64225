//! Where to send the user after they log in.
//!
//! When a protected page is requested without a valid cookie, the user is sent
//! to the log-in page with the page they wanted in a `redirect_url` query
//! parameter. Only local paths are accepted so the parameter cannot be used to
//! redirect users to another site.

use axum::{extract::Request, http::Uri};

use crate::endpoints;

/// Keep the path and query of `raw_url` if it is a local path other than the log-in page.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }

    local_path_and_query(&uri)
}

/// The log-in page URL that will return the user to where `request` was going.
///
/// Form endpoints under "/api" are not pages, so for those the page the user
/// was on is taken from the HTMX `HX-Current-URL` header.
pub fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let redirect_target = if request.uri().path().starts_with("/api") {
        redirect_target_from_hx_request(request)?
    } else {
        normalize_redirect_url(request.uri().path_and_query()?.as_str())?
    };

    build_log_in_redirect_url_from_target(&redirect_target)
}

/// The log-in page URL with `redirect_target` as the `redirect_url` query parameter.
pub(super) fn build_log_in_redirect_url_from_target(redirect_target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("redirect_url", redirect_target)]) {
        Ok(param) => Some(format!("{}?{}", endpoints::LOG_IN_VIEW, param)),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {redirect_target}: {error}");
            None
        }
    }
}

fn local_path_and_query(uri: &Uri) -> Option<String> {
    let path_and_query = uri.path_and_query()?.as_str();

    if !path_and_query.starts_with('/') || path_and_query.starts_with("//") {
        return None;
    }

    (uri.path() != endpoints::LOG_IN_VIEW).then(|| path_and_query.to_owned())
}

fn redirect_target_from_hx_request(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_hx_request = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"));

    if !is_hx_request {
        tracing::warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    else {
        tracing::warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    // HTMX sends the absolute URL of the current page, so only its path is used.
    let redirect_url = current_url
        .parse::<Uri>()
        .ok()
        .and_then(|uri| local_path_and_query(&uri));

    if redirect_url.is_none() {
        tracing::warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    redirect_url
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, extract::Request};

    use crate::endpoints;

    use super::{build_log_in_redirect_url, normalize_redirect_url};

    #[test]
    fn accepts_local_paths() {
        assert_eq!(
            normalize_redirect_url("/transactions?category_id=2"),
            Some("/transactions?category_id=2".to_owned())
        );
    }

    #[test]
    fn rejects_other_sites_and_log_in_page() {
        assert_eq!(normalize_redirect_url("https://example.com/"), None);
        assert_eq!(normalize_redirect_url("//example.com/"), None);
        assert_eq!(normalize_redirect_url(endpoints::LOG_IN_VIEW), None);
        assert_eq!(normalize_redirect_url("dashboard"), None);
    }

    #[test]
    fn page_request_redirects_back_to_page() {
        let request = Request::get("/dashboard?month=2024-03")
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            build_log_in_redirect_url(&request),
            Some("/log_in?redirect_url=%2Fdashboard%3Fmonth%3D2024-03".to_owned())
        );
    }

    #[test]
    fn hx_request_redirects_back_to_current_page() {
        let request = Request::post(endpoints::TRANSACTIONS_API)
            .header("hx-request", "true")
            .header("hx-current-url", "http://localhost:8080/transactions/new")
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            build_log_in_redirect_url(&request),
            Some("/log_in?redirect_url=%2Ftransactions%2Fnew".to_owned())
        );
    }

    #[test]
    fn api_request_without_htmx_headers_has_no_target() {
        let request = Request::post(endpoints::TRANSACTIONS_API)
            .body(Body::empty())
            .unwrap();

        assert_eq!(build_log_in_redirect_url(&request), None);
    }
}
