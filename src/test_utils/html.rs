use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

async fn response_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&response_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// The whitespace-normalized text of every element matching `selector`.
#[track_caller]
pub(crate) fn must_select_text(html: &Html, selector: &str) -> Vec<String> {
    let parsed_selector = Selector::parse(selector)
        .unwrap_or_else(|error| panic!("invalid selector {selector:?}: {error:?}"));

    html.select(&parsed_selector)
        .map(|element| {
            element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
