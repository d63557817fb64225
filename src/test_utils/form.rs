use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_attribute = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_attribute, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {hx_attribute:?}"
    );
}

/// Assert that `form` has a required field called `name`.
///
/// `tag_or_type` is either an input type, e.g. "text", or "select".
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, tag_or_type: &str) {
    let selector = if tag_or_type == "select" {
        format!("select[name=\"{name}\"]")
    } else {
        format!("input[name=\"{name}\"][type=\"{tag_or_type}\"]")
    };

    let field = form
        .select(&Selector::parse(&selector).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No {tag_or_type} field found with name \"{name}\""));

    assert!(
        field.value().attr("required").is_some(),
        "want field with name {name} to have the required attribute but got none"
    );
}

#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_error_message: &str) {
    let error_message = form
        .select(&Selector::parse("p.form-error").unwrap())
        .next()
        .expect("No error message found")
        .text()
        .collect::<Vec<_>>()
        .join("");
    let got_error_message = error_message.trim();

    assert_eq!(want_error_message, got_error_message);
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button[type=\"submit\"]").unwrap())
        .next()
        .expect("No submit button found");

    let got_text = submit_button.text().collect::<Vec<_>>().join("");
    assert_eq!(text, got_text.trim());
}
