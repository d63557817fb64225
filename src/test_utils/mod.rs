#![allow(missing_docs)]

pub(crate) mod fixtures;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod mock_api;

pub(crate) use fixtures::{seed_categories, test_user};
pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_submit_button, assert_hx_endpoint,
    must_get_form,
};
pub(crate) use html::{assert_valid_html, must_select_text, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_hx_redirect, get_header};
pub(crate) use mock_api::{MockApi, spawn_mock_api};
