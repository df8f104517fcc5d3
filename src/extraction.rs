//! # extraction
//!
//! Reads the HTML the service sends back after a create, edit or delete.
//!
//! A successful submission renders a page without an error list. A rejected one
//! renders the form again with an `.errorlist` element whose text says what went
//! wrong. After a create, the generated edit code sits in an `.edit-code` element
//! and the generated id is the last segment of the page address.
//!
//! ## Usage
//!
//! ```rust
//! use rentry_api::extraction::parse_response_document;
//! use rentry_api::RentryError;
//!
//! let html = r#"<ul class="errorlist"><li>Invalid edit code.</li></ul>"#;
//! assert!(matches!(parse_response_document(html), Err(RentryError::Unauthorized)));
//! ```
use crate::errors::RentryError;
use crate::utils::{make_selector, safe_static_selector};
use crate::{define_selector, make_static, select_raw_text_next};
use scraper::{Html, selector::Selector};
use std::sync::LazyLock;
use url::Url;

/// Error text the service shows when the edit code is wrong
pub const INVALID_EDIT_CODE: &str = "Invalid edit code.";
/// Error text the service shows when the requested id is taken
pub const URL_ALREADY_EXISTS: &str = "Entry with this url already exists.";

define_selector!(ERROR_LIST_SELECTOR, ERROR_LIST_SELECTOR_TEXT, ".errorlist");
define_selector!(EDIT_CODE_SELECTOR, EDIT_CODE_SELECTOR_TEXT, ".edit-code");

/// Maps the text of an error list onto a typed failure
pub fn classify_error(text: &str) -> RentryError {
    match text {
        INVALID_EDIT_CODE => RentryError::Unauthorized,
        URL_ALREADY_EXISTS => RentryError::AlreadyExists,
        other => RentryError::ServiceError(other.to_string()),
    }
}

/// Text of the first error list in the document, if it has any
pub fn extract_error(document: &Html) -> Result<Option<String>, RentryError> {
    let selector = safe_static_selector(ERROR_LIST_SELECTOR.clone(), ERROR_LIST_SELECTOR_TEXT)?;
    Ok(select_raw_text_next!(document, &selector).filter(|text| !text.is_empty()))
}

/// Edit code shown on the page after a create
pub fn extract_edit_code(document: &Html) -> Result<Option<String>, RentryError> {
    let selector = safe_static_selector(EDIT_CODE_SELECTOR.clone(), EDIT_CODE_SELECTOR_TEXT)?;
    Ok(select_raw_text_next!(document, &selector).filter(|text| !text.is_empty()))
}

/// Last non-empty path segment of the address a request ended up at, below `base`
///
/// Segments belonging to the base address itself never count as an id, so a create
/// that was not redirected yields `None`.
pub fn extract_id(base: &Url, url: &Url) -> Option<String> {
    let path = url.path();
    let relative = path.strip_prefix(base.path()).unwrap_or(path);
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_string)
}

/// Parses a response body and fails if it carries an error list
///
/// # Returns
/// * The parsed document when the service reported no error
pub fn parse_response_document(body: &str) -> Result<Html, RentryError> {
    let document = Html::parse_document(body);
    match extract_error(&document)? {
        Some(text) => Err(classify_error(&text)),
        None => Ok(document),
    }
}
