//! Utility functions for HTML processing and shared helpers

use crate::errors::RentryError;
use regex::Regex;
use scraper::Selector;

/// Creates a selector from provided string
///
/// Internal utility function for parsing CSS selectors.
#[inline(always)]
pub(crate) fn make_selector(
    selector: &str,
) -> Result<Selector, scraper::error::SelectorErrorKind<'_>> {
    Selector::parse(selector)
}

/// Macro to create a static LazyLock
#[macro_export]
macro_rules! make_static {
    ($expr:expr) => {{ LazyLock::new(|| $expr) }};
}

/// Macro to select raw text from HTML document, returning only the next element
#[macro_export]
macro_rules! select_raw_text_next {
    ($document:expr, $selector:expr) => {
        $document
            .select($selector)
            .next()
            .map(|elem| elem.text().collect::<String>().trim().to_string())
    };
}

pub(crate) fn safe_static_selector(
    selector: Option<Selector>,
    backup: &str,
) -> Result<Selector, RentryError> {
    selector.map(Ok).unwrap_or_else(|| {
        make_selector(backup)
            .map_err(|_| RentryError::SelectorError("Failed to create CSS selector".to_string()))
    })
}

pub(crate) fn safe_static_regex(regex: Option<Regex>, backup: &str) -> Result<Regex, RentryError> {
    regex.map(Ok).unwrap_or_else(|| {
        Regex::new(backup)
            .map_err(|_| RentryError::RegexError("Failed to compile regex".to_string()))
    })
}

#[macro_export]
macro_rules! define_selector {
    ($name:ident, $name_text:ident, $text:expr) => {
        static $name_text: &str = $text;

        static $name: LazyLock<Option<Selector>> = make_static!(make_selector($text).ok());
    };
}

#[macro_export]
macro_rules! define_regex {
    ($name:ident, $name_text:ident, $text:expr) => {
        static $name_text: &str = $text;

        static $name: LazyLock<std::option::Option<regex::Regex>> =
            make_static!({ Regex::new($text).ok() });
    };
}

/// Number of characters in a string, as the service counts them
#[inline(always)]
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
