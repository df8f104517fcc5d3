//! Blocking anti-forgery token handling for rentry
use crate::errors::RentryError;
use crate::networking::RentryClient;
use log::{debug, warn};
use reqwest::cookie::{CookieStore, Jar};
use std::sync::PoisonError;
use url::Url;

/// Cookie the service stores its anti-forgery token in
pub const CSRF_COOKIE: &str = "csrftoken";
/// Form field the token is echoed back in
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";
/// Cookie lookups before giving up, one bootstrap request between each
pub const TOKEN_ATTEMPTS: usize = 2;

/// Value of the named cookie the jar would send to `url`
pub fn find_cookie(jar: &Jar, url: &Url, name: &str) -> Option<String> {
    let header = jar.cookies(url)?;
    let header = header.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Get the anti-forgery token for the client's session
///
/// Reads the token cookie and, if the session has none yet, requests the service root
/// once so the server sets it.
///
/// # Arguments
/// * `client` - session whose cookie store holds the token
///
/// # Returns
/// * The token, or a `ServiceError` if the server never set the cookie
///
/// # Example
/// ```no_run
/// use rentry_api::RentryClient;
/// use rentry_api::networking::get_token;
/// let client = RentryClient::new().unwrap();
/// let token = get_token(&client).unwrap();
/// ```
pub fn get_token(client: &RentryClient) -> Result<String, RentryError> {
    // lookup and bootstrap must not interleave between pastes sharing the session
    let _guard = client
        .token_lock()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    for attempt in 1..=TOKEN_ATTEMPTS {
        if let Some(token) = find_cookie(client.jar(), client.base_url(), CSRF_COOKIE) {
            return Ok(token);
        }
        if attempt < TOKEN_ATTEMPTS {
            debug!("No {} cookie yet, requesting the service root", CSRF_COOKIE);
            let response = client.get_page("")?;
            debug!("Token bootstrap answered {}", response.status());
        }
    }

    warn!(
        "{} never set the {} cookie after {} lookups",
        client.base_url(),
        CSRF_COOKIE,
        TOKEN_ATTEMPTS
    );
    Err(RentryError::ServiceError(format!(
        "The service did not provide the {CSRF_COOKIE} cookie"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie_among_others() {
        let jar = Jar::default();
        let url = Url::parse("https://rentry.co/").expect("url");
        jar.add_cookie_str("sessionid=s1; Path=/", &url);
        jar.add_cookie_str("csrftoken=tok123; Path=/", &url);

        assert_eq!(find_cookie(&jar, &url, CSRF_COOKIE), Some("tok123".to_string()));
        assert_eq!(find_cookie(&jar, &url, "sessionid"), Some("s1".to_string()));
        assert_eq!(find_cookie(&jar, &url, "missing"), None);
    }

    #[test]
    fn empty_jar_has_no_token() {
        let jar = Jar::default();
        let url = Url::parse("https://rentry.co/").expect("url");
        assert_eq!(find_cookie(&jar, &url, CSRF_COOKIE), None);
    }

    #[test]
    fn cookie_for_other_host_is_ignored() {
        let jar = Jar::default();
        let other = Url::parse("https://example.com/").expect("url");
        jar.add_cookie_str("csrftoken=elsewhere; Path=/", &other);

        let url = Url::parse("https://rentry.co/").expect("url");
        assert_eq!(find_cookie(&jar, &url, CSRF_COOKIE), None);
    }
}
