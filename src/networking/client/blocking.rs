//! Blocking HTTP session for rentry

use crate::config::ClientConfig;
use crate::errors::RentryError;
use crate::extraction::parse_response_document;
use crate::paste::{Paste, PasteCredentials};
use log::{debug, trace};
use reqwest::blocking::{Client, Response};
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{StatusCode, redirect};
use scraper::Html;
use std::sync::{Arc, Mutex};
use url::Url;

/// Create a configured HTTP client for rentry operations
///
/// # Arguments
/// * `config` - user agent and timeout to apply
/// * `jar` - cookie store the anti-forgery token lands in
/// * `referer` - value of the Referer header sent with every request
///
/// # Example
/// ```no_run
/// use rentry_api::ClientConfig;
/// use rentry_api::networking::create_client;
/// use reqwest::cookie::Jar;
/// use std::sync::Arc;
///
/// let referer = url::Url::parse("https://rentry.co/").unwrap();
/// let client = create_client(&ClientConfig::default(), Arc::new(Jar::default()), &referer)
///     .expect("Failed to create client");
/// ```
pub fn create_client(
    config: &ClientConfig,
    jar: Arc<Jar>,
    referer: &Url,
) -> Result<Client, RentryError> {
    let mut headers = HeaderMap::new();
    headers.insert(REFERER, HeaderValue::from_str(referer.as_str())?);

    Ok(Client::builder()
        .redirect(redirect::Policy::limited(10))
        .cookie_provider(jar)
        .default_headers(headers)
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()?)
}

/// Parses a base address and makes sure relative paths join beneath it
pub(crate) fn normalize_base_url(base_url: &str) -> Result<Url, RentryError> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Debug)]
struct Session {
    http: Client,
    jar: Arc<Jar>,
    base_url: Url,
    token_lock: Mutex<()>,
}

/// Shared session every [`Paste`] talks through
///
/// Cloning is cheap and every clone shares the same connection pool and cookie store,
/// so the anti-forgery token is fetched once per session.
#[derive(Debug, Clone)]
pub struct RentryClient {
    session: Arc<Session>,
}

impl RentryClient {
    /// Session against `https://rentry.co`
    pub fn new() -> Result<Self, RentryError> {
        Self::from_config(ClientConfig::default())
    }

    /// Session against another instance of the service
    pub fn with_base_url(base_url: &str) -> Result<Self, RentryError> {
        Self::from_config(ClientConfig::default().with_base_url(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, RentryError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let referer = match &config.referer {
            Some(referer) => Url::parse(referer)?,
            None => base_url.clone(),
        };
        let jar = Arc::new(Jar::default());
        let http = create_client(&config, jar.clone(), &referer)?;
        debug!("Created rentry session for {}", base_url);

        Ok(RentryClient {
            session: Arc::new(Session {
                http,
                jar,
                base_url,
                token_lock: Mutex::new(()),
            }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.session.base_url
    }

    /// Creates a paste, letting the service generate whichever of `id`/`password` is `None`
    ///
    /// # Example
    /// ```no_run
    /// use rentry_api::RentryClient;
    /// let client = RentryClient::new().unwrap();
    /// let paste = client.create(Some("my-notes"), None, "# Notes").unwrap();
    /// println!("{paste}");
    /// ```
    pub fn create(
        &self,
        id: Option<&str>,
        password: Option<&str>,
        text: &str,
    ) -> Result<Paste, RentryError> {
        let mut paste = Paste::new(self);
        paste.set_id(id)?;
        paste.set_password(password)?;
        paste.create(text)?;
        Ok(paste)
    }

    /// Creates a paste with a random id and edit code
    pub fn create_random(&self, text: &str) -> Result<Paste, RentryError> {
        self.create(None, None, text)
    }

    /// Handle on an existing paste that can be read but not edited
    pub fn get(&self, id: &str) -> Result<Paste, RentryError> {
        let mut paste = Paste::new(self);
        paste.set_id(Some(id))?;
        Ok(paste)
    }

    /// Handle on an existing paste that can be read, edited and deleted
    pub fn get_with_password(&self, id: &str, password: &str) -> Result<Paste, RentryError> {
        let mut paste = self.get(id)?;
        paste.set_password(Some(password))?;
        Ok(paste)
    }

    /// Rebuilds a paste from credentials saved with [`Paste::credentials`]
    pub fn restore(&self, credentials: &PasteCredentials) -> Result<Paste, RentryError> {
        let mut paste = Paste::new(self);
        paste.set_id(credentials.id.as_deref())?;
        paste.set_password(credentials.password.as_deref())?;
        Ok(paste)
    }

    pub(crate) fn jar(&self) -> &Jar {
        &self.session.jar
    }

    pub(crate) fn token_lock(&self) -> &Mutex<()> {
        &self.session.token_lock
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, RentryError> {
        Ok(self.session.base_url.join(path)?)
    }

    /// GET a path relative to the base address
    pub(crate) fn get_page(&self, path: &str) -> Result<Response, RentryError> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);
        let response = self.session.http.get(url).send()?;
        trace!("{} -> {}", response.url(), response.status());
        Ok(response)
    }

    /// POST a form-encoded body to a path relative to the base address
    pub(crate) fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<Response, RentryError> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let response = self.session.http.post(url).form(form).send()?;
        trace!("{} -> {}", response.url(), response.status());
        Ok(response)
    }
}

/// Turns an unsuccessful status into a typed failure
///
/// 404 means the paste is absent; any other non-2xx keeps its status code.
pub(crate) fn check_status(response: Response) -> Result<Response, RentryError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(RentryError::NotFound),
        status => {
            debug!("Unexpected status {} from {}", status, response.url());
            Err(RentryError::UnexpectedStatus(status))
        }
    }
}

/// Checks the status, then parses the body and fails on any error list in it
///
/// # Returns
/// * The address the request ended up at after redirects, and the parsed page
pub(crate) fn read_document(response: Response) -> Result<(Url, Html), RentryError> {
    let response = check_status(response)?;
    let final_url = response.url().clone();
    let body = response.text()?;
    let document = parse_response_document(&body)?;
    Ok((final_url, document))
}
