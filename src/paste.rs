//! A single paste on the service and the operations on it

use crate::errors::{RentryError, ValidationKind};
use crate::extraction::{extract_edit_code, extract_id};
use crate::networking::auth::blocking::{CSRF_FIELD, get_token};
use crate::networking::client::blocking::{RentryClient, check_status, read_document};
use crate::validation::{validate_id, validate_paste, validate_password, validate_text};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Id and edit code of a paste, in a form that can be stored and restored later
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteCredentials {
    pub id: Option<String>,
    pub password: Option<String>,
}

/// Changes to apply with [`Paste::edit`], every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteEdit {
    pub id: Option<String>,
    pub password: Option<String>,
    pub text: Option<String>,
}

impl PasteEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A paste hosted on the service
///
/// Before [`create`](Paste::create) the id and edit code may be unset; the service
/// generates whichever is missing. After a successful [`delete`](Paste::delete) the
/// handle no longer points at anything and should be dropped.
///
/// # Example
/// ```no_run
/// use rentry_api::{Paste, PasteEdit, RentryClient};
///
/// let client = RentryClient::new().unwrap();
/// let mut paste = Paste::new(&client);
/// paste.create("first draft").unwrap();
/// paste.edit(PasteEdit::new().with_text("second draft")).unwrap();
/// assert_eq!(paste.text().unwrap(), "second draft");
/// paste.delete().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Paste {
    client: RentryClient,
    id: Option<String>,
    password: Option<String>,
}

impl Paste {
    /// Paste with no id or edit code yet
    pub fn new(client: &RentryClient) -> Self {
        Paste {
            client: client.clone(),
            id: None,
            password: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Sets the id, leaving the paste untouched if it is rejected
    pub fn set_id(&mut self, id: Option<&str>) -> Result<(), RentryError> {
        if let Some(id) = id {
            validate_id(id)?;
        }
        self.id = id.map(str::to_string);
        Ok(())
    }

    /// Sets the edit code, leaving the paste untouched if it is rejected
    pub fn set_password(&mut self, password: Option<&str>) -> Result<(), RentryError> {
        if let Some(password) = password {
            validate_password(password)?;
        }
        self.password = password.map(str::to_string);
        Ok(())
    }

    /// Address the paste is viewable at
    pub fn address(&self) -> Option<Url> {
        let id = self.id.as_deref()?;
        self.client.base_url().join(id).ok()
    }

    pub fn credentials(&self) -> PasteCredentials {
        PasteCredentials {
            id: self.id.clone(),
            password: self.password.clone(),
        }
    }

    fn require_id(&self) -> Result<&str, RentryError> {
        self.id.as_deref().ok_or_else(|| {
            RentryError::validation("id", ValidationKind::Missing, "the paste has no id")
        })
    }

    /// Creates the paste on the service with the given text
    ///
    /// Whichever of id and edit code is unset gets generated by the service and
    /// stored on the paste once the call succeeds.
    ///
    /// # Errors
    /// * `ValidationError` if the text exceeds 200,000 characters, before any request
    /// * `AlreadyExists` if another paste has the requested id
    /// * `ServiceError` for any other reported error, or if the generated values
    ///   cannot be read from the response
    pub fn create(&mut self, text: &str) -> Result<(), RentryError> {
        validate_text(text)?;
        let token = get_token(&self.client)?;

        let response = self.client.post_form(
            "",
            &[
                (CSRF_FIELD, token.as_str()),
                ("url", self.id.as_deref().unwrap_or_default()),
                ("edit_code", self.password.as_deref().unwrap_or_default()),
                ("text", text),
            ],
        )?;
        let (final_url, document) = read_document(response)?;

        let id = match &self.id {
            Some(id) => Some(id.clone()),
            None => extract_id(self.client.base_url(), &final_url),
        };
        let password = match &self.password {
            Some(password) => Some(password.clone()),
            None => extract_edit_code(&document)?,
        };
        let (Some(id), Some(password)) = (id, password) else {
            return Err(RentryError::ServiceError(
                "Cannot extract the paste id and/or password from the service's response"
                    .to_string(),
            ));
        };

        info!("Created paste {}", id);
        self.id = Some(id);
        self.password = Some(password);
        Ok(())
    }

    /// Text of the paste, exactly as stored
    pub fn text(&self) -> Result<String, RentryError> {
        let id = self.require_id()?;
        let response = check_status(self.client.get_page(&format!("{id}/raw"))?)?;
        Ok(response.text()?)
    }

    /// Whether the service answers with a success status for this paste
    ///
    /// Never fails: a missing id, any non-2xx status, or a transport error all count as
    /// not existing.
    pub fn exists(&self) -> bool {
        let Some(id) = self.id.as_deref() else {
            return false;
        };
        match self.client.get_page(&format!("{id}/raw")) {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Existence check for {} failed: {}", id, e);
                false
            }
        }
    }

    /// Changes the id, edit code and/or text of the paste
    ///
    /// The service clears the text if it is left out of an edit, so when
    /// `changes.text` is `None` the current text is fetched first and sent back.
    /// The new id and edit code are stored on the paste only after the service
    /// accepted them.
    ///
    /// # Errors
    /// * `ValidationError` for a rejected new id, edit code or text, before any request
    /// * `Unauthorized` if the current edit code is wrong or missing
    /// * `AlreadyExists` if the new id is taken
    pub fn edit(&mut self, changes: PasteEdit) -> Result<(), RentryError> {
        validate_paste(
            changes.id.as_deref(),
            changes.password.as_deref(),
            changes.text.as_deref(),
        )?;
        let current_id = self.require_id()?.to_string();
        let token = get_token(&self.client)?;

        let text = match changes.text {
            Some(text) => text,
            None => self.text()?,
        };

        let response = self.client.post_form(
            &format!("{current_id}/edit"),
            &[
                (CSRF_FIELD, token.as_str()),
                ("edit_code", self.password.as_deref().unwrap_or_default()),
                ("new_url", changes.id.as_deref().unwrap_or_default()),
                ("new_edit_code", changes.password.as_deref().unwrap_or_default()),
                ("text", text.as_str()),
            ],
        )?;
        read_document(response)?;

        if let Some(id) = changes.id {
            info!("Paste {} moved to {}", current_id, id);
            self.id = Some(id);
        }
        if let Some(password) = changes.password {
            self.password = Some(password);
        }
        Ok(())
    }

    /// Replaces the text, keeping the id and edit code
    pub fn edit_text(&mut self, text: &str) -> Result<(), RentryError> {
        self.edit(PasteEdit::new().with_text(text))
    }

    /// Deletes the paste from the service
    ///
    /// Without an edit code the service refuses, which surfaces as `Unauthorized`.
    pub fn delete(&self) -> Result<(), RentryError> {
        let id = self.require_id()?;
        let token = get_token(&self.client)?;

        let response = self.client.post_form(
            &format!("{id}/edit"),
            &[
                (CSRF_FIELD, token.as_str()),
                ("edit_code", self.password.as_deref().unwrap_or_default()),
                ("delete", "delete"),
            ],
        )?;
        read_document(response)?;
        info!("Deleted paste {}", id);
        Ok(())
    }
}

/// Formats as `Id=<id>;Password=<password>`
impl fmt::Display for Paste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id={};Password={}",
            self.id.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RentryClient {
        RentryClient::new().expect("client builds without network access")
    }

    #[test]
    fn rejected_id_leaves_paste_unchanged() {
        let mut paste = Paste::new(&client());
        paste.set_id(Some("good-id")).expect("valid id");

        let err = paste.set_id(Some("bad id")).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidFormat));
        assert_eq!(paste.id(), Some("good-id"));

        let err = paste.set_id(Some("x")).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::OutOfRange));
        assert_eq!(paste.id(), Some("good-id"));
    }

    #[test]
    fn rejected_password_leaves_paste_unchanged() {
        let mut paste = Paste::new(&client());
        let err = paste.set_password(Some(&"p".repeat(101))).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::OutOfRange));
        assert_eq!(paste.password(), None);
    }

    #[test]
    fn address_joins_base_and_id() {
        let mut paste = Paste::new(&client());
        assert_eq!(paste.address(), None);
        paste.set_id(Some("abc123")).expect("valid id");
        assert_eq!(
            paste.address().map(|url| url.to_string()),
            Some("https://rentry.co/abc123".to_string())
        );
    }

    #[test]
    fn display_shows_id_and_password() {
        let mut paste = Paste::new(&client());
        assert_eq!(paste.to_string(), "Id=;Password=");
        paste.set_id(Some("abc123")).expect("valid id");
        paste.set_password(Some("p4ssw0rd")).expect("valid password");
        assert_eq!(paste.to_string(), "Id=abc123;Password=p4ssw0rd");
    }

    #[test]
    fn operations_without_id_fail_locally() {
        let mut paste = Paste::new(&client());
        let missing = Some(ValidationKind::Missing);
        assert_eq!(paste.text().unwrap_err().validation_kind(), missing);
        assert_eq!(paste.delete().unwrap_err().validation_kind(), missing);
        assert_eq!(
            paste.edit(PasteEdit::new().with_text("x")).unwrap_err().validation_kind(),
            missing
        );
        assert!(!paste.exists());
    }

    #[test]
    fn oversized_text_fails_before_any_request() {
        let mut paste = Paste::new(&client());
        let text = "a".repeat(200_001);
        let err = paste.create(&text).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::OutOfRange));
        assert_eq!(paste.id(), None);
    }

    #[test]
    fn credentials_round_trip_through_json() {
        let credentials = PasteCredentials {
            id: Some("abc123".to_string()),
            password: Some("p4ssw0rd".to_string()),
        };
        let json = serde_json::to_string(&credentials).expect("serializes");
        let restored = client()
            .restore(&serde_json::from_str(&json).expect("deserializes"))
            .expect("valid credentials");
        assert_eq!(restored.credentials(), credentials);
    }
}
