//! # rentry-api
//!
//! A blocking client for the [rentry.co](https://rentry.co) paste service.
//!
//! Pastes are created, read, edited and deleted through a shared [`RentryClient`]
//! session, which keeps the anti-forgery cookie the service requires on every form
//! submission. Responses are HTML pages; errors the service reports in them come back
//! as typed [`RentryError`] variants.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rentry_api::{PasteEdit, RentryClient, RentryError};
//!
//! fn main() -> Result<(), RentryError> {
//!     let client = RentryClient::new()?;
//!
//!     // Random id and edit code
//!     let mut paste = client.create_random("Creating a paste with rentry-api")?;
//!     println!("Created {paste} at {:?}", paste.address());
//!
//!     paste.edit(PasteEdit::new().with_text("Updating a paste with rentry-api"))?;
//!     println!("Now reads: {}", paste.text()?);
//!
//!     paste.delete()
//! }
//! ```

pub mod config;
pub mod errors;
pub mod extraction;
pub mod networking;
pub mod paste;
mod utils;
pub mod validation;

pub use config::ClientConfig;
pub use errors::{RentryError, ValidationKind};
pub use networking::RentryClient;
pub use paste::{Paste, PasteCredentials, PasteEdit};
