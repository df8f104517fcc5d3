//! # networking
//!
//! Session and transport helpers for talking to rentry.
//!
//! This module provides:
//! - HTTP client configuration with cookie support
//! - The shared [`RentryClient`] session every paste goes through
//! - Anti-forgery token lookup and bootstrap
//!
//! ## Usage - Blocking (default)
//!
//! ```no_run
//! use rentry_api::networking::{RentryClient, get_token};
//!
//! // Create a session
//! let client = RentryClient::new().expect("Failed to create client");
//!
//! // Make sure the session holds an anti-forgery token
//! let token = get_token(&client).expect("Failed to get token");
//! ```

// Module declarations
pub mod auth;
pub mod client;

// Re-export commonly used items for convenience
pub use auth::blocking::{CSRF_COOKIE, CSRF_FIELD, find_cookie, get_token};
pub use client::blocking::{RentryClient, create_client};

// Re-export types from dependencies for convenience
pub use reqwest::Error as NetworkError;
