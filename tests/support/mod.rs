//! Shared helpers for the mock-service integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TOKEN: &str = "tok123";

/// Runs blocking client code off the async runtime.
///
/// The blocking client must be created and dropped inside the closure.
pub async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking test body panicked")
}

pub fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

/// Mock service whose root sets the anti-forgery cookie.
pub async fn start_service() -> MockServer {
    init_logging();
    let server = MockServer::start().await;
    mount_token(&server).await;
    server
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("csrftoken={TOKEN}; Path=/").as_str())
                .set_body_string("<html><body><form></form></body></html>"),
        )
        .mount(server)
        .await;
}

pub fn page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(format!("<html><body>{body}</body></html>"))
}

pub fn error_page(message: &str) -> ResponseTemplate {
    page(&format!(
        r#"<form method="post"><ul class="errorlist"><li>{message}</li></ul></form>"#
    ))
}

/// Form fields of a url-encoded request body.
pub fn form_fields(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

/// Requests the server received for a method and path, in order.
pub async fn requests_to(server: &MockServer, verb: &str, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .into_iter()
        .filter(|request| request.method.as_str() == verb && request.url.path() == route)
        .collect()
}
