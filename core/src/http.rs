//! Wire-level request and response values exchanged with the todo server.
//!
//! `TodoClient` only ever produces `HttpRequest` and consumes `HttpResponse`;
//! sending them is up to whoever embeds the client (the integration tests use
//! `ureq`, a UI would use its own fetch layer). Paths are absolute URLs under
//! the client's base URL, bodies are JSON text, and `PATCH` appears only for
//! `/todos/{id}/complete`.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TodoClient::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `TodoClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
