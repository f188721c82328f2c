//! Plain-data HTTP request/response types.
//!
//! The client describes each round trip as data before executing it, so
//! request construction and response interpretation can be tested without a
//! network. `build_request` produces `HttpRequest` values; `handle_response`
//! consumes `HttpResponse` values. Callers that want to supply their own
//! transport can execute the request themselves and feed the response back.

/// HTTP method for a request. The MinuteDock surface only ever issues these
/// three verbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// An outgoing API request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL, query string included.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, already encoded with unset keys stripped.
    pub body: Option<String>,
}

/// A received API response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
