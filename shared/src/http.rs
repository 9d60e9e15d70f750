#[cfg(any(test, feature = "testing"))]
use std::cell::RefCell;
use std::fmt;
#[cfg(any(test, feature = "testing"))]
use std::rc::Rc;

use async_trait::async_trait;

#[cfg(any(test, feature = "testing"))]
use crate::error::ApiError;
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        HttpRequest {
            method,
            url: url.into(),
            headers: vec![],
            body: None,
        }
    }

    pub fn json_body(mut self, body: String) -> Self {
        self.headers
            .push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back whatever the server answered. Non-2xx
/// statuses are *not* errors at this level; only a missing response is.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

#[cfg(any(test, feature = "testing"))]
type Handler = dyn Fn(&HttpRequest) -> ApiResult<HttpResponse>;

/// In-memory transport that records every request and answers from a
/// handler closure. Clones share the same log.
#[cfg(any(test, feature = "testing"))]
#[derive(Clone)]
pub struct MemoryTransport {
    handler: Rc<Handler>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

#[cfg(any(test, feature = "testing"))]
impl MemoryTransport {
    pub fn new(handler: impl Fn(&HttpRequest) -> ApiResult<HttpResponse> + 'static) -> Self {
        MemoryTransport {
            handler: Rc::new(handler),
            requests: Rc::new(RefCell::new(vec![])),
        }
    }

    /// Answers every request with the same status and body.
    pub fn always(status: u16, body: &str) -> Self {
        let body = body.to_string();
        MemoryTransport::new(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    pub fn offline() -> Self {
        MemoryTransport::new(|_| Err(ApiError::Network("connection refused".to_string())))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[cfg(any(test, feature = "testing"))]
impl fmt::Debug for MemoryTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTransport")
            .field("requests", &self.requests.borrow().len())
            .finish()
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait(?Send)]
impl Transport for MemoryTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        (self.handler)(&request)
    }
}
