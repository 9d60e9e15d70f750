use async_trait::async_trait;
use seed::browser::fetch::{self, Header, Request};
use shared::{ApiError, ApiResult, HttpRequest, HttpResponse, Method, Transport};

/// Browser transport on top of seed's fetch. Any status is handed back as a
/// response; only a failed fetch is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedTransport;

fn fetch_method(method: Method) -> fetch::Method {
    match method {
        Method::Get => fetch::Method::Get,
        Method::Post => fetch::Method::Post,
        Method::Patch => fetch::Method::Patch,
        Method::Delete => fetch::Method::Delete,
    }
}

#[async_trait(?Send)]
impl Transport for SeedTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut fetch_request = Request::new(url).method(fetch_method(method));
        if let Some(body) = body {
            fetch_request = fetch_request.text(body);
        }
        // after `text`, so our Content-Type replaces its text/plain one
        for (name, value) in headers {
            fetch_request = fetch_request.header(Header::custom(name, value));
        }

        let response = fetch_request
            .fetch()
            .await
            .map_err(|err| ApiError::Network(format!("{:?}", err)))?;
        let status = response.status().code;
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Network(format!("{:?}", err)))?;

        Ok(HttpResponse::new(status, body))
    }
}
