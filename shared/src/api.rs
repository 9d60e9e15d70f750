use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpRequest, HttpResponse, Method, Transport};

/// JSON client for the employee service. Paths are appended to the configured
/// base URL as-is, so they must start with `/`.
#[derive(Debug, Clone)]
pub struct RemoteClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> RemoteClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        RemoteClient { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let response = self.request(Method::Get, path, None).await?;
        decode(&response)
    }

    pub async fn post<R: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        let body = serde_json::to_string(body).map_err(ApiError::Serialize)?;
        let response = self.request(Method::Post, path, Some(body)).await?;
        decode(&response)
    }

    pub async fn patch<R: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        let body = serde_json::to_string(body).map_err(ApiError::Serialize)?;
        let response = self.request(Method::Patch, path, Some(body)).await?;
        decode(&response)
    }

    /// The response body is ignored.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request(Method::Delete, path, None).await?;
        Ok(())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ApiResult<HttpResponse> {
        let mut request = HttpRequest::new(method, self.config.url(path));
        if let Some(body) = body {
            request = request.json_body(body);
        }

        debug!(%method, url = %request.url, "sending request");
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, path, error = %err, "request got no response");
                return Err(err);
            }
        };

        if !response.is_success() {
            warn!(%method, path, status = response.status, "request rejected");
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}

// an empty body reads as JSON `null`
fn decode<R: DeserializeOwned>(response: &HttpResponse) -> ApiResult<R> {
    let text = response.body.trim();
    let text = if text.is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(ApiError::Decode)
}
