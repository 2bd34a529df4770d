//! HTTP client wrapper for the target API
//!
//! A network-level failure (connection refused, timeout) aborts the
//! scenario. An HTTP error status does not: it comes back inside
//! [`ApiResponse`] for the assertion layer to judge, because conflict and
//! not-found outcomes are expected results in several scenarios.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::config::HarnessConfig;
use crate::error::{E2eError, E2eResult};

/// Status code plus parsed JSON body of one API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Client for the StudioFlow REST API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_prefix: String,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new(config: &HarnessConfig) -> E2eResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_prefix: normalize_prefix(&config.api_prefix),
            bearer: None,
        })
    }

    /// Attach a bearer token to all subsequent requests.
    pub fn set_bearer(&mut self, token: impl Into<String>) {
        self.bearer = Some(token.into());
    }

    pub fn clear_bearer(&mut self) {
        self.bearer = None;
    }

    /// Absolute URL for a prefix-relative path such as `/clients/42`.
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.api_prefix.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}{}/{}", self.base_url, self.api_prefix, path)
        }
    }

    pub async fn get(&self, path: &str) -> E2eResult<ApiResponse> {
        let request = self.http.get(self.url(path));
        self.execute(Method::GET, path, request).await
    }

    pub async fn get_query(&self, path: &str, query: &[(&str, &str)]) -> E2eResult<ApiResponse> {
        let request = self.http.get(self.url(path)).query(query);
        self.execute(Method::GET, path, request).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> E2eResult<ApiResponse> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(Method::POST, path, request).await
    }

    /// POST with no body, for action endpoints like proposal acceptance.
    pub async fn post_empty(&self, path: &str) -> E2eResult<ApiResponse> {
        let request = self.http.post(self.url(path));
        self.execute(Method::POST, path, request).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> E2eResult<ApiResponse> {
        let request = self.http.put(self.url(path)).json(body);
        self.execute(Method::PUT, path, request).await
    }

    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> E2eResult<ApiResponse> {
        let request = self.http.patch(self.url(path)).json(body);
        self.execute(Method::PATCH, path, request).await
    }

    pub async fn delete(&self, path: &str) -> E2eResult<ApiResponse> {
        let request = self.http.delete(self.url(path));
        self.execute(Method::DELETE, path, request).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        mut request: RequestBuilder,
    ) -> E2eResult<ApiResponse> {
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| E2eError::InvalidBody {
                context: format!("{method} {path}"),
                detail: e.to_string(),
            })?
        };

        Ok(ApiResponse { status, body })
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn client_with(base_url: &str, api_prefix: &str) -> ApiClient {
        let config = HarnessConfig {
            base_url: base_url.to_string(),
            api_prefix: api_prefix.to_string(),
            ..Default::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test_case("http://localhost:3000", "/api", "/clients/42", "http://localhost:3000/api/clients/42"; "canonical form")]
    #[test_case("http://localhost:3000/", "api/", "clients", "http://localhost:3000/api/clients"; "stray slashes")]
    #[test_case("http://localhost:3000", "", "/dashboard", "http://localhost:3000/dashboard"; "bare paths without prefix")]
    #[test_case("http://localhost:3000", "/", "/search", "http://localhost:3000/search"; "slash-only prefix")]
    fn url_joining(base_url: &str, api_prefix: &str, path: &str, expected: &str) {
        assert_eq!(client_with(base_url, api_prefix).url(path), expected);
    }
}
