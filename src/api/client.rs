use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::Credentials;

use super::error::ApiError;

pub const DEFAULT_API_URL: &str = "https://api.cloudflare.com/client/v4";

pub type ApiResult<T> = Result<T, ApiError>;

/// Response envelope wrapped around every Cloudflare v4 payload
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<EnvelopeMessage>,
    #[serde(default)]
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct EnvelopeMessage {
    #[serde(default)]
    code: u32,
    message: String,
}

impl Envelope {
    fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Authenticated gateway to the Cloudflare REST API.
///
/// Every request carries the `X-Auth-Email` / `X-Auth-Key` pair taken from the
/// credentials the client was built with, and every response is unwrapped to
/// its `result` field.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("cfdns/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: credentials.clone(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        self.call(Method::GET, path, query, None::<&()>).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.call(Method::DELETE, path, &[], None::<&()>).await
    }

    /// Issue one request and return the envelope's `result`
    pub async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, ?query, "Cloudflare API request");

        let mut request = self
            .client
            .request(method, &url)
            .header("X-Auth-Email", &self.credentials.identity)
            .header("X-Auth-Key", &self.credentials.secret);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(status = status.as_u16(), bytes = text.len(), "Cloudflare API response");

        if !status.is_success() {
            return Err(Self::status_error(status, &text));
        }

        let envelope: Envelope = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse Cloudflare response: {}", e))
        })?;

        if !envelope.success {
            return Err(ApiError::ProviderError(envelope.error_summary()));
        }

        serde_json::from_value(envelope.result).map_err(|e| {
            ApiError::InvalidResponse(format!("Unexpected result from {}: {}", path, e))
        })
    }

    fn status_error(status: StatusCode, body: &str) -> ApiError {
        let message = serde_json::from_str::<Envelope>(body)
            .ok()
            .map(|envelope| envelope.error_summary())
            .filter(|summary| !summary.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body.trim().to_string()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::AuthError(message),
            _ => ApiError::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}
