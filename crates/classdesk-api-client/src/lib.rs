//! HTTP clients for Classdesk.
//!
//! [`ApiClient`] talks to the classroom backend with the signed-in user's
//! bearer token and decodes every response into an explicit type.
//! [`MediaHostClient`] uploads approved files to the media host.

pub mod api;
pub mod error;
pub mod media_host;
pub mod session;

use classdesk_core::ClientConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use error::ApiError;
pub use media_host::MediaHostClient;
pub use session::{Identity, Role, SessionService};

/// HTTP client for the classroom backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_prefix: String,
    session: SessionService,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: SessionService) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.backend.api_url.trim_end_matches('/').to_string(),
            api_prefix: config.api_prefix(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionService {
        &self.session
    }

    /// Full URL for a path below the API prefix (e.g. "/classrooms/c1").
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let identity = self.session.current().ok_or(ApiError::Unauthenticated)?;
        Ok(request.header("Authorization", format!("Bearer {}", identity.token)))
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.apply_auth(self.client.get(self.build_url(path)))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    /// PUT JSON body and deserialize response.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.apply_auth(self.client.put(self.build_url(path)).json(body))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }
}

/// Error body shapes the backend uses.
#[derive(serde::Deserialize)]
struct BackendErrorBody {
    #[serde(alias = "error")]
    message: String,
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<BackendErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    body.clone()
                }
            });
        tracing::warn!(status = status.as_u16(), message = %message, "Backend request failed");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

// Re-export domain response types for convenience.
pub use api::{MaterialResponse, SubmittedAttachment, UserProfile};
pub use classdesk_core::models::{AttachmentRecord, AttachmentResponse};
