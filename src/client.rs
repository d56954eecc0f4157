//! Checklist REST API Client
//!
//! HTTP client for the checklist backend. Every call is a single
//! request/response cycle: no retries, no caching, and any non-2xx status is
//! an error regardless of what the status means.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::models::{
    ApiEnvelope, Checklist, LoginData, LoginRequest, NewChecklistRequest, NewItemRequest,
    RegisterRequest,
};

/// Operations offered by the checklist backend
///
/// Authenticated calls take the bearer token explicitly; the caller decides
/// where it comes from.
#[async_trait]
pub trait ChecklistApi: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, request: &LoginRequest) -> Result<String, ClientError>;

    /// Create an account
    async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError>;

    /// Fetch every checklist owned by the token's user
    async fn list_checklists(&self, token: &str) -> Result<Vec<Checklist>, ClientError>;

    async fn create_checklist(&self, token: &str, name: &str) -> Result<(), ClientError>;

    async fn delete_checklist(&self, token: &str, checklist_id: &str) -> Result<(), ClientError>;

    async fn add_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_name: &str,
    ) -> Result<(), ClientError>;

    async fn delete_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> Result<(), ClientError>;

    /// Flip an item's completion flag
    async fn toggle_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> Result<(), ClientError>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Request timeout; `None` leaves the HTTP stack's default in place
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

/// reqwest-backed implementation of [`ChecklistApi`]
pub struct HttpChecklistClient {
    client: Client,
    base_url: String,
}

impl HttpChecklistClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Request)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn checklist_url(&self, checklist_id: &str) -> String {
        self.url(&format!("/checklist/{}", urlencoding::encode(checklist_id)))
    }

    fn item_url(&self, checklist_id: &str, item_id: &str) -> String {
        format!(
            "{}/item/{}",
            self.checklist_url(checklist_id),
            urlencoding::encode(item_id)
        )
    }

    /// Send a request, turning transport failures and non-2xx statuses into errors
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(ClientError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!("Backend answered {}: {}", status, message);
            Err(ClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let body = response.bytes().await.map_err(ClientError::from_transport)?;
        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }
}

#[async_trait]
impl ChecklistApi for HttpChecklistClient {
    async fn login(&self, request: &LoginRequest) -> Result<String, ClientError> {
        let response = self
            .send(self.client.post(self.url("/login")).json(request))
            .await?;

        let envelope: ApiEnvelope<LoginData> = Self::decode(response).await?;
        envelope.data.token.ok_or(ClientError::MissingToken)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        self.send(self.client.post(self.url("/register")).json(request))
            .await?;
        Ok(())
    }

    async fn list_checklists(&self, token: &str) -> Result<Vec<Checklist>, ClientError> {
        let response = self
            .send(self.client.get(self.url("/checklist")).bearer_auth(token))
            .await?;

        let envelope: ApiEnvelope<Vec<Checklist>> = Self::decode(response).await?;
        tracing::debug!("Fetched {} checklists", envelope.data.len());
        Ok(envelope.data)
    }

    async fn create_checklist(&self, token: &str, name: &str) -> Result<(), ClientError> {
        let body = NewChecklistRequest {
            name: name.to_string(),
        };
        self.send(
            self.client
                .post(self.url("/checklist"))
                .bearer_auth(token)
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn delete_checklist(&self, token: &str, checklist_id: &str) -> Result<(), ClientError> {
        self.send(
            self.client
                .delete(self.checklist_url(checklist_id))
                .bearer_auth(token),
        )
        .await?;
        Ok(())
    }

    async fn add_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_name: &str,
    ) -> Result<(), ClientError> {
        let body = NewItemRequest {
            item_name: item_name.to_string(),
        };
        self.send(
            self.client
                .post(format!("{}/item", self.checklist_url(checklist_id)))
                .bearer_auth(token)
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn delete_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> Result<(), ClientError> {
        self.send(
            self.client
                .delete(self.item_url(checklist_id, item_id))
                .bearer_auth(token),
        )
        .await?;
        Ok(())
    }

    async fn toggle_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> Result<(), ClientError> {
        self.send(
            self.client
                .put(self.item_url(checklist_id, item_id))
                .bearer_auth(token)
                .json(&serde_json::json!({})),
        )
        .await?;
        Ok(())
    }
}

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend unavailable: {0}")]
    Unavailable(reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Login response did not contain a token")]
    MissingToken,
}

impl ClientError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable(e)
        } else {
            ClientError::Request(e)
        }
    }

    /// HTTP status of a rejected request, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
