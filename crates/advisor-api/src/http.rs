use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use advisor_types::{ChatReply, ChatRequest, HandoffAck, HandoffRequest, IntakeResponse, Profile};

use crate::config::{ApiConfig, CHAT_PATH, HANDOFF_PATH, HEALTH_PATH, INTAKE_PATH};
use crate::envelope;
use crate::error::ApiError;
use crate::AdvisorApi;

/// Advisor backend client over reqwest
#[derive(Clone)]
pub struct HttpAdvisorClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl HttpAdvisorClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET `/health`; returns whatever status document the backend reports
    pub async fn health(&self) -> Result<Value, ApiError> {
        let url = self.config.endpoint(HEALTH_PATH);
        log::debug!("GET {}", url);

        let request = self.authorize(self.client.get(&url));
        let response = request.send().await.map_err(transport_error)?;
        self.read(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        log::debug!("POST {}", url);

        let request = self
            .authorize(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(body);
        let response = request.send().await.map_err(transport_error)?;
        self.read(response).await
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        log::debug!("HTTP {} ({} bytes)", status, body.len());

        let result = envelope::decode(status, &body);
        if let Err(e) = &result {
            log::warn!("advisor backend call failed: {}", e);
        }
        result
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network(format!("request timed out: {}", e))
    } else {
        ApiError::Network(e.to_string())
    }
}

#[async_trait(?Send)]
impl AdvisorApi for HttpAdvisorClient {
    async fn create_profile(&self, profile: &Profile) -> Result<IntakeResponse, ApiError> {
        self.post_json(INTAKE_PATH, profile).await
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.post_json(CHAT_PATH, request).await
    }

    async fn request_handoff(&self, request: &HandoffRequest) -> Result<HandoffAck, ApiError> {
        self.post_json(HANDOFF_PATH, request).await
    }
}
