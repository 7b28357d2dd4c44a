use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

use advisor_api::{
    envelope, AdvisorApi, ApiConfig, ApiError, CHAT_PATH, HANDOFF_PATH, INTAKE_PATH,
};
use advisor_types::{ChatReply, ChatRequest, HandoffAck, HandoffRequest, IntakeResponse, Profile};

/// Advisor backend client over the browser's fetch
pub struct FetchAdvisorClient {
    config: ApiConfig,
}

impl FetchAdvisorClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        log::debug!("POST {}", url);

        let mut builder = Request::post(&url);
        if let Some(token) = &self.config.token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        let request = builder
            .json(body)
            .map_err(|e| ApiError::Decode(format!("failed to encode request: {}", e)))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        log::debug!("HTTP {} ({} bytes)", status, text.len());

        let result = envelope::decode(status, &text);
        if let Err(e) = &result {
            log::warn!("advisor backend call failed: {}", e);
        }
        result
    }
}

#[async_trait(?Send)]
impl AdvisorApi for FetchAdvisorClient {
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
