//! # advisor-api
//!
//! Client side of the advisor backend REST contract.
//!
//! - **`AdvisorApi`**: the seam the session controller talks to
//! - **Envelope handling**: one place that decides success vs failure for
//!   every response, shared by all transports
//! - **`HttpAdvisorClient`**: reqwest implementation (feature `http`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use advisor_api::{AdvisorApi, ApiConfig, HttpAdvisorClient};
//! use advisor_types::{ChatMessage, ChatRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HttpAdvisorClient::new(ApiConfig::new("http://localhost:8080/api/v1"))?;
//!     let reply = client
//!         .send_chat(&ChatRequest {
//!             profile_id: "profile_1".to_string(),
//!             message: "Which schools fit me?".to_string(),
//!             chat_history: vec![ChatMessage::user("Which schools fit me?")],
//!             language: None,
//!             user_role: None,
//!         })
//!         .await?;
//!     println!("{}", reply.response);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use advisor_types::{ChatReply, ChatRequest, HandoffAck, HandoffRequest, IntakeResponse, Profile};

pub mod config;
pub mod envelope;
pub mod error;
#[cfg(feature = "http")]
pub mod http;

pub use config::{ApiConfig, CHAT_PATH, HANDOFF_PATH, HEALTH_PATH, INTAKE_PATH};
pub use envelope::{decode, interpret};
pub use error::ApiError;
#[cfg(feature = "http")]
pub use http::HttpAdvisorClient;

/// Backend operations used by the session controller.
///
/// Every call is a single attempt: no retry, no cancellation. Futures are not
/// required to be `Send` so the browser transport can implement this too.
#[async_trait(?Send)]
pub trait AdvisorApi {
    /// POST `/intake`
    async fn create_profile(&self, profile: &Profile) -> Result<IntakeResponse, ApiError>;

    /// POST `/chat`
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;

    /// POST `/handoff`
    async fn request_handoff(&self, request: &HandoffRequest) -> Result<HandoffAck, ApiError>;
}
