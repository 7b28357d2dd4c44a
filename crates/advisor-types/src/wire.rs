use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::i18n::{Language, UserRole};
use crate::message::ChatMessage;

/// Payload of a successful `/intake` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeResponse {
    pub profile_id: String,
}

/// Body of a `/chat` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub profile_id: String,
    pub message: String,
    pub chat_history: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_role: Option<UserRole>,
}

/// Payload of a successful `/chat` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(alias = "reply")]
    pub response: String,
}

/// Contact details typed in by the user when asking for a human advisor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// LINE messaging-app id
    #[serde(default)]
    pub line_user_id: String,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.line_user_id]
            .iter()
            .all(|v| v.trim().is_empty())
    }

    /// Build the `/handoff` body; blank fields are sent as `null`
    pub fn into_request(self, profile_id: &str) -> Result<HandoffRequest, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoContactMethod);
        }
        Ok(HandoffRequest {
            profile_id: profile_id.to_string(),
            name: non_blank(self.name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            line_user_id: non_blank(self.line_user_id),
            consent: true,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Body of a `/handoff` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffRequest {
    pub profile_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub line_user_id: Option<String>,
    pub consent: bool,
}

/// Acknowledgement returned by `/handoff`; the body is otherwise ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffAck {
    #[serde(default)]
    pub message: Option<String>,
}
