use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

use advisor_types::profile::fields;
use advisor_types::{Profile, ProfileForm};

/// Mock advisor backend for exercising the HTTP client
pub struct AdvisorMockServer {
    server: MockServer,
}

impl AdvisorMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL the client should be pointed at
    pub fn base_url(&self) -> String {
        format!("{}/api/v1", self.server.uri())
    }

    /// Mock `/intake` answering with the wrapped envelope the real backend uses
    pub async fn mock_intake_success(&self, profile_id: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v1/intake"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "data": { "profile_id": profile_id }
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock `/chat` expecting a body that contains `expected`
    pub async fn mock_chat_reply(&self, expected: Value, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v1/chat"))
            .and(body_partial_json(expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": reply
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock `/handoff` acknowledging the request
    pub async fn mock_handoff_ack(&self) {
        Mock::given(method("POST"))
            .and(path("/api/v1/handoff"))
            .and(body_partial_json(json!({ "consent": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&self.server)
            .await;
    }

    /// Mock any endpoint failing with the given status and error text
    pub async fn mock_error(&self, endpoint: &str, status: u16, error: Option<&str>) {
        let body = match error {
            Some(message) => json!({ "ok": false, "error": message }),
            None => json!({ "ok": false }),
        };
        Mock::given(method("POST"))
            .and(path(format!("/api/v1{}", endpoint)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that answers slower than any sane client timeout
    pub async fn mock_slow(&self, endpoint: &str, delay: std::time::Duration) {
        Mock::given(method("POST"))
            .and(path(format!("/api/v1{}", endpoint)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(delay)
                    .set_body_json(json!({ "response": "late" })),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_health(&self) {
        Mock::given(method("GET"))
            .and(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "healthy",
                "version": "1.0.0"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock requiring a bearer token on `/chat`
    pub async fn mock_chat_requires_token(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v1/chat"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "authorized" })))
            .mount(&self.server)
            .await;
    }

    /// Bodies of every request received so far
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

/// A profile that passes validation
pub fn sample_profile() -> Profile {
    let form = ProfileForm::new()
        .with(fields::STUDENT_NAME, "Chen Wei")
        .with(fields::STUDENT_EMAIL, "wei@example.com")
        .with(fields::CITIZENSHIP, "TW")
        .with(fields::HIGH_SCHOOL, "Kaohsiung Senior High")
        .with(fields::GRADUATION_YEAR, "2026")
        .with(fields::GPA, "3.6")
        .with(fields::ENGLISH_EXAM_TYPE, "IELTS")
        .with(fields::DEGREE, "bachelor")
        .with(fields::INTENDED_MAJOR, "Economics")
        .with(fields::MAJOR_REASON, "Markets are interesting")
        .with(fields::BUDGET, "45000")
        .with(fields::TARGET_INTAKE, "2027-09")
        .with(fields::EXTRACURRICULARS, "Debate team")
        .with(fields::HOW_DID_YOU_KNOW, "search")
        .with_country("CA");
    Profile::from_form(&form).expect("sample profile is valid")
}
