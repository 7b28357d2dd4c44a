#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::Notify;

use advisor_api::{AdvisorApi, ApiError};
use advisor_session::{
    MemoryStorage, Notice, SessionController, Speaker, Storage, Surface, View,
};
use advisor_types::profile::fields;
use advisor_types::{
    keys, ChatMessage, ChatReply, ChatRequest, HandoffAck, HandoffRequest, IntakeResponse,
    Language, Profile, ProfileForm,
};

/// Every call the controller made against the backend
#[derive(Debug, Clone)]
pub enum ApiCall {
    CreateProfile(Profile),
    Chat(ChatRequest),
    Handoff(HandoffRequest),
}

#[derive(Default)]
struct MockInner {
    intake: RefCell<VecDeque<Result<IntakeResponse, ApiError>>>,
    chat: RefCell<VecDeque<Result<ChatReply, ApiError>>>,
    handoff: RefCell<VecDeque<Result<HandoffAck, ApiError>>>,
    calls: RefCell<Vec<ApiCall>>,
    chat_gate: RefCell<Option<Rc<Notify>>>,
}

/// Scripted backend; clones share the same script and call log
#[derive(Clone, Default)]
pub struct MockApi {
    inner: Rc<MockInner>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_intake(&self, response: Result<IntakeResponse, ApiError>) {
        self.inner.intake.borrow_mut().push_back(response);
    }

    pub fn queue_chat(&self, response: Result<ChatReply, ApiError>) {
        self.inner.chat.borrow_mut().push_back(response);
    }

    pub fn queue_handoff(&self, response: Result<HandoffAck, ApiError>) {
        self.inner.handoff.borrow_mut().push_back(response);
    }

    pub fn reply(&self, text: &str) {
        self.queue_chat(Ok(ChatReply {
            response: text.to_string(),
        }));
    }

    /// Hold every chat call until the returned handle is notified
    pub fn gate_chat(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.inner.chat_gate.borrow_mut() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.calls.borrow().clone()
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Chat(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.inner.calls.borrow_mut().push(call);
    }
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::Network("no response scripted".to_string()))
}

#[async_trait(?Send)]
impl AdvisorApi for MockApi {
    async fn create_profile(&self, profile: &Profile) -> Result<IntakeResponse, ApiError> {
        self.record(ApiCall::CreateProfile(profile.clone()));
        self.inner.intake.borrow_mut().pop_front().unwrap_or_else(unscripted)
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.record(ApiCall::Chat(request.clone()));
        let gate = self.inner.chat_gate.borrow().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.inner.chat.borrow_mut().pop_front().unwrap_or_else(unscripted)
    }

    async fn request_handoff(&self, request: &HandoffRequest) -> Result<HandoffAck, ApiError> {
        self.record(ApiCall::Handoff(request.clone()));
        self.inner.handoff.borrow_mut().pop_front().unwrap_or_else(unscripted)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    View(View),
    Message(Speaker, String),
    Clear,
    Typing(bool),
    Submitting(bool),
    Notice(Notice),
}

/// Surface that records what it was asked to render
#[derive(Clone, Default)]
pub struct RecordingSurface {
    events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    /// Bubbles currently on screen: everything after the last clear
    pub fn visible_messages(&self) -> Vec<(Speaker, String)> {
        let events = self.events.borrow();
        let start = events
            .iter()
            .rposition(|e| *e == SurfaceEvent::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        events[start..]
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Message(speaker, text) => Some((*speaker, text.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_view(&self) -> Option<View> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::View(v) => Some(*v),
            _ => None,
        })
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl Surface for RecordingSurface {
    fn show_view(&self, view: View) {
        self.push(SurfaceEvent::View(view));
    }

    fn append_message(&self, speaker: Speaker, content: &str) {
        self.push(SurfaceEvent::Message(speaker, content.to_string()));
    }

    fn clear_conversation(&self) {
        self.push(SurfaceEvent::Clear);
    }

    fn set_typing(&self, typing: bool) {
        self.push(SurfaceEvent::Typing(typing));
    }

    fn set_submitting(&self, busy: bool) {
        self.push(SurfaceEvent::Submitting(busy));
    }

    fn notify(&self, notice: Notice) {
        self.push(SurfaceEvent::Notice(notice));
    }
}

/// Storage whose writes start failing once `fail_writes` is called
#[derive(Clone, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    failure: Rc<RefCell<Option<String>>>,
}

impl FailingStorage {
    pub fn fail_writes(&self, reason: &str) {
        *self.failure.borrow_mut() = Some(reason.to_string());
    }

    fn check(&self) -> anyhow::Result<()> {
        match self.failure.borrow().as_deref() {
            Some(reason) => anyhow::bail!("{}", reason),
            None => Ok(()),
        }
    }
}

impl Storage for FailingStorage {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.check()?;
        self.inner.save(key, value)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.check()?;
        self.inner.remove(key)
    }
}

/// A controller wired to mocks, with handles to inspect each collaborator
pub struct Harness {
    pub controller: SessionController,
    pub api: MockApi,
    pub surface: RecordingSurface,
    pub session: MemoryStorage,
    pub durable: MemoryStorage,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_session(MemoryStorage::new())
    }

    /// Harness over pre-populated session storage
    pub fn with_session(session: MemoryStorage) -> Self {
        let api = MockApi::new();
        let surface = RecordingSurface::default();
        let durable = MemoryStorage::new();
        let controller =
            SessionController::new(api.clone(), surface.clone(), session.clone(), durable.clone());
        Self {
            controller,
            api,
            surface,
            session,
            durable,
        }
    }

    pub fn into_english(self) -> Self {
        Self {
            controller: self.controller.with_language(Language::En),
            ..self
        }
    }

    /// Harness that already went through a successful profile submission
    pub async fn with_profile(profile_id: &str) -> Self {
        let harness = Self::new();
        harness.api.queue_intake(Ok(IntakeResponse {
            profile_id: profile_id.to_string(),
        }));
        harness
            .controller
            .submit_profile(&valid_form())
            .await
            .expect("profile submission succeeds");
        harness
    }

    pub fn stored_history(&self) -> Vec<ChatMessage> {
        self.session
            .get(keys::CHAT_HISTORY)
            .map(|json| serde_json::from_str(&json).expect("stored history is JSON"))
            .unwrap_or_default()
    }
}

/// Session storage holding a profile id and the given history
pub fn stored_session(profile_id: Option<&str>, history: &[ChatMessage]) -> MemoryStorage {
    let storage = MemoryStorage::new();
    if let Some(id) = profile_id {
        storage.save(keys::PROFILE_ID, id).unwrap();
    }
    storage
        .save(keys::CHAT_HISTORY, &serde_json::to_string(history).unwrap())
        .unwrap();
    storage
}

pub fn valid_form() -> ProfileForm {
    ProfileForm::new()
        .with(fields::STUDENT_NAME, "Wang Xiaoming")
        .with(fields::STUDENT_EMAIL, "xiaoming@example.com")
        .with(fields::CITIZENSHIP, "TW")
        .with(fields::HIGH_SCHOOL, "Jianguo High School")
        .with(fields::GRADUATION_YEAR, "2026")
        .with(fields::GPA, "3.9")
        .with(fields::ENGLISH_EXAM_TYPE, "TOEFL")
        .with(fields::DEGREE, "bachelor")
        .with(fields::INTENDED_MAJOR, "Mechanical Engineering")
        .with(fields::MAJOR_REASON, "Loves machines")
        .with(fields::BUDGET, "70000")
        .with(fields::TARGET_INTAKE, "2027-09")
        .with(fields::EXTRACURRICULARS, "Science olympiad")
        .with(fields::HOW_DID_YOU_KNOW, "school counselor")
        .with_country("US")
}
