use std::cell::RefCell;

use advisor_api::{AdvisorApi, ApiError};
use advisor_types::{
    keys, trailing_window, ChatMessage, ChatRequest, ContactInfo, Language, Profile, ProfileForm,
    UserRole, ValidationError, CHAT_HISTORY_WINDOW,
};

use crate::error::SessionError;
use crate::state::{ConversationSession, SessionPhase};
use crate::storage::Storage;
use crate::surface::{Notice, Speaker, Surface, View};

/// Result of a `send_message` call that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, or a turn was already in flight
    Ignored,
    /// The advisor answered and the reply was appended to history
    Replied(String),
    /// The conversation was reset while the turn was in flight
    Discarded,
}

/// Conversation session controller.
///
/// All methods take `&self`; state lives in a `RefCell` that is never borrowed
/// across an await, so a second call made while a chat turn is pending sees
/// the typing flag and backs off.
pub struct SessionController {
    api: Box<dyn AdvisorApi>,
    surface: Box<dyn Surface>,
    session_store: Box<dyn Storage>,
    durable_store: Box<dyn Storage>,
    language: Language,
    user_role: Option<UserRole>,
    session: RefCell<ConversationSession>,
}

impl SessionController {
    /// `session_store` lives as long as the tab/session; `durable_store`
    /// survives it and only remembers the last profile identifier.
    pub fn new(
        api: impl AdvisorApi + 'static,
        surface: impl Surface + 'static,
        session_store: impl Storage + 'static,
        durable_store: impl Storage + 'static,
    ) -> Self {
        Self {
            api: Box::new(api),
            surface: Box::new(surface),
            session_store: Box::new(session_store),
            durable_store: Box::new(durable_store),
            language: Language::default(),
            user_role: None,
            session: RefCell::new(ConversationSession::default()),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_user_role(mut self, role: Option<UserRole>) -> Self {
        self.user_role = role;
        self
    }

    // ========== Accessors ==========

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.borrow().phase
    }

    pub fn view(&self) -> View {
        self.session.borrow().view
    }

    pub fn profile_id(&self) -> Option<String> {
        self.session.borrow().profile_id.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.session.borrow().profile.clone()
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.session.borrow().messages.clone()
    }

    pub fn is_typing(&self) -> bool {
        self.session.borrow().typing
    }

    // ========== Navigation ==========

    pub fn go_to(&self, view: View) {
        self.session.borrow_mut().view = view;
        self.surface.show_view(view);
    }

    /// Path of the role-specific page for the last submitted profile
    pub fn role_view_path(&self, role: UserRole) -> Result<String, SessionError> {
        match self.stored(self.durable_store.load(keys::PROFILE_ID))?.filter(|id| !id.is_empty()) {
            Some(profile_id) => Ok(role.view_path(&profile_id)),
            None => Err(self.precondition(self.language.assessment_required_notice())),
        }
    }

    // ========== Session lifecycle ==========

    /// Rehydrate from storage. Returns `true` when a conversation was resumed.
    ///
    /// Entries that cannot be read or parsed count as absent.
    pub fn restore_session(&self) -> bool {
        let profile_id = self
            .load_or_warn(keys::PROFILE_ID)
            .filter(|id| !id.trim().is_empty());
        let profile = self
            .load_or_warn(keys::USER_PROFILE)
            .and_then(|json| parse_or_warn::<Profile>(keys::USER_PROFILE, &json));
        let mut messages = self
            .load_or_warn(keys::CHAT_HISTORY)
            .and_then(|json| parse_or_warn::<Vec<ChatMessage>>(keys::CHAT_HISTORY, &json))
            .unwrap_or_default();

        if profile_id.is_none() && !messages.is_empty() {
            log::warn!("Ignoring {} stored messages without a profile id", messages.len());
            messages.clear();
        }

        let resumed = profile_id.is_some() && !messages.is_empty();
        let phase = match (&profile_id, resumed) {
            (_, true) => SessionPhase::Conversing,
            (Some(_), false) => SessionPhase::ProfileSubmitted,
            (None, false) => SessionPhase::Empty,
        };

        {
            let mut session = self.session.borrow_mut();
            session.profile_id = profile_id;
            session.profile = profile;
            session.messages = messages.clone();
            session.typing = false;
            session.phase = phase;
        }

        if resumed {
            log::info!("Resuming conversation with {} messages", messages.len());
            self.go_to(View::Chat);
            self.surface.clear_conversation();
            for message in &messages {
                self.surface.append_message(message.role.into(), &message.content);
            }
        }

        resumed
    }

    /// Validate and submit the setup form, then open the conversation
    pub async fn submit_profile(&self, form: &ProfileForm) -> Result<String, SessionError> {
        let profile = Profile::from_form(form).map_err(|e| self.invalid(e))?;

        self.surface.set_submitting(true);
        let result = self.api.create_profile(&profile).await;
        self.surface.set_submitting(false);

        let profile_id = match result {
            Ok(response) if !response.profile_id.trim().is_empty() => response.profile_id,
            Ok(_) => {
                let message = self.language.submission_fallback().to_string();
                self.surface.notify(Notice::error(&message));
                return Err(SessionError::Submission(message));
            }
            Err(e) => {
                let message = self.failure_message(&e, self.language.submission_fallback());
                self.surface.notify(Notice::error(&message));
                return Err(SessionError::Submission(message));
            }
        };

        let serialized = serde_json::to_string(&profile)
            .map_err(|e| self.storage_failure(format!("Failed to serialize profile: {}", e)))?;
        self.stored(self.session_store.save(keys::PROFILE_ID, &profile_id))?;
        self.stored(self.session_store.save(keys::USER_PROFILE, &serialized))?;
        self.stored(self.durable_store.save(keys::PROFILE_ID, &profile_id))?;

        {
            let mut session = self.session.borrow_mut();
            session.profile_id = Some(profile_id.clone());
            session.profile = Some(profile);
            session.phase = SessionPhase::ProfileSubmitted;
        }
        log::info!("Profile created: {}", profile_id);
        self.surface.notify(Notice::success(self.language.profile_saved_notice()));

        self.start_conversation()?;
        Ok(profile_id)
    }

    /// Fresh history for the current profile, opened with the local greeting
    fn start_conversation(&self) -> Result<(), SessionError> {
        self.persist_history(&[])?;
        {
            let mut session = self.session.borrow_mut();
            session.messages.clear();
            session.phase = SessionPhase::Conversing;
            session.epoch += 1;
        }
        self.surface.clear_conversation();
        self.go_to(View::Chat);
        self.surface.append_message(Speaker::Advisor, self.language.greeting());
        Ok(())
    }

    /// Send one chat turn. At most one turn is in flight at a time.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome, SessionError> {
        let message = text.trim();
        if message.is_empty() || self.is_typing() {
            return Ok(SendOutcome::Ignored);
        }
        let profile_id = self
            .profile_id()
            .ok_or_else(|| self.precondition(self.language.setup_required_notice()))?;

        // Persist the outgoing message before anything can fail on the network
        let mut history = self.history();
        history.push(ChatMessage::user(message));
        self.persist_history(&history)?;
        let chat_history = trailing_window(&history, CHAT_HISTORY_WINDOW);

        let epoch = {
            let mut session = self.session.borrow_mut();
            session.messages = history;
            session.typing = true;
            session.epoch
        };
        self.surface.append_message(Speaker::User, message);
        self.surface.set_typing(true);

        let request = ChatRequest {
            profile_id,
            message: message.to_string(),
            chat_history,
            language: Some(self.language),
            user_role: self.user_role,
        };
        let result = self.api.send_chat(&request).await;

        self.session.borrow_mut().typing = false;
        self.surface.set_typing(false);

        if self.session.borrow().epoch != epoch {
            log::info!("Conversation was reset during a chat turn; dropping the reply");
            return Ok(SendOutcome::Discarded);
        }

        match result {
            Ok(reply) => {
                let mut history = self.history();
                history.push(ChatMessage::assistant(reply.response.clone()));
                self.persist_history(&history)?;
                self.session.borrow_mut().messages = history;
                self.surface.append_message(Speaker::Advisor, &reply.response);
                Ok(SendOutcome::Replied(reply.response))
            }
            Err(e) => {
                log::warn!("Chat error: {}", e);
                // Shown only; never becomes backend-bound history
                self.surface
                    .append_message(Speaker::Advisor, self.language.chat_apology());
                let message = self.failure_message(&e, self.language.chat_fallback());
                self.surface.notify(Notice::error(&message));
                Err(SessionError::Chat(message))
            }
        }
    }

    /// Forward contact details to a human advisor
    pub async fn request_human_handoff(&self, contact: ContactInfo) -> Result<(), SessionError> {
        let profile_id = self
            .profile_id()
            .ok_or_else(|| self.precondition(self.language.setup_required_notice()))?;
        let request = contact
            .into_request(&profile_id)
            .map_err(|e| self.invalid(e))?;

        match self.api.request_handoff(&request).await {
            Ok(_) => {
                self.surface
                    .notify(Notice::success(self.language.handoff_sent_notice()));
                self.surface
                    .append_message(Speaker::Advisor, self.language.handoff_confirmation());
                Ok(())
            }
            Err(e) => {
                let message = self.failure_message(&e, self.language.handoff_fallback());
                self.surface.notify(Notice::error(&message));
                Err(SessionError::Handoff(message))
            }
        }
    }

    /// Drop the conversation and go back to the setup form.
    ///
    /// The stored profile record is kept so the form can be prefilled.
    pub fn start_new_consultation(&self) -> Result<(), SessionError> {
        self.stored(self.session_store.remove(keys::CHAT_HISTORY))?;
        self.stored(self.session_store.remove(keys::PROFILE_ID))?;
        {
            let mut session = self.session.borrow_mut();
            session.profile_id = None;
            session.messages.clear();
            session.phase = SessionPhase::Empty;
            session.epoch += 1;
        }
        self.surface.clear_conversation();
        self.go_to(View::Setup);
        Ok(())
    }

    // ========== Helpers ==========

    fn persist_history(&self, history: &[ChatMessage]) -> Result<(), SessionError> {
        let json = serde_json::to_string(history)
            .map_err(|e| self.storage_failure(format!("Failed to serialize history: {}", e)))?;
        self.stored(self.session_store.save(keys::CHAT_HISTORY, &json))
    }

    fn load_or_warn(&self, key: &str) -> Option<String> {
        match self.session_store.load(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring unreadable {} in storage: {:#}", key, e);
                None
            }
        }
    }

    /// Report a storage result to the user when it failed
    fn stored<T>(&self, result: anyhow::Result<T>) -> Result<T, SessionError> {
        result.map_err(|e| self.storage_failure(format!("{:#}", e)))
    }

    fn storage_failure(&self, detail: String) -> SessionError {
        log::error!("Storage failure: {}", detail);
        self.surface
            .notify(Notice::error(self.language.storage_failure_notice()));
        SessionError::Storage(detail)
    }

    fn failure_message(&self, error: &ApiError, fallback: &str) -> String {
        error
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    fn precondition(&self, text: &str) -> SessionError {
        self.surface.notify(Notice::error(text));
        SessionError::Precondition(text.to_string())
    }

    fn invalid(&self, error: ValidationError) -> SessionError {
        let text = match &error {
            ValidationError::MissingField(_) => self.language.missing_fields_notice().to_string(),
            ValidationError::NoCountrySelected => self.language.no_country_notice().to_string(),
            ValidationError::NoContactMethod => self.language.no_contact_notice().to_string(),
            other => format!("{} ({})", self.language.missing_fields_notice(), other),
        };
        self.surface.notify(Notice::error(text));
        SessionError::Validation(error)
    }
}

fn parse_or_warn<T: serde::de::DeserializeOwned>(key: &str, json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable {} in storage: {}", key, e);
            None
        }
    }
}
