use advisor_types::{ChatMessage, Profile};

use crate::surface::View;

/// Lifecycle of one session: `Empty -> ProfileSubmitted -> Conversing`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Empty,
    ProfileSubmitted,
    Conversing,
}

/// In-memory conversation state owned by the controller
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    pub profile_id: Option<String>,
    pub profile: Option<Profile>,
    /// Backend-bound history; UI-only bubbles never land here
    pub messages: Vec<ChatMessage>,
    pub typing: bool,
    pub phase: SessionPhase,
    pub view: View,
    /// Bumped whenever the history is reset, so late replies can be dropped
    pub(crate) epoch: u64,
}
