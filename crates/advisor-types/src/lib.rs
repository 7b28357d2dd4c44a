//! Core types for the study-abroad advisor client
//!
//! This crate provides the profile record, chat messages, handoff contact
//! details and wire bodies shared by every advisor crate.

pub mod error;
pub mod i18n;
pub mod message;
pub mod profile;
pub mod wire;

pub use error::ValidationError;
pub use i18n::{Language, UserRole};
pub use message::{trailing_window, ChatMessage, Role};
pub use profile::{default_target_intake, Profile, ProfileForm};
pub use wire::{ChatReply, ChatRequest, ContactInfo, HandoffAck, HandoffRequest, IntakeResponse};

// ============================================================================
// Constants
// ============================================================================

/// Number of trailing history entries sent with each chat turn
pub const CHAT_HISTORY_WINDOW: usize = 10;

/// Default backend base URL when none is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";

/// Storage keys shared by every frontend
pub mod keys {
    pub const PROFILE_ID: &str = "profile_id";
    pub const USER_PROFILE: &str = "user_profile";
    pub const CHAT_HISTORY: &str = "chat_history";
}

/// Trim trailing slashes so endpoint paths can be appended directly
pub fn normalize_api_base(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}
