//! Client-side conversation session controller.
//!
//! The controller owns the profile identifier, the message history and the
//! typing flag. It talks to the backend through [`advisor_api::AdvisorApi`],
//! renders through a [`Surface`] and mirrors its state into a [`Storage`].

pub mod controller;
pub mod error;
pub mod state;
pub mod storage;
pub mod surface;

pub use controller::{SendOutcome, SessionController};
pub use error::SessionError;
pub use state::{ConversationSession, SessionPhase};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use surface::{Notice, NoticeLevel, Speaker, Surface, View};
