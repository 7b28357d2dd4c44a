use advisor_types::Role;

/// Pages of the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    Setup,
    Chat,
}

/// Who a rendered bubble belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Advisor,
}

impl From<Role> for Speaker {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Speaker::User,
            Role::Assistant => Speaker::Advisor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient, auto-dismissing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

/// Rendering target driven by the controller
pub trait Surface {
    fn show_view(&self, view: View);

    fn append_message(&self, speaker: Speaker, content: &str);

    fn clear_conversation(&self);

    /// Typing indicator for an in-flight chat turn
    fn set_typing(&self, typing: bool);

    /// Busy state of the profile submit control
    fn set_submitting(&self, busy: bool);

    fn notify(&self, notice: Notice);
}
