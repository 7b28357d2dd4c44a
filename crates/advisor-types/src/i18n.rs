use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language of the canned advisor texts and of the backend reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// Opening advisor message shown once a profile is accepted
    pub fn greeting(&self) -> &'static str {
        match self {
            Language::Zh => "您好！我是您的AI留學顧問。我已經了解了您的基本資訊，現在讓我們深入討論您的留學計劃吧！\n\n您可以問我任何關於留學的問題，比如：\n• 推薦適合的學校和專業\n• 申請流程和時間規劃\n• 獎學金申請建議\n• 簽證和住宿資訊",
            Language::En => "Hello! I'm your AI study-abroad advisor. I've read your background, so let's dig into your plans!\n\nYou can ask me anything about studying abroad, for example:\n• Recommended schools and majors\n• Application steps and timeline\n• Scholarship advice\n• Visa and housing information",
        }
    }

    /// Shown in the conversation when a chat turn fails
    pub fn chat_apology(&self) -> &'static str {
        match self {
            Language::Zh => "抱歉，我現在無法回應您的問題。請稍後再試，或者聯繫人工顧問獲得幫助。",
            Language::En => "Sorry, I can't answer right now. Please try again later or contact a human advisor for help.",
        }
    }

    pub fn handoff_confirmation(&self) -> &'static str {
        match self {
            Language::Zh => "您的聯繫資訊已提交給我們的專業顧問團隊。他們將在24小時內與您聯繫，為您提供更深入的留學諮詢服務。\n\n感謝您使用AI留學顧問服務！",
            Language::En => "Your contact details have been passed to our advisor team. They will reach out within 24 hours for an in-depth consultation.\n\nThank you for using the AI study-abroad advisor!",
        }
    }

    pub fn profile_saved_notice(&self) -> &'static str {
        match self {
            Language::Zh => "設定完成！正在準備AI顧問...",
            Language::En => "Setup complete! Preparing your AI advisor...",
        }
    }

    pub fn handoff_sent_notice(&self) -> &'static str {
        match self {
            Language::Zh => "聯繫資訊已提交！專業顧問將盡快與您聯繫",
            Language::En => "Contact details submitted! An advisor will be in touch soon",
        }
    }

    pub fn submission_fallback(&self) -> &'static str {
        match self {
            Language::Zh => "設定失敗，請重試",
            Language::En => "Setup failed, please try again",
        }
    }

    pub fn chat_fallback(&self) -> &'static str {
        match self {
            Language::Zh => "AI回應失敗",
            Language::En => "The AI advisor did not respond",
        }
    }

    pub fn handoff_fallback(&self) -> &'static str {
        match self {
            Language::Zh => "提交失敗，請重試",
            Language::En => "Submission failed, please try again",
        }
    }

    pub fn missing_fields_notice(&self) -> &'static str {
        match self {
            Language::Zh => "請填寫所有必填欄位",
            Language::En => "Please fill in all required fields",
        }
    }

    pub fn no_country_notice(&self) -> &'static str {
        match self {
            Language::Zh => "請至少選擇一個國家",
            Language::En => "Please select at least one country",
        }
    }

    pub fn no_contact_notice(&self) -> &'static str {
        match self {
            Language::Zh => "請至少提供一種聯繫方式",
            Language::En => "Please provide at least one way to contact you",
        }
    }

    pub fn setup_required_notice(&self) -> &'static str {
        match self {
            Language::Zh => "請先完成基本設定",
            Language::En => "Please complete the setup first",
        }
    }

    pub fn assessment_required_notice(&self) -> &'static str {
        match self {
            Language::Zh => "請先完成測評表單",
            Language::En => "Please complete the assessment form first",
        }
    }

    pub fn storage_failure_notice(&self) -> &'static str {
        match self {
            Language::Zh => "無法在本機儲存對話紀錄",
            Language::En => "Could not save your conversation locally",
        }
    }

    pub fn advisor_label(&self) -> &'static str {
        match self {
            Language::Zh => "AI顧問 / AI Advisor",
            Language::En => "AI Advisor",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "zh-tw" | "zh_tw" | "tw" => Ok(Language::Zh),
            "en" | "en-us" | "en_us" | "english" => Ok(Language::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// Who is using the advisor; selects the role-specific views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Parent,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Parent => "parent",
        }
    }

    /// Path of the role-specific page for a profile
    pub fn view_path(&self, profile_id: &str) -> String {
        format!("/{}?profile_id={}", self.as_str(), profile_id)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(UserRole::Student),
            "parent" => Ok(UserRole::Parent),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
