use colored::Colorize;
use std::cell::RefCell;

use advisor_session::{Notice, NoticeLevel, Speaker, Surface, View};
use advisor_types::Language;

use crate::transcript::Transcript;

/// Renders the conversation to stdout and mirrors it into a transcript
pub struct TerminalSurface {
    language: Language,
    transcript: RefCell<Option<Transcript>>,
}

impl TerminalSurface {
    pub fn new(language: Language, transcript: Option<Transcript>) -> Self {
        Self {
            language,
            transcript: RefCell::new(transcript),
        }
    }

    fn record(&self, speaker: &str, content: &str) {
        if let Some(transcript) = self.transcript.borrow_mut().as_mut() {
            transcript.record(speaker, content);
        }
    }
}

impl Surface for TerminalSurface {
    fn show_view(&self, view: View) {
        let title = match view {
            View::Home => return,
            View::Setup => "Profile setup",
            View::Chat => "Conversation",
        };
        println!("\n{}", format!("── {} ──", title).bright_cyan().bold());
    }

    fn append_message(&self, speaker: Speaker, content: &str) {
        match speaker {
            Speaker::User => {
                println!("{} {}", "You:".bright_green().bold(), content);
                self.record("user", content);
            }
            Speaker::Advisor => {
                println!("{} {}", format!("{}:", self.language.advisor_label()).bright_blue().bold(), content);
                self.record("advisor", content);
            }
        }
    }

    fn clear_conversation(&self) {
        println!("{}", "─".repeat(40).bright_black());
    }

    fn set_typing(&self, typing: bool) {
        if typing {
            println!("{}", "…".bright_black());
        }
    }

    fn set_submitting(&self, busy: bool) {
        if busy {
            println!("{}", "Submitting profile...".bright_black());
        }
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => println!("{} {}", "ℹ".cyan(), notice.text.cyan()),
            NoticeLevel::Success => println!("{} {}", "✓".green(), notice.text.green()),
            NoticeLevel::Error => eprintln!("{} {}", "✗".red(), notice.text.red()),
        }
    }
}
