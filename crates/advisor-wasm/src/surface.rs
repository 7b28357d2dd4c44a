use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement};

use advisor_session::{Notice, NoticeLevel, Speaker, Surface, View};
use advisor_types::Language;

use crate::dom;
use crate::utils;

const PAGES: &[&str] = &["homepage", "setup-page", "chat-page", "features-section"];
const TOAST_MS: u32 = 3000;

/// Renders controller output into the page
pub struct DomSurface {
    document: Document,
    language: Language,
}

impl DomSurface {
    pub fn new(document: Document, language: Language) -> Self {
        Self { document, language }
    }

    fn render_message(&self, speaker: Speaker, content: &str) -> Result<(), JsValue> {
        let container = dom::get_element_by_id(&self.document, "chat-container")?;
        let (row_class, bubble_class) = match speaker {
            Speaker::User => ("flex justify-end fade-in", "message-user"),
            Speaker::Advisor => ("flex justify-start fade-in", "message-ai"),
        };

        let row = dom::create_element_with_class(&self.document, "div", row_class)?;
        let header = match speaker {
            Speaker::User => String::new(),
            Speaker::Advisor => self.advisor_header(),
        };
        row.set_inner_html(&format!(
            r#"<div class="message-bubble {}">{}<div class="whitespace-pre-line">{}</div></div>"#,
            bubble_class,
            header,
            utils::escape_html(content)
        ));

        container.append_child(&row)?;
        dom::scroll_to_bottom(&container);
        Ok(())
    }

    fn advisor_header(&self) -> String {
        format!(
            r#"<div class="flex items-center mb-2"><div class="w-8 h-8 bg-yellow-400 rounded-full flex items-center justify-center text-gray-800 text-sm font-bold mr-2">AI</div><span class="text-sm text-gray-500">{}</span></div>"#,
            utils::escape_html(self.language.advisor_label())
        )
    }

    fn render_typing(&self, typing: bool) -> Result<(), JsValue> {
        if let Some(existing) = self.document.get_element_by_id("typing-indicator") {
            existing.remove();
        }
        if !typing {
            return Ok(());
        }

        let container = dom::get_element_by_id(&self.document, "chat-container")?;
        let row = dom::create_element_with_class(&self.document, "div", "flex justify-start fade-in")?;
        row.set_id("typing-indicator");
        row.set_inner_html(&format!(
            r#"<div class="message-bubble message-ai">{}<div class="typing-indicator"><div class="typing-dot"></div><div class="typing-dot" style="animation-delay: 0.2s"></div><div class="typing-dot" style="animation-delay: 0.4s"></div></div></div>"#,
            self.advisor_header()
        ));
        container.append_child(&row)?;
        dom::scroll_to_bottom(&container);
        Ok(())
    }

    fn render_toast(&self, notice: &Notice) -> Result<(), JsValue> {
        let level = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        };
        let toast = dom::create_element_with_class(
            &self.document,
            "div",
            &format!(
                "fixed top-4 right-4 z-50 max-w-sm p-4 rounded-lg shadow-lg transition-all duration-300 toast-{} fade-in",
                level
            ),
        )?;
        toast.set_text_content(Some(&notice.text));

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("No body"))?;
        body.append_child(&toast)?;

        Timeout::new(TOAST_MS, move || toast.remove()).forget();
        Ok(())
    }

    fn render_view(&self, view: View) -> Result<(), JsValue> {
        for id in PAGES {
            if let Some(page) = self.document.get_element_by_id(id) {
                dom::add_class(&page, "hidden");
            }
        }
        let target = match view {
            View::Home => "homepage",
            View::Setup => "setup-page",
            View::Chat => "chat-page",
        };
        let page = dom::get_element_by_id(&self.document, target)?;
        dom::remove_class(&page, "hidden");
        dom::add_class(&page, "fade-in");
        Ok(())
    }

    fn render_submitting(&self, busy: bool) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "start-chat-btn")?
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| JsValue::from_str("start-chat-btn is not a button"))?;

        button.set_disabled(busy);
        if busy {
            let original = button.text_content().unwrap_or_default();
            button.set_attribute("data-original-text", &original)?;
            button.set_inner_html(
                r#"<div class="inline-block w-4 h-4 border-2 border-white border-t-transparent rounded-full animate-spin mr-2"></div>…"#,
            );
        } else if let Some(original) = button.get_attribute("data-original-text") {
            button.set_text_content(Some(&original));
        }
        Ok(())
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("Render failed: {:?}", e);
    }
}

impl Surface for DomSurface {
    fn show_view(&self, view: View) {
        report(self.render_view(view));
    }

    fn append_message(&self, speaker: Speaker, content: &str) {
        report(self.render_message(speaker, content));
    }

    fn clear_conversation(&self) {
        if let Some(container) = self.document.get_element_by_id("chat-container") {
            dom::clear_element(&container);
        }
    }

    fn set_typing(&self, typing: bool) {
        report(self.render_typing(typing));
    }

    fn set_submitting(&self, busy: bool) {
        report(self.render_submitting(busy));
    }

    fn notify(&self, notice: Notice) {
        report(self.render_toast(&notice));
    }
}
