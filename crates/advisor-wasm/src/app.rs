use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, KeyboardEvent, Window};

use advisor_api::ApiConfig;
use advisor_session::{SessionController, View};
use advisor_types::profile::fields;
use advisor_types::{default_target_intake, ContactInfo, Language, ProfileForm, UserRole};

use crate::api::FetchAdvisorClient;
use crate::dom;
use crate::storage::BrowserStorage;
use crate::surface::DomSurface;
use crate::utils;

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<SessionController>>> = const { RefCell::new(None) };
}

/// Page-level wiring between DOM events and the session controller
pub struct AdvisorApp {
    window: Window,
    document: Document,
    controller: Rc<SessionController>,
    /// Country chips in the order they were selected
    countries: Rc<RefCell<ProfileForm>>,
}

impl AdvisorApp {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;

        let language = utils::language_from_page();
        let config = ApiConfig::new(&utils::api_base_from_page());
        log::info!("Advisor backend: {}", config.base_url);

        let controller = SessionController::new(
            FetchAdvisorClient::new(config),
            DomSurface::new(document.clone(), language),
            BrowserStorage::session()?,
            BrowserStorage::local()?,
        )
        .with_language(language);

        Ok(Self {
            window,
            document,
            controller: Rc::new(controller),
            countries: Rc::new(RefCell::new(ProfileForm::new())),
        })
    }

    pub fn start(self) -> Result<(), JsValue> {
        self.prefill_target_intake()?;
        self.setup_navigation()?;
        self.setup_country_chips()?;
        self.setup_form_submit()?;
        self.setup_message_input()?;
        self.setup_handoff()?;

        self.controller.restore_session();

        CONTROLLER.with(|slot| *slot.borrow_mut() = Some(self.controller.clone()));
        Ok(())
    }

    fn prefill_target_intake(&self) -> Result<(), JsValue> {
        let input = dom::get_input_by_id(&self.document, fields::TARGET_INTAKE)?;
        if input.value().trim().is_empty() {
            input.set_value(&default_target_intake(Local::now().date_naive()));
        }
        Ok(())
    }

    fn setup_navigation(&self) -> Result<(), JsValue> {
        let controller = self.controller.clone();
        dom::add_click_listener(
            &dom::get_element_by_id(&self.document, "start-consultation-btn")?,
            move || controller.go_to(View::Setup),
        )?;

        let controller = self.controller.clone();
        dom::add_click_listener(
            &dom::get_element_by_id(&self.document, "back-to-home")?,
            move || controller.go_to(View::Home),
        )?;

        let controller = self.controller.clone();
        dom::add_click_listener(
            &dom::get_element_by_id(&self.document, "back-to-setup")?,
            move || controller.go_to(View::Setup),
        )?;

        let features = dom::get_element_by_id(&self.document, "features-section")?;
        dom::add_click_listener(
            &dom::get_element_by_id(&self.document, "learn-more-btn")?,
            move || {
                dom::remove_class(&features, "hidden");
                features.scroll_into_view();
            },
        )?;
        Ok(())
    }

    fn setup_country_chips(&self) -> Result<(), JsValue> {
        let countries = self.countries.clone();
        let container = dom::get_element_by_id(&self.document, "countries-container")?;
        dom::add_listener(&container, "click", move |event: web_sys::Event| {
            let Some(chip) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if !chip.class_list().contains("chip") {
                return;
            }
            let Some(code) = chip.get_attribute("data-value") else {
                return;
            };
            let _ = chip.class_list().toggle("chip-selected");
            let _ = chip.class_list().toggle("chip-unselected");
            countries.borrow_mut().toggle_country(&code);
        })
    }

    fn setup_form_submit(&self) -> Result<(), JsValue> {
        let document = self.document.clone();
        let controller = self.controller.clone();
        let countries = self.countries.clone();
        let form = dom::get_element_by_id(&self.document, "setup-form")?;

        dom::add_listener(&form, "submit", move |event: web_sys::Event| {
            event.prevent_default();
            let form = read_form(&document, &countries.borrow());
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = controller.submit_profile(&form).await {
                    log::warn!("Profile submission failed: {}", e);
                }
            });
        })
    }

    fn setup_message_input(&self) -> Result<(), JsValue> {
        let send = {
            let document = self.document.clone();
            let controller = self.controller.clone();
            Rc::new(move || {
                let Ok(input) = dom::get_input_by_id(&document, "chat-input") else {
                    return;
                };
                let text = input.value();
                if text.trim().is_empty() || controller.is_typing() {
                    return;
                }
                input.set_value("");

                let controller = controller.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = controller.send_message(&text).await {
                        log::error!("Chat error: {}", e);
                    }
                });
            })
        };

        let on_click = send.clone();
        dom::add_click_listener(
            &dom::get_element_by_id(&self.document, "send-message-btn")?,
            move || on_click(),
        )?;

        dom::add_listener(
            &dom::get_element_by_id(&self.document, "chat-input")?,
            "keypress",
            move |event: KeyboardEvent| {
                if event.key() == "Enter" && !event.shift_key() {
                    event.prevent_default();
                    send();
                }
            },
        )
    }

    fn setup_handoff(&self) -> Result<(), JsValue> {
        let window = self.window.clone();
        let controller = self.controller.clone();
        let language = controller.language();

        dom::add_click_listener(
            &dom::get_element_by_id(&self.document, "connect-human-btn")?,
            move || {
                if controller.profile_id().is_none() {
                    // Let the controller report the missing profile
                    let controller = controller.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let _ = controller.request_human_handoff(ContactInfo::default()).await;
                    });
                    return;
                }

                let ask = |question: &str| -> String {
                    window
                        .prompt_with_message(question)
                        .ok()
                        .flatten()
                        .unwrap_or_default()
                };
                let [name, email, phone, line_id] = handoff_questions(language);
                let contact = ContactInfo {
                    name: ask(name),
                    email: ask(email),
                    phone: ask(phone),
                    line_user_id: ask(line_id),
                };

                let controller = controller.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = controller.request_human_handoff(contact).await {
                        log::error!("Handoff error: {}", e);
                    }
                });
            },
        )
    }
}

/// Navigate to the role-specific page for the last submitted profile
pub fn go_to_role_page(role: UserRole) -> Result<(), JsValue> {
    let controller = CONTROLLER
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("Advisor not initialized"))?;

    // The controller has already shown a notice when this fails
    let Ok(path) = controller.role_view_path(role) else {
        return Ok(());
    };
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    window.location().set_href(&path)
}

fn read_form(document: &Document, countries: &ProfileForm) -> ProfileForm {
    let mut form = ProfileForm::new();
    for &field in fields::REQUIRED.iter().chain(fields::OPTIONAL) {
        if let Some(value) = dom::control_value(document, field) {
            form.set(field, value);
        }
    }
    for code in &countries.countries {
        form = form.with_country(code);
    }
    form
}

fn handoff_questions(language: Language) -> [&'static str; 4] {
    match language {
        Language::Zh => [
            "請輸入您的姓名（選填）：",
            "請輸入您的電子郵件（選填）：",
            "請輸入您的電話（選填）：",
            "請輸入您的LINE ID（選填）：",
        ],
        Language::En => [
            "Your name (optional):",
            "Your e-mail (optional):",
            "Your phone (optional):",
            "Your LINE ID (optional):",
        ],
    }
}
