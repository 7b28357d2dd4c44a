use wasm_bindgen::JsValue;

use advisor_types::{normalize_api_base, Language};

/// Escape HTML to prevent XSS
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Backend base URL from `window.__CONFIG__.API_BASE`, or the default
pub fn api_base_from_page() -> String {
    let configured = web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("__CONFIG__")).ok())
        .filter(|c| c.is_object())
        .and_then(|c| js_sys::Reflect::get(&c, &JsValue::from_str("API_BASE")).ok())
        .and_then(|v| v.as_string());
    normalize_api_base(configured.as_deref().unwrap_or(""))
}

/// Page language from the `<html lang>` attribute; Chinese unless it says English
pub fn language_from_page() -> Language {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|e| e.get_attribute("lang"))
        .map(|lang| language_from_tag(&lang))
        .unwrap_or_default()
}

pub fn language_from_tag(tag: &str) -> Language {
    if tag.trim().to_lowercase().starts_with("en") {
        Language::En
    } else {
        Language::Zh
    }
}
