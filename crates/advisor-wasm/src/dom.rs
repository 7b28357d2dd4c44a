use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

/// Get element by ID
pub fn get_element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element not found: {}", id)))
}

/// Get input element by ID
pub fn get_input_by_id(document: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    let element = get_element_by_id(document, id)?;
    element
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("Element is not HtmlInputElement: {}", id)))
}

/// Current value of a form control, whatever its kind
pub fn control_value(document: &Document, id: &str) -> Option<String> {
    let element = document.get_element_by_id(id)?;
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        element.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
    }
}

/// Create element with class
pub fn create_element_with_class(
    document: &Document,
    tag: &str,
    class: &str,
) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

/// Add a listener for `event` on an element; the closure lives for the page
pub fn add_listener<E, F>(element: &Element, event: &str, callback: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(E)>);
    element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget(); // Keep the closure alive
    Ok(())
}

/// Add click listener to element
pub fn add_click_listener<F>(element: &Element, mut callback: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    add_listener(element, "click", move |_: web_sys::Event| callback())
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

/// Clear element content
pub fn clear_element(element: &Element) {
    element.set_inner_html("");
}

/// Scroll element to bottom
pub fn scroll_to_bottom(element: &Element) {
    if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
        html_element.set_scroll_top(html_element.scroll_height());
    }
}
