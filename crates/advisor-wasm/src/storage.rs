use anyhow::{anyhow, Result};
use wasm_bindgen::JsValue;

use advisor_session::Storage;

/// `sessionStorage` or `localStorage` behind the controller's storage seam
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    /// Tab-scoped store
    pub fn session() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let inner = window
            .session_storage()?
            .ok_or_else(|| JsValue::from_str("sessionStorage unavailable"))?;
        Ok(Self { inner })
    }

    /// Store that survives the tab
    pub fn local() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let inner = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
        Ok(Self { inner })
    }
}

fn js_error(action: &str, key: &str, e: JsValue) -> anyhow::Error {
    anyhow!("Failed to {} '{}' in browser storage: {:?}", action, key, e)
}

impl Storage for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key).map_err(|e| js_error("read", key, e))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .set_item(key, value)
            .map_err(|e| js_error("write", key, e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| js_error("remove", key, e))
    }
}
