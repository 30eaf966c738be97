//! ==============================================================================
//! browser.rs - web api adapters
//! ==============================================================================
//!
//! clipboard, clock and the handful of window/document calls the surface
//! needs. every missing api is reported as an error value, never a panic.

use std::time::Duration;

use chrono::{DateTime, Utc};
use leptos::leptos_dom::helpers::{set_interval_with_handle, IntervalHandle};
use script_url_controller::{Clipboard, ClipboardError, Clock, Config, ConfigError, GENERATED_URL_ID};
use tracing::{debug, error};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    HtmlDocument, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions,
};

/// id of the inline json config block
pub const CONFIG_ELEMENT_ID: &str = "app-config";

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

// ==============================================================================
// config
// ==============================================================================

/// read `<script type="application/json" id="app-config">`, defaults if absent
pub fn load_config() -> Result<Config, ConfigError> {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match raw {
        Some(raw) if !raw.trim().is_empty() => Config::from_json(&raw),
        _ => Ok(Config::default()),
    }
}

// ==============================================================================
// clipboard
// ==============================================================================

pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
        if !window.is_secure_context() {
            return Err(ClipboardError::Unavailable);
        }
        let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .and_then(|value| value.dyn_into::<web_sys::Clipboard>().ok())
            .ok_or(ClipboardError::Unavailable)?;

        JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| {
                debug!(error = ?e, "navigator.clipboard.writeText rejected");
                ClipboardError::Failed
            })
    }

    fn copy_selection(&self, text: &str) -> Result<(), ClipboardError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ClipboardError::Unavailable)?;
        if !has_property(&document, "execCommand") {
            return Err(ClipboardError::Unavailable);
        }

        let input = document
            .get_element_by_id(GENERATED_URL_ID)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .ok_or(ClipboardError::Failed)?;
        input.set_value(text);
        input.select();
        // mobile safari ignores select() without an explicit range
        let _ = input.set_selection_range(0, 99999);

        let html_document = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| ClipboardError::Unavailable)?;
        match html_document.exec_command("copy") {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError::Failed),
            Err(e) => {
                debug!(error = ?e, "execCommand('copy') threw");
                Err(ClipboardError::Failed)
            }
        }
    }
}

// ==============================================================================
// clock
// ==============================================================================

pub struct BrowserClock;

impl Clock for BrowserClock {
    type Handle = IntervalHandle;

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }

    fn every(&self, period: Duration, tick: Box<dyn Fn()>) -> Option<IntervalHandle> {
        match set_interval_with_handle(move || tick(), period) {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(error = ?e, "setInterval failed");
                None
            }
        }
    }

    fn cancel(&self, handle: IntervalHandle) {
        handle.clear();
    }
}

// ==============================================================================
// window / document helpers
// ==============================================================================

pub fn scroll_into_view(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            error!(error = ?e, "window.open failed");
        }
    }
}

/// id of the element that currently has focus
pub fn focused_element_id() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element())
        .map(|el| el.id())
        .filter(|id| !id.is_empty())
}
