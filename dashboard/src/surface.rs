//! leptos implementation of the render surface
//!
//! the controller writes into signals; the components read them. element
//! ids are kept stable so the page can be styled and scripted against them.

use std::cell::Cell;
use std::time::Duration;

use leptos::leptos_dom::helpers::{request_animation_frame, set_timeout};
use leptos::prelude::*;
use script_url_controller::{Notice, RenderSurface};
use shared::ScriptInfo;

use crate::browser;

pub const GENERATE_FORM_ID: &str = "generateForm";
pub const SCRIPT_SELECT_ID: &str = "scriptSelect";
pub const GENERATE_BTN_ID: &str = "generateBtn";
pub const RESULT_CARD_ID: &str = "resultCard";
pub const LOADING_CARD_ID: &str = "loadingCard";
pub const EXPIRY_TIME_ID: &str = "expiryTime";

/// everything the page renders
#[derive(Clone, Copy)]
pub struct UiSignals {
    pub loading: RwSignal<bool>,
    pub submit_enabled: RwSignal<bool>,
    pub result_visible: RwSignal<bool>,
    pub generated_url: RwSignal<String>,
    pub countdown: RwSignal<String>,
    pub scripts: RwSignal<Vec<ScriptInfo>>,
    pub selected: RwSignal<String>,
    pub notifications: RwSignal<Vec<(u64, Notice)>>,
}

impl UiSignals {
    pub fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
            submit_enabled: RwSignal::new(false),
            result_visible: RwSignal::new(false),
            generated_url: RwSignal::new(String::new()),
            countdown: RwSignal::new(String::new()),
            scripts: RwSignal::new(Vec::new()),
            selected: RwSignal::new(String::new()),
            notifications: RwSignal::new(Vec::new()),
        }
    }
}

impl Default for UiSignals {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SignalSurface {
    ui: UiSignals,
    notification_ttl: Duration,
    next_notice_id: Cell<u64>,
}

impl SignalSurface {
    pub fn new(ui: UiSignals, notification_ttl: Duration) -> Self {
        Self { ui, notification_ttl, next_notice_id: Cell::new(0) }
    }
}

impl RenderSurface for SignalSurface {
    fn show_loading(&self, loading: bool) {
        self.ui.loading.set(loading);
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.ui.submit_enabled.set(enabled);
    }

    fn show_result(&self, url: &str) {
        self.ui.generated_url.set(url.to_string());
        self.ui.result_visible.set(true);
    }

    fn hide_result(&self) {
        self.ui.result_visible.set(false);
    }

    fn update_countdown_text(&self, text: &str) {
        self.ui.countdown.set(text.to_string());
    }

    fn notify(&self, notice: Notice) {
        let id = self.next_notice_id.get();
        self.next_notice_id.set(id + 1);
        self.ui.notifications.update(|list| list.push((id, notice)));

        let notifications = self.ui.notifications;
        set_timeout(
            move || notifications.update(|list| list.retain(|(i, _)| *i != id)),
            self.notification_ttl,
        );
    }

    fn show_scripts(&self, scripts: &[ScriptInfo]) {
        self.ui.scripts.set(scripts.to_vec());
    }

    fn reset_form(&self) {
        self.ui.selected.set(String::new());
        self.ui.generated_url.set(String::new());
        self.ui.countdown.set(String::new());
    }

    fn scroll_result_into_view(&self) {
        // wait for the card to be displayed before measuring it
        request_animation_frame(|| browser::scroll_into_view(RESULT_CARD_ID));
    }

    fn scroll_to_top(&self) {
        browser::scroll_to_top();
    }

    fn open_in_new_tab(&self, url: &str) {
        browser::open_in_new_tab(url);
    }
}
