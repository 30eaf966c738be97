//! ==============================================================================
//! controller.rs - url generator state machine
//! ==============================================================================
//!
//! purpose:
//!     drives one generation cycle at a time: validate the selection, call the
//!     generation service, show the url and count down to its expiry.
//!
//! phases:
//!     Idle -> Submitting -> Idle (error) | Displayed
//!     Displayed -> Counting -> Expired
//!     any -> Idle (reset)
//!
//! lifecycle rules:
//!     - at most one submission per cycle is in flight
//!     - the countdown timer is always cancelled before a new one starts
//!     - a response for a cycle that was reset is dropped on arrival
//!
//! the controller is single-threaded. state lives in a RefCell and no borrow
//! is held across an await point or a call into a port that may re-enter.
//!
//! ==============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use shared::GenerateRequest;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::countdown::CountdownStatus;
use crate::error::{
    ClipboardError, GenerateError, MSG_BUSY, MSG_COPIED, MSG_LOAD_SCRIPTS_FAILED,
    MSG_NOTHING_TO_COPY, MSG_SELECT_SCRIPT,
};
use crate::ports::{Clipboard, Clock, GenerateApi, RenderSurface};
use crate::response::GenerationResult;
use crate::shortcuts::Shortcut;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Displayed,
    Counting,
    Expired,
}

struct State<H> {
    phase: Phase,
    /// bumped by every reset; responses carry the cycle they were sent in
    cycle: u64,
    has_selection: bool,
    result: Option<GenerationResult>,
    /// cleared on expiry so late ticks are no-ops
    expires_at: Option<DateTime<Utc>>,
    timer: Option<H>,
}

pub struct UrlGeneratorController<A, R, C, K: Clock> {
    config: Config,
    api: A,
    surface: R,
    clipboard: C,
    clock: K,
    state: RefCell<State<K::Handle>>,
    this: Weak<Self>,
}

impl<A, R, C, K> UrlGeneratorController<A, R, C, K>
where
    A: GenerateApi + 'static,
    R: RenderSurface + 'static,
    C: Clipboard + 'static,
    K: Clock + 'static,
{
    pub fn new(config: Config, api: A, surface: R, clipboard: C, clock: K) -> Rc<Self> {
        let controller = Rc::new_cyclic(|this| Self {
            config,
            api,
            surface,
            clipboard,
            clock,
            state: RefCell::new(State {
                phase: Phase::Idle,
                cycle: 0,
                has_selection: false,
                result: None,
                expires_at: None,
                timer: None,
            }),
            this: this.clone(),
        });
        controller.surface.set_submit_enabled(false);
        controller
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    /// url currently shown in the result field
    pub fn current_url(&self) -> Option<String> {
        self.state.borrow().result.as_ref().map(|r| r.url.clone())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().expires_at
    }

    pub fn has_active_timer(&self) -> bool {
        self.state.borrow().timer.is_some()
    }

    // ==========================================================================
    // generation
    // ==========================================================================

    /// validate, request a url and display it
    ///
    /// every failure is rendered as a notification before it is returned.
    pub async fn submit_generation(&self, script_id: &str) -> Result<GenerationResult, GenerateError> {
        let script_id = script_id.trim();
        if script_id.is_empty() {
            self.surface.show_error(MSG_SELECT_SCRIPT);
            return Err(GenerateError::Validation);
        }

        let cycle = {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Submitting {
                drop(state);
                warn!(script_id, "submission rejected, request already in flight");
                self.surface.show_error(MSG_BUSY);
                return Err(GenerateError::Busy);
            }
            state.phase = Phase::Submitting;
            state.result = None;
            state.expires_at = None;
            state.cycle
        };
        self.stop_timer();

        self.surface.hide_result();
        self.surface.set_submit_enabled(false);
        self.surface.show_loading(true);
        info!(script_id, cycle, "requesting trigger url");

        let outcome = self
            .api
            .generate(&GenerateRequest::new(script_id))
            .await
            .and_then(|resp| {
                debug!(
                    token_prefix = resp.token.as_deref().map(|t| t.get(..8).unwrap_or(t)),
                    expires_in_minutes = resp.expires_in_minutes,
                    "generate response received"
                );
                GenerationResult::from_response(&resp)
            });

        if self.state.borrow().cycle != cycle {
            debug!(cycle, "dropping response for a cycle that was reset");
            return Err(GenerateError::Superseded);
        }

        self.surface.show_loading(false);
        match outcome {
            Ok(result) => {
                info!(script_id, expires_at = %result.expires_at, "trigger url generated");
                self.display_result(result.clone());
                self.refresh_submit_enabled();
                Ok(result)
            }
            Err(err) => {
                error!(script_id, error = %err, "error generating url");
                self.state.borrow_mut().phase = Phase::Idle;
                self.surface.show_error(&err.user_message());
                self.refresh_submit_enabled();
                Err(err)
            }
        }
    }

    /// show a result and start counting down to its expiry
    pub fn display_result(&self, result: GenerationResult) {
        self.surface.show_result(&result.url);
        {
            let mut state = self.state.borrow_mut();
            state.expires_at = Some(result.expires_at);
            state.result = Some(result);
            state.phase = Phase::Displayed;
        }
        self.surface.scroll_result_into_view();
        self.start_countdown();
    }

    // ==========================================================================
    // countdown
    // ==========================================================================

    fn start_countdown(&self) {
        self.stop_timer();

        // first paint happens immediately, not one period later
        match self.countdown_tick() {
            Some(status) if !status.is_expired() => {}
            _ => return,
        }

        let this = self.this.clone();
        let handle = self.clock.every(
            self.config.tick_interval(),
            Box::new(move || {
                if let Some(controller) = this.upgrade() {
                    controller.countdown_tick();
                }
            }),
        );

        match handle {
            Some(handle) => self.state.borrow_mut().timer = Some(handle),
            None => warn!("countdown timer could not be armed"),
        }
    }

    /// recompute and render the remaining time
    ///
    /// returns None when there is nothing to count down to.
    pub fn countdown_tick(&self) -> Option<CountdownStatus> {
        let expires_at = self.state.borrow().expires_at?;
        let status = CountdownStatus::between(self.clock.now(), expires_at);
        self.surface.update_countdown_text(&status.to_string());

        if status.is_expired() {
            {
                let mut state = self.state.borrow_mut();
                state.expires_at = None;
                state.phase = Phase::Expired;
            }
            self.stop_timer();
            info!("generated url expired");
        } else {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Displayed {
                state.phase = Phase::Counting;
            }
            debug!(remaining = %status, "countdown tick");
        }
        Some(status)
    }

    fn stop_timer(&self) {
        let handle = self.state.borrow_mut().timer.take();
        if let Some(handle) = handle {
            self.clock.cancel(handle);
        }
    }

    // ==========================================================================
    // result actions
    // ==========================================================================

    /// copy the displayed url, modern api first, then the selection fallback
    pub async fn copy_to_clipboard(&self) -> Result<(), ClipboardError> {
        let Some(url) = self.current_url().filter(|u| !u.is_empty()) else {
            self.surface.show_error(MSG_NOTHING_TO_COPY);
            return Err(ClipboardError::Empty);
        };

        let outcome = match self.clipboard.write_text(&url).await {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!(error = %err, "clipboard api failed, trying selection copy");
                self.clipboard.copy_selection(&url)
            }
        };

        match outcome {
            Ok(()) => {
                info!("url copied to clipboard");
                self.surface.show_success(MSG_COPIED);
            }
            Err(err) => {
                warn!(error = %err, "could not copy url");
                self.surface.show_error(err.user_message());
            }
        }
        outcome
    }

    /// open the displayed url in a new tab; false when there is none
    pub fn open_generated_url(&self) -> bool {
        match self.current_url().filter(|u| !u.is_empty()) {
            Some(url) => {
                self.surface.open_in_new_tab(&url);
                true
            }
            None => false,
        }
    }

    /// back to Idle for a new generation cycle
    pub fn reset_form(&self) {
        self.stop_timer();
        {
            let mut state = self.state.borrow_mut();
            state.cycle += 1;
            state.phase = Phase::Idle;
            state.has_selection = false;
            state.result = None;
            state.expires_at = None;
        }
        self.surface.reset_form();
        self.surface.hide_result();
        self.surface.show_loading(false);
        self.surface.set_submit_enabled(false);
        self.surface.scroll_to_top();
    }

    // ==========================================================================
    // form helpers
    // ==========================================================================

    /// fill the script select from the catalog endpoint
    pub async fn load_scripts(&self) -> Result<usize, GenerateError> {
        match self.api.list_scripts().await {
            Ok(scripts) => {
                info!(count = scripts.len(), "scripts loaded");
                self.surface.show_scripts(&scripts);
                Ok(scripts.len())
            }
            Err(err) => {
                error!(error = %err, "error fetching scripts");
                self.surface
                    .show_error(&err.message_with_fallback(MSG_LOAD_SCRIPTS_FAILED));
                Err(err)
            }
        }
    }

    pub fn selection_changed(&self, script_id: &str) {
        self.state.borrow_mut().has_selection = !script_id.trim().is_empty();
        self.refresh_submit_enabled();
    }

    fn refresh_submit_enabled(&self) {
        let enabled = {
            let state = self.state.borrow();
            state.has_selection && state.phase != Phase::Submitting
        };
        self.surface.set_submit_enabled(enabled);
    }

    /// execute a keyboard shortcut against the current selection
    pub async fn run_shortcut(&self, shortcut: Shortcut, selected: &str) {
        match shortcut {
            Shortcut::Submit => {
                let _ = self.submit_generation(selected).await;
            }
            Shortcut::Copy => {
                let _ = self.copy_to_clipboard().await;
            }
        }
    }
}

impl<A, R, C, K: Clock> Drop for UrlGeneratorController<A, R, C, K> {
    fn drop(&mut self) {
        if let Some(handle) = self.state.get_mut().timer.take() {
            self.clock.cancel(handle);
        }
    }
}

// ==============================================================================
// tests
// ==============================================================================
