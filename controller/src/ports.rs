//! seams between the state machine and the host environment
//!
//! the controller never touches a dom, a fetch api or a timer directly.
//! the dashboard implements these with leptos signals and web apis, the
//! tests implement them with recording fakes.

use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::{GenerateRequest, GenerateResponse, ScriptInfo};

use crate::error::{ClipboardError, GenerateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// a transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// the rendering surface
pub trait RenderSurface {
    fn show_loading(&self, loading: bool);
    fn set_submit_enabled(&self, enabled: bool);
    fn show_result(&self, url: &str);
    fn hide_result(&self);
    fn update_countdown_text(&self, text: &str);
    /// show a notification that removes itself after a while
    fn notify(&self, notice: Notice);
    fn show_scripts(&self, scripts: &[ScriptInfo]);
    /// clear the form inputs
    fn reset_form(&self);
    fn scroll_result_into_view(&self);
    fn scroll_to_top(&self);
    fn open_in_new_tab(&self, url: &str);

    fn show_error(&self, message: &str) {
        self.notify(Notice::error(message));
    }

    fn show_success(&self, message: &str) {
        self.notify(Notice::success(message));
    }
}

/// the remote generation service
#[allow(async_fn_in_trait)]
pub trait GenerateApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerateError>;
    async fn list_scripts(&self) -> Result<Vec<ScriptInfo>, GenerateError>;
}

/// system clipboard access
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    /// asynchronous clipboard api, only in secure contexts
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
    /// legacy select-and-copy path
    fn copy_selection(&self, text: &str) -> Result<(), ClipboardError>;
}

/// wall clock plus a recurring timer
pub trait Clock {
    type Handle;

    fn now(&self) -> DateTime<Utc>;
    /// run `tick` every `period` until cancelled; None if no timer could be armed
    fn every(&self, period: Duration, tick: Box<dyn Fn()>) -> Option<Self::Handle>;
    fn cancel(&self, handle: Self::Handle);
}
