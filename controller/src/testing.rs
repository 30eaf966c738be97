//! recording fakes for headless controller tests

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, TimeZone, Utc};
use futures::channel::oneshot;
use shared::{GenerateRequest, GenerateResponse, ScriptInfo};

use crate::config::Config;
use crate::controller::UrlGeneratorController;
use crate::error::{ClipboardError, GenerateError};
use crate::ports::{Clipboard, Clock, GenerateApi, Notice, RenderSurface};

type Reply = Result<GenerateResponse, GenerateError>;

// ==============================================================================
// surface
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Loading(bool),
    SubmitEnabled(bool),
    Result(String),
    HideResult,
    Countdown(String),
    Notice(Notice),
    Scripts(Vec<String>),
    ResetForm,
    ScrollResult,
    ScrollTop,
    Open(String),
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    log: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    fn push(&self, event: SurfaceEvent) {
        self.log.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.log.borrow().clone()
    }

    pub fn saw(&self, event: &SurfaceEvent) -> bool {
        self.log.borrow().contains(event)
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn countdown_texts(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Countdown(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_submit_enabled(&self) -> Option<bool> {
        self.log.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::SubmitEnabled(on) => Some(*on),
            _ => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    fn show_loading(&self, loading: bool) {
        self.push(SurfaceEvent::Loading(loading));
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.push(SurfaceEvent::SubmitEnabled(enabled));
    }

    fn show_result(&self, url: &str) {
        self.push(SurfaceEvent::Result(url.to_string()));
    }

    fn hide_result(&self) {
        self.push(SurfaceEvent::HideResult);
    }

    fn update_countdown_text(&self, text: &str) {
        self.push(SurfaceEvent::Countdown(text.to_string()));
    }

    fn notify(&self, notice: Notice) {
        self.push(SurfaceEvent::Notice(notice));
    }

    fn show_scripts(&self, scripts: &[ScriptInfo]) {
        self.push(SurfaceEvent::Scripts(
            scripts.iter().map(|s| s.entity_id.clone()).collect(),
        ));
    }

    fn reset_form(&self) {
        self.push(SurfaceEvent::ResetForm);
    }

    fn scroll_result_into_view(&self) {
        self.push(SurfaceEvent::ScrollResult);
    }

    fn scroll_to_top(&self) {
        self.push(SurfaceEvent::ScrollTop);
    }

    fn open_in_new_tab(&self, url: &str) {
        self.push(SurfaceEvent::Open(url.to_string()));
    }
}

// ==============================================================================
// api
// ==============================================================================

#[derive(Clone)]
pub struct ScriptedApi {
    replies: Rc<RefCell<VecDeque<oneshot::Receiver<Reply>>>>,
    scripts: Rc<RefCell<Result<Vec<ScriptInfo>, GenerateError>>>,
    calls: Rc<Cell<usize>>,
    last_script_id: Rc<RefCell<Option<String>>>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            replies: Rc::default(),
            scripts: Rc::new(RefCell::new(Ok(Vec::new()))),
            calls: Rc::default(),
            last_script_id: Rc::default(),
        }
    }
}

impl ScriptedApi {
    /// queue a reply that is ready immediately
    pub fn reply(&self, reply: Reply) {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(reply);
        self.replies.borrow_mut().push_back(rx);
    }

    /// queue a reply the test completes later
    pub fn reply_later(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(rx);
        tx
    }

    pub fn set_scripts(&self, scripts: Result<Vec<ScriptInfo>, GenerateError>) {
        *self.scripts.borrow_mut() = scripts;
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_script_id(&self) -> Option<String> {
        self.last_script_id.borrow().clone()
    }
}

impl GenerateApi for ScriptedApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_script_id.borrow_mut() = Some(request.script_id.clone());
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(GenerateError::Network("reply dropped".into()))),
            None => Err(GenerateError::Network("no scripted reply".into())),
        }
    }

    async fn list_scripts(&self) -> Result<Vec<ScriptInfo>, GenerateError> {
        self.scripts.borrow().clone()
    }
}

// ==============================================================================
// clipboard
// ==============================================================================

#[derive(Clone)]
pub struct FakeClipboard {
    modern: Rc<Cell<Result<(), ClipboardError>>>,
    selection: Rc<Cell<Result<(), ClipboardError>>>,
    modern_writes: Rc<RefCell<Vec<String>>>,
    selection_writes: Rc<RefCell<Vec<String>>>,
}

impl Default for FakeClipboard {
    fn default() -> Self {
        Self {
            modern: Rc::new(Cell::new(Ok(()))),
            selection: Rc::new(Cell::new(Ok(()))),
            modern_writes: Rc::default(),
            selection_writes: Rc::default(),
        }
    }
}

impl FakeClipboard {
    pub fn set_modern(&self, outcome: Result<(), ClipboardError>) {
        self.modern.set(outcome);
    }

    pub fn set_selection(&self, outcome: Result<(), ClipboardError>) {
        self.selection.set(outcome);
    }

    pub fn modern_writes(&self) -> Vec<String> {
        self.modern_writes.borrow().clone()
    }

    pub fn selection_writes(&self) -> Vec<String> {
        self.selection_writes.borrow().clone()
    }
}

impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let outcome = self.modern.get();
        if outcome.is_ok() {
            self.modern_writes.borrow_mut().push(text.to_string());
        }
        outcome
    }

    fn copy_selection(&self, text: &str) -> Result<(), ClipboardError> {
        let outcome = self.selection.get();
        if outcome.is_ok() {
            self.selection_writes.borrow_mut().push(text.to_string());
        }
        outcome
    }
}

// ==============================================================================
// clock
// ==============================================================================

/// a clock that only moves when told to
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
    timers: Rc<RefCell<BTreeMap<u64, Rc<dyn Fn()>>>>,
    next_id: Rc<Cell<u64>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).single().unwrap_or_default();
        Self {
            now: Rc::new(Cell::new(start)),
            timers: Rc::default(),
            next_id: Rc::new(Cell::new(1)),
        }
    }
}

impl ManualClock {
    /// move time forward and fire every armed interval once
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
        let due: Vec<Rc<dyn Fn()>> = self.timers.borrow().values().cloned().collect();
        for tick in due {
            tick();
        }
    }

    pub fn active_timers(&self) -> usize {
        self.timers.borrow().len()
    }
}

impl Clock for ManualClock {
    type Handle = u64;

    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn every(&self, _period: StdDuration, tick: Box<dyn Fn()>) -> Option<u64> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.timers.borrow_mut().insert(id, Rc::from(tick));
        Some(id)
    }

    fn cancel(&self, handle: u64) {
        self.timers.borrow_mut().remove(&handle);
    }
}

// ==============================================================================
// harness
// ==============================================================================

pub type TestController = UrlGeneratorController<ScriptedApi, RecordingSurface, FakeClipboard, ManualClock>;

pub struct Harness {
    pub controller: Rc<TestController>,
    pub api: ScriptedApi,
    pub surface: RecordingSurface,
    pub clipboard: FakeClipboard,
    pub clock: ManualClock,
}

pub fn harness() -> Harness {
    let api = ScriptedApi::default();
    let surface = RecordingSurface::default();
    let clipboard = FakeClipboard::default();
    let clock = ManualClock::default();
    let controller = UrlGeneratorController::new(
        Config::default(),
        api.clone(),
        surface.clone(),
        clipboard.clone(),
        clock.clone(),
    );
    Harness { controller, api, surface, clipboard, clock }
}

pub fn ok_response(url: &str, expires_at: DateTime<Utc>) -> GenerateResponse {
    GenerateResponse {
        url: url.to_string(),
        expires_at: expires_at.to_rfc3339(),
        token: Some("abcdefghijklmnop".into()),
        expires_in_minutes: Some(10),
    }
}
