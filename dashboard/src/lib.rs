//! ==============================================================================
//! lib.rs - Script URL Generator Dashboard
//! ==============================================================================
//!
//! purpose:
//!     leptos wasm front end for the script url generator. pick a script,
//!     get a temporary trigger url, copy or open it, and watch it expire.
//!
//! architecture:
//!     - leptos csr (client-side rendering)
//!     - compiled to wasm, runs in browser
//!     - state machine lives in script-url-controller; this crate only
//!       implements its ports (signals, fetch, clipboard, timers)
//!     - served by the generation service next to its api
//!
//! ==============================================================================

use std::rc::Rc;

use leptos::leptos_dom::helpers::window_event_listener;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Title};
use script_url_controller::{Config, KeyChord, Shortcut, UrlGeneratorController};
use wasm_bindgen::prelude::*;

mod api;
mod browser;
mod components;
mod logging;
mod surface;

use api::HttpApi;
use browser::{BrowserClipboard, BrowserClock};
use components::{GeneratorPanel, Header, Notifications};
use surface::{SignalSurface, UiSignals};

pub(crate) type AppController = UrlGeneratorController<HttpApi, SignalSurface, BrowserClipboard, BrowserClock>;

/// controller handle that event handlers can capture by copy
pub(crate) type SharedController = StoredValue<Rc<AppController>, LocalStorage>;

// ==============================================================================
// main entry point
// ==============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match browser::load_config() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    logging::init(&config.log_level);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring inline config, using defaults");
    }
    tracing::info!(endpoint = %config.generate_url(), "starting script url generator");

    mount_to_body(move || view! { <App config=config /> });
}

// ==============================================================================
// app component
// ==============================================================================

#[component]
fn App(config: Config) -> impl IntoView {
    provide_meta_context();

    let ui = UiSignals::new();
    let surface = SignalSurface::new(ui, config.notification_ttl());
    let api = HttpApi::new(&config);
    let controller: SharedController = StoredValue::new_local(UrlGeneratorController::new(
        config,
        api,
        surface,
        BrowserClipboard,
        BrowserClock,
    ));

    // populate the script select on mount
    Effect::new(move || {
        let controller = controller.get_value();
        spawn_local(async move {
            let _ = controller.load_scripts().await;
        });
    });

    // ctrl/cmd + enter submits, ctrl/cmd + c copies from the url field
    let _shortcuts = window_event_listener(leptos::ev::keydown, move |ev| {
        let key = ev.key();
        let focused = browser::focused_element_id();
        let chord = KeyChord {
            key: &key,
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            focused_id: focused.as_deref(),
        };
        let Some(shortcut) = Shortcut::from_chord(chord) else {
            return;
        };
        if shortcut == Shortcut::Submit {
            ev.prevent_default();
        }

        let selected = ui.selected.get_untracked();
        let controller = controller.get_value();
        spawn_local(async move {
            controller.run_shortcut(shortcut, &selected).await;
        });
    });

    view! {
        <Title text="Script URL Generator" />
        <Header controller=controller />
        <div class="container">
            <GeneratorPanel controller=controller ui=ui />
        </div>
        <Notifications ui=ui />
    }
}
