//! ==============================================================================
//! lib.rs - headless core of the script url generator
//! ==============================================================================
//!
//! purpose:
//!     the state machine behind the one-page generator form. submits a script
//!     id to the generation service, shows the returned trigger url and counts
//!     down to its expiry instant.
//!
//! relationships:
//!     - uses: shared (wire types)
//!     - used by: dashboard (implements the ports with leptos + web apis)
//!
//! design:
//!     the controller talks to the outside world only through the traits in
//!     `ports`, so every transition can be driven from a native test without
//!     a browser.
//!
//! ==============================================================================

pub mod config;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod ports;
pub mod response;
pub mod shortcuts;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use controller::{Phase, UrlGeneratorController};
pub use countdown::{format_seconds, CountdownStatus, EXPIRED_TEXT};
pub use error::{ClipboardError, ConfigError, GenerateError};
pub use ports::{Clipboard, Clock, GenerateApi, Notice, NoticeKind, RenderSurface};
pub use response::{interpret_generate, interpret_scripts, parse_expiry, GenerationResult};
pub use shortcuts::{KeyChord, Shortcut, GENERATED_URL_ID};
