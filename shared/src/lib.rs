//! ==============================================================================
//! lib.rs - shared wire types for the script url generator
//! ==============================================================================
//!
//! purpose:
//!     defines the json shapes exchanged with the generation service.
//!     the service mints a short-lived trigger url for a script and the
//!     browser client displays it until the expiry instant passes.
//!
//! relationships:
//!     - used by: controller (response interpretation, GenerateApi port)
//!     - used by: dashboard (http client, script select)
//!
//! api:
//!     POST /api/generate
//!         body: {"script_id": "script.garage_open"}
//!         response: {"url": "...", "expires_at": "2025-01-01T12:10:00", ...}
//!         failure: {"detail": "Script not found"}
//!     GET /api/scripts
//!         response: [{"entity_id": "script.garage_open", "name": "Garage"}]
//!
//! ==============================================================================

use serde::{Deserialize, Serialize};

// ==============================================================================
// generation types
// ==============================================================================

/// body of a generate request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// entity id of the script the url will trigger
    pub script_id: String,
}

impl GenerateRequest {
    pub fn new(script_id: impl Into<String>) -> Self {
        Self { script_id: script_id.into() }
    }
}

/// successful generate response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// fully qualified trigger url
    pub url: String,
    /// iso-8601 expiry instant, with or without an offset
    pub expires_at: String,
    /// raw token embedded in the url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// configured lifetime on the server side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_minutes: Option<u32>,
}

/// body returned with a non-success status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

// ==============================================================================
// script catalog types
// ==============================================================================

/// one selectable script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub entity_id: String,
    /// friendly name shown in the select
    pub name: String,
}

// ==============================================================================
// tests
// ==============================================================================
