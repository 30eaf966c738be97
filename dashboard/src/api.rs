//! ==============================================================================
//! api.rs - http client for the generation service
//! ==============================================================================
//!
//! transport only: send the request, hand status + body to the controller's
//! interpreters. what a failure means is decided there, not here.

use gloo_net::http::Request;
use script_url_controller::{interpret_generate, interpret_scripts, Config, GenerateApi, GenerateError};
use shared::{GenerateRequest, GenerateResponse, ScriptInfo};

pub struct HttpApi {
    generate_url: String,
    scripts_url: String,
}

impl HttpApi {
    pub fn new(config: &Config) -> Self {
        Self {
            generate_url: config.generate_url(),
            scripts_url: config.scripts_url(),
        }
    }
}

/// send a request and read the whole body as text
async fn exchange(request: Request) -> Result<(u16, String), GenerateError> {
    let response = request
        .send()
        .await
        .map_err(|e| GenerateError::Network(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GenerateError::Network(e.to_string()))?;
    Ok((status, body))
}

impl GenerateApi for HttpApi {
    /// POST the script id
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        let body = serde_json::to_string(request).map_err(|e| GenerateError::Decode(e.to_string()))?;
        let request = Request::post(&self.generate_url)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        let (status, body) = exchange(request).await?;
        interpret_generate(status, &body)
    }

    /// GET the selectable scripts
    async fn list_scripts(&self) -> Result<Vec<ScriptInfo>, GenerateError> {
        let request = Request::get(&self.scripts_url)
            .build()
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        let (status, body) = exchange(request).await?;
        interpret_scripts(status, &body)
    }
}
