//! turning raw http exchanges into typed outcomes
//!
//! the transport layer only reports a status code and a body. everything
//! about what a failure means lives here so it can be tested without a
//! browser.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use shared::{ErrorBody, GenerateResponse, ScriptInfo};

use crate::error::GenerateError;

/// the sole piece of session state: a url and its expiry instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn from_response(resp: &GenerateResponse) -> Result<Self, GenerateError> {
        Ok(Self {
            url: resp.url.clone(),
            expires_at: parse_expiry(&resp.expires_at)?,
        })
    }
}

/// parse an expiry instant
///
/// accepts rfc 3339 with an offset, or a naive iso-8601 date-time which is
/// read in the local zone (the service emits naive local timestamps).
pub fn parse_expiry(raw: &str) -> Result<DateTime<Utc>, GenerateError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive: NaiveDateTime = raw
        .parse()
        .map_err(|_| GenerateError::InvalidExpiry(raw.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| GenerateError::InvalidExpiry(raw.to_string()))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// pull `detail` out of an error body, tolerating non-json bodies
fn rejection(status: u16, body: &str) -> GenerateError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);
    GenerateError::Rejected { status, detail }
}

/// interpret the answer to POST /api/generate
pub fn interpret_generate(status: u16, body: &str) -> Result<GenerateResponse, GenerateError> {
    if !is_success(status) {
        return Err(rejection(status, body));
    }
    serde_json::from_str(body).map_err(|e| GenerateError::Decode(e.to_string()))
}

/// interpret the answer to GET /api/scripts
pub fn interpret_scripts(status: u16, body: &str) -> Result<Vec<ScriptInfo>, GenerateError> {
    if !is_success(status) {
        return Err(rejection(status, body));
    }
    serde_json::from_str(body).map_err(|e| GenerateError::Decode(e.to_string()))
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_success_body() {
        let resp = interpret_generate(
            200,
            r#"{"url":"https://x/y","expires_at":"2025-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(resp.url, "https://x/y");
    }

    #[test]
    fn test_failure_with_detail() {
        let err = interpret_generate(404, r#"{"detail":"bad id"}"#).unwrap_err();
        assert_eq!(err, GenerateError::Rejected { status: 404, detail: Some("bad id".into()) });
        assert_eq!(err.user_message(), "bad id");
    }

    #[test]
    fn test_failure_without_detail() {
        let err = interpret_generate(500, "{}").unwrap_err();
        assert_eq!(err.user_message(), "Failed to generate URL");
    }

    #[test]
    fn test_failure_with_html_body() {
        let err = interpret_generate(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err, GenerateError::Rejected { status: 502, detail: None });
    }

    #[test]
    fn test_success_with_garbage_body() {
        let err = interpret_generate(200, "not json").unwrap_err();
        assert!(matches!(err, GenerateError::Decode(_)));
    }

    #[test]
    fn test_rate_limit_detail() {
        let err = interpret_generate(
            429,
            r#"{"detail":"Maximum tokens (5) reached for this script"}"#,
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "Maximum tokens (5) reached for this script");
    }

    #[test]
    fn test_scripts_list() {
        let scripts = interpret_scripts(
            200,
            r#"[{"entity_id":"script.a","name":"A"},{"entity_id":"script.b","name":"B"}]"#,
        )
        .unwrap();
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[1].entity_id, "script.b");
    }

    #[test]
    fn test_parse_expiry_with_offset() {
        let dt = parse_expiry("2025-03-01T10:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_expiry_naive_local() {
        let dt = parse_expiry("2025-03-01T10:00:00.123456").unwrap();
        let local = dt.with_timezone(&Local);
        assert_eq!(local.minute(), 0);
        assert_eq!(local.second(), 0);
    }

    #[test]
    fn test_parse_expiry_rejects_garbage() {
        let err = parse_expiry("in ten minutes").unwrap_err();
        assert!(matches!(err, GenerateError::InvalidExpiry(_)));
    }

    #[test]
    fn test_result_from_response() {
        let resp = GenerateResponse {
            url: "https://x/y".into(),
            expires_at: "2025-03-01T10:00:00Z".into(),
            token: None,
            expires_in_minutes: Some(10),
        };
        let result = GenerationResult::from_response(&resp).unwrap();
        assert_eq!(result.url, "https://x/y");
        assert_eq!(result.expires_at.hour(), 10);
    }
}
