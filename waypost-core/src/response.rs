// Decoding of raw AI backend responses

use crate::error::{Result, WaypostError};
use serde::de::DeserializeOwned;
use tracing::debug;

const DEMO_PLAN: &str = include_str!("../data/demo_plan.json");

/// Strip Markdown code fences and surrounding prose down to the outermost
/// JSON object in `raw`.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Decode a model response into `T`, tolerating fenced or chatty output.
pub fn parse_ai_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let body = extract_json_object(raw).ok_or(WaypostError::EmptyResponse)?;
    if body.len() != raw.trim().len() {
        debug!(
            "Trimmed {} bytes of non-JSON text from response",
            raw.len() - body.len()
        );
    }
    Ok(serde_json::from_str(body)?)
}

/// The bundled demo plan served when no AI response is available.
pub fn demo_plan_source() -> &'static str {
    DEMO_PLAN
}
