//! Decoding of raw log payloads.
//!
//! Log retrieval hands over whatever the CI API returned. Both helpers here
//! are total: malformed input degrades to "use it as text".

use std::borrow::Cow;

/// Extract log text from an API response body.
///
/// Job log endpoints answer either with the raw log or with a JSON object
/// carrying the log in a `content` field.
pub fn log_text_from_response(body: &str) -> Cow<'_, str> {
    let trimmed = body.trim_start();
    if !trimmed.starts_with('{') {
        return Cow::Borrowed(body);
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("content") {
            Some(serde_json::Value::String(content)) => Cow::Owned(content.clone()),
            _ => Cow::Borrowed(body),
        },
        _ => Cow::Borrowed(body),
    }
}

/// Decode log bytes as UTF-8, replacing invalid sequences with U+FFFD.
pub fn decode_log_bytes(raw: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(raw)
}
