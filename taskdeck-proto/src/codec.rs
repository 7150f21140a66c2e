//! JSON decoding for task API responses.
//!
//! Response bodies are read as raw bytes first so that a failed decode can
//! be reported with context, and so error bodies can be mined for the
//! server's `detail` message.

use crate::task::Task;

/// Error type for codec operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The body was not valid JSON for the expected shape.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Decodes a single task.
///
/// # Errors
///
/// Returns `CodecError::Deserialization` if the bytes are not a task object.
pub fn decode_task(bytes: &[u8]) -> Result<Task, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Deserialization(e.to_string()))
}

/// Decodes a JSON array of tasks, preserving server order.
///
/// # Errors
///
/// Returns `CodecError::Deserialization` if the bytes are not an array of
/// task objects.
pub fn decode_task_list(bytes: &[u8]) -> Result<Vec<Task>, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Deserialization(e.to_string()))
}

/// Extracts a human-readable message from an error response body.
///
/// Understands `{"detail": "..."}` bodies; structured `detail` values are
/// rendered as compact JSON. Anything else falls back to the trimmed body
/// text. Returns `None` for an empty body.
#[must_use]
pub fn error_detail(bytes: &[u8]) -> Option<String> {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(bytes)
        && let Some(detail) = map.get("detail")
    {
        return Some(match detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    }
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
