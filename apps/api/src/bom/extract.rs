//! Response Extractor/Validator — digs a BOM JSON object out of the model's
//! free-text reply and checks it against the required schema.
//!
//! Models routinely wrap the object in prose or markdown fences despite the
//! prompt, so selection is tolerant; validation is not. A missing mandatory
//! field is always an error, never defaulted.

use serde_json::Value;
use thiserror::Error;

use crate::bom::models::{BomDocument, MANDATORY_ITEM_FIELDS};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid JSON in model response: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("model response has no non-empty bom list")]
    InvalidStructure,

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Extracts and validates a [`BomDocument`] from a raw model reply.
pub fn extract_bom(raw_text: &str) -> Result<BomDocument, ExtractionError> {
    let payload = select_payload(raw_text);
    let value: Value = serde_json::from_str(payload)?;

    let items = value
        .get("bom")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or(ExtractionError::InvalidStructure)?;

    // Item-by-item, field-by-field in document order; report the first
    // field missing anywhere.
    for item in items {
        for field in MANDATORY_ITEM_FIELDS {
            if item.get(field).is_none() {
                return Err(ExtractionError::MissingField(field));
            }
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Picks the substring most likely to be the JSON payload:
/// a fenced code block anywhere in the text, else the span from the first
/// `{` to the last `}`, else the whole text.
fn select_payload(raw: &str) -> &str {
    if let Some(inner) = fenced_block(raw) {
        return inner;
    }
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if end > start {
            return &raw[start..=end];
        }
    }
    raw
}

/// Inner content of the first triple-backtick block, optionally tagged
/// `json`. Requires a closing fence; an unterminated fence falls through to
/// brace scanning.
fn fenced_block(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let mut rest = &raw[open + 3..];
    if let Some(stripped) = rest.strip_prefix("json") {
        rest = stripped;
    }
    let close = rest.find("```")?;
    Some(rest[..close].trim())
}
