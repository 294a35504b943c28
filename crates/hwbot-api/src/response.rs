//! Payload validation and status parsing.

use serde_json::Value;
use tracing::warn;

use crate::error::{ApiError, Result};

/// Notification template; wording kept stable for existing chat history.
const STATUS_TEMPLATE: &str = "Изменился статус проверки работы";

/// Known review statuses and their human-readable verdicts.
const VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

/// Look up the verdict sentence for a status, if it is a known one.
pub fn verdict_for(status: &str) -> Option<&'static str> {
    VERDICTS
        .iter()
        .find(|(key, _)| *key == status)
        .map(|(_, verdict)| *verdict)
}

/// Confirm the shape of a decoded API payload.
///
/// Returns the homework sequence and the new cursor value unmodified.
/// Individual records are not inspected here; that is [`parse_status`]'s job.
/// An empty sequence is valid and means "nothing new".
pub fn validate(payload: Value) -> Result<(Vec<Value>, i64)> {
    let mut map = match payload {
        Value::Object(map) => map,
        other => {
            return Err(ApiError::Shape(format!(
                "payload must be an object, got {}",
                json_type(&other)
            )))
        }
    };

    let homeworks = match map.remove("homeworks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(got = json_type(&other), "homeworks key has wrong type");
            return Err(ApiError::Shape(format!(
                "homeworks must be an array, got {}",
                json_type(&other)
            )));
        }
        None => return Err(ApiError::MissingField("homeworks")),
    };

    let cursor = map
        .get("current_date")
        .ok_or(ApiError::MissingField("current_date"))?
        .as_i64()
        .ok_or_else(|| ApiError::Shape("current_date must be an integer".into()))?;

    Ok((homeworks, cursor))
}

/// Render the notification string for one homework record.
pub fn parse_status(record: &Value) -> Result<String> {
    let name = record
        .get("homework_name")
        .ok_or(ApiError::MissingField("homework_name"))?
        .as_str()
        .ok_or_else(|| ApiError::Shape("homework_name must be a string".into()))?;

    let status = record
        .get("status")
        .ok_or(ApiError::MissingField("status"))?
        .as_str()
        .ok_or_else(|| ApiError::Shape("status must be a string".into()))?;

    let verdict =
        verdict_for(status).ok_or_else(|| ApiError::UnknownStatus(status.to_string()))?;

    Ok(format!("{STATUS_TEMPLATE} \"{name}\". {verdict}"))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
