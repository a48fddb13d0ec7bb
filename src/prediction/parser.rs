use super::extract::extract_answer;
use super::{ErrorType, ParseFailure, Prediction, Severity};
use serde_json::{Map, Value};
use tracing::warn;

/// Parse a raw model response into a prediction for `input`.
///
/// Missing keys leave the field unset. Unknown labels and non-string values
/// are treated the same way.
pub fn parse_prediction(input: &str, response: &str) -> Result<Prediction, ParseFailure> {
    let answer = extract_answer(response)?;

    let value: Value = serde_json::from_str(answer)
        .map_err(|e| ParseFailure::new(format!("invalid JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| ParseFailure::new("answer is not a JSON object"))?;

    Ok(Prediction::new(
        input,
        label_field(object, "error_type", ErrorType::from_label),
        label_field(object, "severity", Severity::from_label),
        text_field(object, "description"),
        text_field(object, "solution"),
    ))
}

/// Parse, substituting the fallback prediction on failure
pub fn parse_or_fallback(input: &str, response: &str) -> (Prediction, Option<ParseFailure>) {
    match parse_prediction(input, response) {
        Ok(prediction) => (prediction, None),
        Err(failure) => {
            warn!("Falling back to default prediction: {}", failure);
            (Prediction::fallback(input), Some(failure))
        }
    }
}

fn label_field<T>(object: &Map<String, Value>, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    let raw = text_field(object, key)?;
    let label = parse(raw.trim());
    if label.is_none() {
        warn!("Ignoring unknown {} label '{}'", key, raw);
    }
    label
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            warn!("Ignoring non-string {} value: {}", key, other);
            None
        }
    }
}
