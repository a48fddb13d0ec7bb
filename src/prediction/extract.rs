use super::ParseFailure;

/// Marker closing the model's deliberation
pub const REASONING_DELIMITER: &str = "</think>";

/// Text following the first reasoning delimiter, up to a second one if the
/// model emitted several.
pub fn strip_reasoning(response: &str) -> Result<&str, ParseFailure> {
    response
        .split(REASONING_DELIMITER)
        .nth(1)
        .map(str::trim)
        .ok_or_else(|| ParseFailure::new(format!("no {} delimiter in response", REASONING_DELIMITER)))
}

/// First `{` through last `}`, inclusive.
pub fn json_object_span(text: &str) -> Result<&str, ParseFailure> {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(text[start..=end].trim()),
        _ => Err(ParseFailure::new("no JSON object in answer")),
    }
}

/// Locate the JSON answer in a raw model response
pub fn extract_answer(response: &str) -> Result<&str, ParseFailure> {
    json_object_span(strip_reasoning(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_reasoning() {
        let answer = strip_reasoning("<think>\nweighing it\n</think>\n\n  {\"a\": 1}  ").unwrap();
        assert_eq!(answer, "{\"a\": 1}");
    }

    #[test]
    fn test_strip_reasoning_missing_delimiter() {
        let failure = strip_reasoning("{\"error_type\": \"fatal\"}").unwrap_err();
        assert!(failure.reason().contains("</think>"));

        assert!(strip_reasoning("").is_err());
    }

    #[test]
    fn test_strip_reasoning_stops_at_second_delimiter() {
        let answer = strip_reasoning("<think>a</think> first </think> second").unwrap();
        assert_eq!(answer, "first");
    }

    #[test]
    fn test_json_object_span() {
        let span = json_object_span("Here you go: {\"a\": {\"b\": 2}} hope it helps").unwrap();
        assert_eq!(span, "{\"a\": {\"b\": 2}}");
    }

    #[test]
    fn test_json_object_span_code_fence() {
        let span = json_object_span("```json\n{\"a\": 1}\n```").unwrap();
        assert_eq!(span, "{\"a\": 1}");
    }

    #[test]
    fn test_json_object_span_without_braces() {
        assert!(json_object_span("no json here").is_err());
        assert!(json_object_span("only open {").is_err());
        assert!(json_object_span("} backwards {").is_err());
    }

    #[test]
    fn test_extract_answer() {
        let response = "<think>The line mentions a fatal error.</think>{\"error_type\":\"fatal\"}";
        assert_eq!(extract_answer(response).unwrap(), "{\"error_type\":\"fatal\"}");
    }
}
