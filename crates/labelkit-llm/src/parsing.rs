//! Parsing of chat-completions responses into classifications.

use crate::error::{LlmError, LlmResult};
use labelkit_core::Classification;
use serde_json::Value;

const SNIPPET_LEN: usize = 120;

/// Extract the assistant text from `choices[0].message.content`.
pub(crate) fn extract_content(response: &Value) -> LlmResult<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LlmError::InvalidResponse {
            message: "response missing choices[0].message.content".to_string(),
        })
}

/// Parse an assistant answer.
///
/// JSON (optionally inside a Markdown code fence) is tried first, then the
/// `<classification>` / `<explanation>` tag format. Both fields are trimmed;
/// an empty classification is rejected.
pub(crate) fn parse_classification(content: &str) -> LlmResult<Classification> {
    let parsed = parse_json(content).or_else(|| parse_tagged(content));
    match parsed {
        Some(c) if !c.classification.is_empty() => Ok(c),
        _ => Err(LlmError::InvalidResponse {
            message: format!("could not parse classification from '{}'", snippet(content)),
        }),
    }
}

fn parse_json(content: &str) -> Option<Classification> {
    let body = strip_code_fence(content.trim());
    let raw: Classification = serde_json::from_str(body).ok()?;
    Some(Classification {
        classification: raw.classification.trim().to_string(),
        explanation: raw.explanation.trim().to_string(),
    })
}

fn parse_tagged(content: &str) -> Option<Classification> {
    Some(Classification {
        classification: tag_body(content, "classification")?.to_string(),
        explanation: tag_body(content, "explanation")?.to_string(),
    })
}

fn tag_body<'a>(content: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = content.find(&open)? + open.len();
    let len = content[start..].find(&close)?;
    Some(content[start..start + len].trim())
}

fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop the info string (`json`) up to the first newline.
    let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn snippet(content: &str) -> String {
    let trimmed = content.trim();
    match trimmed.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_content() {
        let response = json!({
            "choices": [{ "message": { "role": "assistant", "content": "hello" } }]
        });
        assert_eq!(extract_content(&response).unwrap(), "hello");
    }

    #[test]
    fn test_extract_content_missing() {
        let response = json!({ "choices": [] });
        assert!(matches!(
            extract_content(&response),
            Err(LlmError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_parse_json_answer() {
        let c = parse_classification(r#"{"classification":" Pass ","explanation":"clean edge"}"#)
            .unwrap();
        assert_eq!(c.classification, "Pass");
        assert_eq!(c.explanation, "clean edge");
    }

    #[test]
    fn test_parse_fenced_json_answer() {
        let content = "```json\n{\"classification\":\"fail\",\"explanation\":\"dent\"}\n```";
        let c = parse_classification(content).unwrap();
        assert_eq!(c.classification, "fail");
        assert_eq!(c.explanation, "dent");
    }

    #[test]
    fn test_parse_tagged_answer() {
        let content = "Looking at the part.\n<classification>\nFail\n</classification>\n\
                       <explanation>Thread is stripped.</explanation>";
        let c = parse_classification(content).unwrap();
        assert_eq!(c.classification, "Fail");
        assert_eq!(c.explanation, "Thread is stripped.");
    }

    #[test]
    fn test_tagged_answer_needs_both_tags() {
        let content = "<classification>Pass</classification>";
        assert!(parse_classification(content).is_err());
    }

    #[test]
    fn test_empty_classification_is_rejected() {
        let content = r#"{"classification":"  ","explanation":"unsure"}"#;
        assert!(parse_classification(content).is_err());
    }

    #[test]
    fn test_free_text_is_rejected() {
        let err = parse_classification("I think it passes.").unwrap_err();
        assert!(err.to_string().contains("I think it passes."));
    }

    #[test]
    fn test_snippet_truncates_long_answers() {
        let long = "x".repeat(500);
        let s = snippet(&long);
        assert!(s.ends_with("..."));
        assert_eq!(s.len(), SNIPPET_LEN + 3);
    }
}
