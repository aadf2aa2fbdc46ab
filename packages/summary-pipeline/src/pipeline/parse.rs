//! Best-effort JSON recovery from model output.
//!
//! Models wrap JSON in markdown fences, prepend chatter, or return plain
//! prose. Recovery strips fences, takes the first balanced `{...}` block and
//! parses it; anything that fails becomes [`AiParse::Fallback`] carrying the
//! raw text. This module never errors.

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::extraction::AiParse;

lazy_static! {
    static ref CODE_FENCE_REGEX: Regex = Regex::new(r"```[A-Za-z0-9_-]*").unwrap();
}

/// Parse model output into `T`, falling back to the raw text.
pub fn parse_ai_json<T: DeserializeOwned>(raw: &str) -> AiParse<T> {
    let stripped = strip_code_fences(raw);
    let Some(candidate) = first_json_object(&stripped) else {
        debug!(len = raw.len(), "No JSON object in model output");
        return AiParse::Fallback(raw.to_string());
    };

    match serde_json::from_str::<T>(candidate) {
        Ok(value) => AiParse::Structured(value),
        Err(e) => {
            debug!(error = %e, "Model output JSON did not parse");
            AiParse::Fallback(raw.to_string())
        }
    }
}

/// Remove markdown code fences (```` ```json ```` and ```` ``` ````).
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE_REGEX.replace_all(raw, "").trim().to_string()
}

/// Locate the first balanced `{...}` block, ignoring braces inside JSON
/// strings. Returns `None` when no block closes.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::extraction::CorrespondenceFields;
    use serde_json::Value;

    #[test]
    fn test_plain_json() {
        let parsed: AiParse<Value> = parse_ai_json(r#"{"insight": "ok"}"#);
        assert_eq!(parsed, AiParse::Structured(serde_json::json!({"insight": "ok"})));
    }

    #[test]
    fn test_fenced_json_with_chatter() {
        let raw = "Here is the analysis you asked for:\n```json\n{\"messages\": [\"Confirm anchor bolts\"], \"insight\": \"Open structural RFI\"}\n```\nLet me know!";
        let parsed: AiParse<CorrespondenceFields> = parse_ai_json(raw);

        match parsed {
            AiParse::Structured(fields) => {
                assert_eq!(fields.messages, vec!["Confirm anchor bolts"]);
                assert_eq!(fields.insight.as_deref(), Some("Open structural RFI"));
            }
            AiParse::Fallback(raw) => panic!("expected structured, got fallback: {raw}"),
        }
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"prefix {"a": "has } brace", "b": {"c": "\"quoted {"}} trailing }"#;
        assert_eq!(
            first_json_object(text),
            Some(r#"{"a": "has } brace", "b": {"c": "\"quoted {"}}"#)
        );
    }

    #[test]
    fn test_unbalanced_returns_none() {
        assert_eq!(first_json_object(r#"{"a": {"b": 1}"#), None);
        assert_eq!(first_json_object("no braces here"), None);
    }

    #[test]
    fn test_prose_falls_back_to_raw_text() {
        let raw = "The RFI asks about door hardware; no budget impact.";
        let parsed: AiParse<CorrespondenceFields> = parse_ai_json(raw);
        assert_eq!(parsed, AiParse::Fallback(raw.to_string()));
    }

    #[test]
    fn test_invalid_json_falls_back_to_raw_text() {
        let raw = "```json\n{messages: [unquoted]}\n```";
        let parsed: AiParse<CorrespondenceFields> = parse_ai_json(raw);
        assert_eq!(parsed, AiParse::Fallback(raw.to_string()));
    }

    #[test]
    fn test_empty_output() {
        let parsed: AiParse<Value> = parse_ai_json("");
        assert_eq!(parsed, AiParse::Fallback(String::new()));
    }
}
