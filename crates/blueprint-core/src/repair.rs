//! Turning raw model output into a blueprint document.
//!
//! Generators return text that may carry a reasoning trace, Markdown fences,
//! or a body cut off mid-stream. [`parse_model_json`] cleans that up before
//! parsing and closes unbalanced brackets once before giving up.

use crate::error::{BlueprintError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static THINK_RE: OnceLock<Regex> = OnceLock::new();
static FENCE_OPEN_RE: OnceLock<Regex> = OnceLock::new();
static FENCE_CLOSE_RE: OnceLock<Regex> = OnceLock::new();

fn think_re() -> &'static Regex {
    THINK_RE.get_or_init(|| Regex::new(r"(?s)<think>.*?</think>").unwrap())
}

fn fence_open_re() -> &'static Regex {
    FENCE_OPEN_RE.get_or_init(|| Regex::new(r"(?m)^```(?:json|JSON)?[ \t]*\r?\n?").unwrap())
}

fn fence_close_re() -> &'static Regex {
    FENCE_CLOSE_RE.get_or_init(|| Regex::new(r"(?m)```[ \t]*$").unwrap())
}

/// Strip reasoning blocks and Markdown fences, then trim.
pub fn clean(raw: &str) -> String {
    let text = think_re().replace_all(raw, "");
    let text = fence_open_re().replace_all(&text, "");
    let text = fence_close_re().replace_all(&text, "");
    text.trim().to_string()
}

/// Append the closers a truncated document is missing: every unclosed `]`
/// first, then every unclosed `}`. Brackets inside string literals are not
/// counted.
pub fn close_truncated(text: &str) -> String {
    let mut braces: i64 = 0;
    let mut brackets: i64 = 0;
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
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
            '{' => braces += 1,
            '}' => braces -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            _ => {}
        }
    }

    let mut repaired = text.trim().to_string();
    repaired.push_str(&"]".repeat(brackets.max(0) as usize));
    repaired.push_str(&"}".repeat(braces.max(0) as usize));
    repaired
}

/// Parse model output into a blueprint object.
pub fn parse_model_json(raw: &str) -> Result<Value> {
    let text = clean(raw);
    if text.is_empty() {
        return Err(BlueprintError::InvalidBlueprint(
            "model output is empty".to_string(),
        ));
    }

    let value = match serde_json::from_str::<Value>(&text) {
        Ok(v) => v,
        Err(first) => serde_json::from_str::<Value>(&close_truncated(&text)).map_err(|_| {
            BlueprintError::InvalidBlueprint(format!("model output is not valid JSON: {first}"))
        })?,
    };

    if !value.is_object() {
        return Err(BlueprintError::InvalidBlueprint(
            "blueprint must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_object_parses() {
        let v = parse_model_json(r#"{"overview": "Taxi"}"#).unwrap();
        assert_eq!(v["overview"], "Taxi");
    }

    #[test]
    fn strips_reasoning_and_fences() {
        let raw = "<think>\nthe user wants a taxi app {[\n</think>\n```json\n{\"overview\": \"Taxi\"}\n```\n";
        let v = parse_model_json(raw).unwrap();
        assert_eq!(v["overview"], "Taxi");
    }

    #[test]
    fn strips_bare_fences() {
        let v = parse_model_json("```\n{\"a\": 1}\n```").unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn repairs_truncated_output() {
        let raw = r#"{"overview": "Taxi", "phases": [{"name": "MVP"}, {"name": "Beta"}"#;
        let v = parse_model_json(raw).unwrap();
        assert_eq!(v["phases"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn brackets_in_strings_are_ignored() {
        assert_eq!(close_truncated(r#"{"a": "[{""#), r#"{"a": "[{"}"#);
        assert_eq!(close_truncated(r#"{"a": "\"[", "b": [1"#), r#"{"a": "\"[", "b": [1]}"#);
    }

    #[test]
    fn unrepairable_output_fails() {
        assert!(matches!(
            parse_model_json("I could not produce a blueprint."),
            Err(BlueprintError::InvalidBlueprint(_))
        ));
        assert!(matches!(
            parse_model_json("<think>only thinking</think>"),
            Err(BlueprintError::InvalidBlueprint(_))
        ));
    }

    #[test]
    fn non_object_rejected() {
        let err = parse_model_json("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }
}
