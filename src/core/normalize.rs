use crate::domain::model::AiResponse;
use crate::utils::error::{DrawError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:dxf|svg)?\n?").expect("opening fence pattern is valid"));

const CLOSING_FENCE: &str = "```";

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Turns a raw AI reply into canonical drawing text.
    ///
    /// Structured replies must expose `message.content[0].text`; anything else
    /// is `MalformedResponse`. So is a reply that is empty once fences are gone.
    pub fn normalize(response: AiResponse) -> Result<String> {
        let raw = match response {
            AiResponse::Text(text) => text,
            AiResponse::Structured(value) => Self::extract_text(&value)?.to_string(),
        };

        let canonical = Self::strip_fences(&raw);
        if canonical.is_empty() {
            return Err(DrawError::malformed("response contained no drawing text"));
        }
        Ok(canonical)
    }

    /// Removes every fence marker and trims. Idempotent.
    pub fn strip_fences(raw: &str) -> String {
        let without_openers = OPENING_FENCE.replace_all(raw, "");
        without_openers.replace(CLOSING_FENCE, "").trim().to_string()
    }

    fn extract_text(value: &Value) -> Result<&str> {
        let object = value
            .as_object()
            .ok_or_else(|| DrawError::malformed("expected a JSON object or a string"))?;
        let message = object
            .get("message")
            .and_then(Value::as_object)
            .ok_or_else(|| DrawError::malformed("missing 'message' object"))?;
        let content = message
            .get("content")
            .and_then(Value::as_array)
            .ok_or_else(|| DrawError::malformed("missing 'message.content' array"))?;
        let first = content
            .first()
            .ok_or_else(|| DrawError::malformed("'message.content' is empty"))?;
        first
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| DrawError::malformed("missing 'message.content[0].text' string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_tagged_fences() {
        let text = "0\nSECTION\n2\nENTITIES\n0\nCIRCLE\n0\nENDSEC\n0\nEOF";
        let wrapped = format!("```dxf\n{}\n```", text);
        assert_eq!(ResponseNormalizer::normalize(wrapped.into()).unwrap(), text);

        let svg = "<svg viewBox=\"0 0 10 10\"></svg>";
        let wrapped = format!("```svg\n{}\n```", svg);
        assert_eq!(ResponseNormalizer::normalize(wrapped.into()).unwrap(), svg);
    }

    #[test]
    fn test_strips_untagged_and_stray_fences() {
        let raw = "  ```\nLINE\n```\nmore ``` text\n```  ";
        assert_eq!(ResponseNormalizer::strip_fences(raw), "LINE\nmore  text");
    }

    #[test]
    fn test_unknown_language_tag_is_kept_as_text() {
        // Only dxf/svg tags are consumed with the fence.
        assert_eq!(ResponseNormalizer::strip_fences("```xml\n<a/>\n```"), "xml\n<a/>");
    }

    #[test]
    fn test_idempotent_on_clean_and_dirty_text() {
        let samples = [
            "CIRCLE...",
            "```dxf\nLINE\n```",
            "``````",
            "`````dxf`",
            "``x```svg``",
            "  <svg/>\n\n",
            "```svg```dxf\n```",
        ];
        for sample in samples {
            let once = ResponseNormalizer::strip_fences(sample);
            let twice = ResponseNormalizer::strip_fences(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
            assert!(!once.contains("```"), "fence left in {:?}", once);
        }
    }

    #[test]
    fn test_structured_response() {
        let value = json!({"message": {"content": [{"type": "text", "text": "X"}]}});
        let text = ResponseNormalizer::normalize(AiResponse::Structured(value)).unwrap();
        assert_eq!(text, "X");
    }

    #[test]
    fn test_structured_response_is_fence_stripped() {
        let value = json!({"message": {"content": [{"text": "```svg\n<svg/>\n```"}]}});
        let text = ResponseNormalizer::normalize(AiResponse::Structured(value)).unwrap();
        assert_eq!(text, "<svg/>");
    }

    #[test]
    fn test_malformed_structured_shapes() {
        let shapes = [
            json!({"message": {}}),
            json!({"message": {"content": []}}),
            json!({"message": {"content": [{"type": "image"}]}}),
            json!({"message": {"content": "text"}}),
            json!({"message": "hello"}),
            json!({"text": "X"}),
            json!(42),
            json!(null),
        ];
        for shape in shapes {
            let result = ResponseNormalizer::normalize(AiResponse::Structured(shape.clone()));
            assert!(
                matches!(result, Err(DrawError::MalformedResponse { .. })),
                "expected malformed for {}",
                shape
            );
        }
    }

    #[test]
    fn test_empty_reply_is_malformed() {
        let result = ResponseNormalizer::normalize("```dxf\n\n```".into());
        assert!(matches!(result, Err(DrawError::MalformedResponse { .. })));
    }
}
