//! Extracting structured JSON from model responses.
//!
//! Judgment models are asked for a single JSON object, but responses
//! routinely arrive wrapped in markdown fences or preceded by commentary.
//! This module isolates the scraping so that parse failures stay a local,
//! testable concern: callers map the error to their default path instead
//! of letting it escape into orchestration.

use scriptorium_error::{EngineError, EngineErrorKind, ScriptoriumResult};

/// Extract a JSON payload from a response that may contain markdown or
/// surrounding prose.
///
/// Strategies, in order:
/// 1. ```` ```json ```` fenced block (or an unlabeled fence)
/// 2. first balanced `{ ... }` object
/// 3. first balanced `[ ... ]` array
///
/// # Errors
///
/// Returns an error when no candidate JSON is found.
///
/// # Examples
///
/// ```
/// use scriptorium_engine::extract_json;
///
/// let response = "Here you go:\n```json\n{\"overall\": 0.8}\n```\nHope it helps!";
/// assert_eq!(extract_json(response).unwrap(), "{\"overall\": 0.8}");
/// ```
pub fn extract_json(response: &str) -> ScriptoriumResult<String> {
    if let Some(json) = fenced_block(response) {
        return Ok(json);
    }
    if let Some(json) = balanced(response, '{', '}') {
        return Ok(json);
    }
    if let Some(json) = balanced(response, '[', ']') {
        return Ok(json);
    }

    tracing::warn!(
        response_len = response.len(),
        "No JSON found in model response"
    );
    Err(EngineError::new(EngineErrorKind::JsonExtraction(format!(
        "no JSON object in response ({} chars)",
        response.len()
    )))
    .into())
}

/// Parse extracted JSON into a concrete type.
///
/// # Errors
///
/// Returns an error when the payload does not match `T`.
pub fn parse_json<T>(json: &str) -> ScriptoriumResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json).map_err(|e| {
        let preview: String = json.chars().take(80).collect();
        tracing::warn!(error = %e, preview = %preview, "JSON parsing failed");
        EngineError::new(EngineErrorKind::JsonExtraction(format!(
            "parse failed: {} (payload starts: {})",
            e, preview
        )))
        .into()
    })
}

/// Pull the body out of a markdown code fence, preferring a `json` label.
fn fenced_block(response: &str) -> Option<String> {
    for opener in ["```json", "```"] {
        if let Some(start) = response.find(opener) {
            let body_start = start + opener.len();
            // Skip a language tag on the unlabeled form.
            let body_start = if opener == "```" {
                response[body_start..]
                    .find('\n')
                    .map(|n| body_start + n + 1)
                    .unwrap_or(body_start)
            } else {
                body_start
            };
            let body = match response[body_start..].find("```") {
                Some(end) => &response[body_start..body_start + end],
                // Unterminated fence: treat the remainder as the body, the
                // common shape of a truncated response.
                None => &response[body_start..],
            };
            let body = body.trim();
            if !body.is_empty() {
                return Some(body.to_string());
            }
        }
    }
    None
}

/// First balanced `open`..`close` span, nesting-aware and string-aware.
fn balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in response[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}
