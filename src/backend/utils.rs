use tracing::{debug, error, trace};

use crate::error::{MediSageError, Result};
use crate::model::Instructor;

/// Extract JSON from markdown code blocks if present, otherwise return the content as-is.
///
/// Some models wrap JSON replies in ```json ... ``` or ``` ... ``` fences even when
/// asked for a bare JSON body.
pub fn extract_json_from_markdown(content: &str) -> &str {
    let trimmed = content.trim();

    if trimmed.starts_with("```") {
        // Skip the opening fence line, then cut at the closing fence
        if let Some(start_idx) = trimmed.find('\n') {
            let after_start = &trimmed[start_idx + 1..];
            if let Some(end_idx) = after_start.rfind("```") {
                return after_start[..end_idx].trim();
            }
        }
    }

    trimmed
}

/// Parse a backend reply body into `T` and run its validation hook.
///
/// Anything that does not deserialize into `T` (invalid JSON, a missing or
/// null required field, a wrong field type) is a
/// [`MalformedResponse`](MediSageError::MalformedResponse). String fields are
/// taken exactly as they appear in the reply.
pub fn parse_structured<T: Instructor>(content: &str) -> Result<T> {
    let json_content = extract_json_from_markdown(content);
    trace!(json = %json_content, "Attempting to parse reply as JSON");

    let result: T = serde_json::from_str(json_content).map_err(|e| {
        error!(
            error = %e,
            partial_json = %json_content,
            type_name = std::any::type_name::<T>(),
            "Reply does not match the requested shape"
        );
        MediSageError::MalformedResponse(format!("{}\nReply: {}", e, json_content))
    })?;

    if let Err(e) = result.validate() {
        error!(error = ?e, "Custom validation failed");
        return Err(e);
    }

    debug!("Reply parsed and validated");
    Ok(result)
}

/// Convert a reqwest error into a `BackendUnavailable`.
///
/// The request URL is stripped from the error first; it never reaches the
/// message or the logs.
#[cfg(feature = "gemini")]
pub(crate) fn handle_http_error(e: reqwest::Error, provider_name: &str) -> MediSageError {
    let e = e.without_url();
    error!(error = %e, "HTTP request to {} failed", provider_name);
    if e.is_timeout() {
        MediSageError::BackendUnavailable(format!("{} request timed out", provider_name))
    } else {
        MediSageError::BackendUnavailable(format!("{} request failed: {}", provider_name, e))
    }
}

/// Check HTTP response status and extract error message if unsuccessful.
#[cfg(feature = "gemini")]
pub(crate) async fn check_response_status(
    response: reqwest::Response,
    provider_name: &str,
) -> Result<reqwest::Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        error!(
            status = %status,
            error = %error_text,
            "{} API returned error response", provider_name
        );
        return Err(MediSageError::BackendUnavailable(format!(
            "{} API error ({}): {}",
            provider_name, status, error_text
        )));
    }
    Ok(response)
}
