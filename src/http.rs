//! Response handling shared by the directory and post query clients, so both
//! map status codes, transport failures, and bad bodies the same way.

use crate::error::FetchError;
use reqwest::Response;
use serde_json::Value;
use tracing::{debug, error};

/// Maximum number of error body characters written to the log.
const MAX_ERROR_CHARS: usize = 200;

/// Checks the status and decodes the body as untyped JSON.
pub(crate) async fn json_body(response: Response) -> Result<Value, FetchError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        error!(
            status = status.as_u16(),
            body = %sanitize_body(&body),
            "request failed"
        );
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    debug!(status = status.as_u16(), bytes = body.len(), "response received");

    Ok(serde_json::from_slice(&body)?)
}

fn sanitize_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "<empty>".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body(b"   "), "<empty>");
        assert_eq!(sanitize_body(b"  oops \n"), "oops");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(long.as_bytes()).len(), MAX_ERROR_CHARS);
    }
}
