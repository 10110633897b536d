//! HTTP client wrapper for downloading from EUR-Lex and the Publications
//! Office.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("eurlex-harvester/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Upper bound on a server-suggested Retry-After delay (seconds).
const MAX_RETRY_AFTER_SECS: u64 = 30;

/// Create a configured HTTP client.
///
/// The cookie store is enabled: the Publications Office keys its
/// "document is being generated" state to the session, so retries must
/// present the same cookies.
///
/// # Errors
/// Returns an error if the client cannot be constructed.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .build()?;
    Ok(client)
}

/// Download content from a URL with retry logic.
///
/// Uses exponential backoff for transient failures (network errors, 5xx
/// responses) and honors a bounded `Retry-After` when the server reports
/// that the document is still being generated (202).
///
/// # Errors
/// Returns `RetriesExhausted` after the bounded attempts, or the
/// underlying HTTP error for non-retryable failures.
pub fn download_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    download_bytes_accept(client, url, None)
}

/// Download content with an explicit `Accept` header.
///
/// # Errors
/// Same failure modes as [`download_bytes`].
pub fn download_bytes_accept(client: &Client, url: &str, accept: Option<&str>) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;
    let mut suggested_delay: Option<u64> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms, 2000ms, unless the
            // server suggested its own delay.
            let delay = suggested_delay.take().map_or_else(
                || Duration::from_millis(RETRY_BASE_DELAY_MS * (1 << (attempt - 1))),
                Duration::from_secs,
            );
            tracing::debug!(attempt, ?delay, "Retrying after delay");
            thread::sleep(delay);
        }

        let mut request = client.get(url);
        if let Some(accept) = accept {
            request = request.header(reqwest::header::ACCEPT, accept);
        }

        match request.send() {
            Ok(response) => {
                let status = response.status();

                // The Publications Office answers 202 while it is still
                // assembling the requested edition.
                if status == StatusCode::ACCEPTED {
                    suggested_delay = retry_after_secs(&response);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        retry_after = ?suggested_delay,
                        "Document still being generated, will retry"
                    );
                    last_error = Some("Document still being generated".to_string());
                    continue;
                }

                // Retry on server errors (5xx).
                if status.is_server_error() {
                    suggested_delay = retry_after_secs(&response);
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                // Don't retry client errors (4xx) - they won't succeed.
                let response = response.error_for_status()?;
                let bytes = response.bytes()?;
                return Ok(bytes.to_vec());
            }
            Err(e) => {
                // Retry on connection/timeout errors.
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                // Other errors (like invalid URL) - don't retry.
                return Err(HarvesterError::Http(e));
            }
        }
    }

    // All retries exhausted.
    Err(HarvesterError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Parse a bounded `Retry-After` seconds value from a response.
fn retry_after_secs(response: &reqwest::blocking::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.min(MAX_RETRY_AFTER_SECS))
}

/// Decode downloaded bytes as UTF-8, replacing invalid sequences.
///
/// Official sources occasionally serve mislabeled encodings; a lossy
/// conversion with a diagnostic beats failing the whole document.
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::warn!(context, "Invalid UTF-8, converting lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_bytes_to_string_valid() {
        assert_eq!(bytes_to_string(b"hello", "test"), "hello");
    }

    #[test]
    fn test_bytes_to_string_lossy() {
        let result = bytes_to_string(&[0x68, 0xFF, 0x69], "test");
        assert!(result.starts_with('h'));
        assert!(result.ends_with('i'));
    }
}
