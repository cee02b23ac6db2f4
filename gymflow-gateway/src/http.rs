//! Shared HTTP request plumbing.
//!
//! Every backend call goes through [`HttpUtils::execute_request`]: send the
//! request, log it, classify transport failures, and hand the body back for
//! endpoint-specific parsing. No automatic retries: each call is a
//! user-triggered one-shot and a failure is surfaced as-is.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{GatewayError, Result};

/// Maximum number of bytes of a response body echoed into debug logs.
const LOG_BODY_LIMIT: usize = 512;

/// HTTP tool function set.
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and body text.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `method` - HTTP verb, for logging
    /// * `path` - request path, for logging
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<(u16, String)> {
        log::debug!("{method} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                GatewayError::Network {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("{method} {path} -> {status_code}");

        // Gateway-level upstream failures carry no usable business payload.
        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Server unavailable (HTTP {status_code})");
            return Err(GatewayError::Network {
                detail: format!("HTTP {status_code}: {body}"),
            });
        }

        let body = response.text().await.map_err(|e| GatewayError::Network {
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!("Response body: {}", truncate_for_log(&body));

        Ok((status_code, body))
    }

    /// Parses a JSON response body into `T`.
    pub fn parse_json<T>(body: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(body));
            GatewayError::Parse {
                detail: e.to_string(),
            }
        })
    }
}

/// Truncates a response body for logging.
///
/// Cuts on a character boundary and appends the total size so oversized
/// payloads stay readable in the log without flooding it.
pub(crate) fn truncate_for_log(s: &str) -> String {
    if s.len() <= LOG_BODY_LIMIT {
        return s.to_string();
    }
    let cut: String = s.chars().take(LOG_BODY_LIMIT / 4).collect();
    format!("{cut}... [truncated, total {} bytes]", s.len())
}
