//! Reqwest implementation of [`VisitorGateway`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{GENERIC_FAILURE_MSG, GatewayError, Result};
use crate::http::HttpUtils;
use crate::traits::VisitorGateway;
use crate::types::{
    Club, ConversionPayload, ConversionReceipt, CreateVisitorRequest, DataEnvelope,
    FlaggedEnvelope, ListEnvelope, Page, UpdateVisitorRequest, Visitor, VisitorStatus,
};

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the backend.
///
/// The base URL is injected by the embedding application; this crate never
/// decides where the backend lives.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend base URL, e.g. `https://api.example.com/api`.
    pub base_url: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl GatewayConfig {
    /// Creates a config with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// HTTP client for the gym-management backend.
pub struct HttpVisitorGateway {
    client: Client,
    base_url: String,
}

impl HttpVisitorGateway {
    /// Builds a gateway from the given config.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Path for a single visitor resource, CIN percent-encoded.
    fn visitor_path(cin: &str) -> String {
        format!("/visiteurs/{}", urlencoding::encode(cin))
    }

    /// Runs a request and returns the body, mapping non-2xx statuses to
    /// errors. `cin` enables 404 mapping for visitor-keyed paths.
    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
        method: &str,
        path: &str,
        cin: Option<&str>,
    ) -> Result<String> {
        let (status, body) = HttpUtils::execute_request(builder, method, path).await?;
        if (200..300).contains(&status) {
            return Ok(body);
        }
        Err(map_failure(status, &body, cin))
    }
}

/// Maps a non-2xx response to a gateway error, surfacing the backend's
/// `message` field when the body carries one.
fn map_failure(status: u16, body: &str, cin: Option<&str>) -> GatewayError {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        message: Option<String>,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message);

    if status == 404
        && let Some(cin) = cin
    {
        return GatewayError::VisitorNotFound {
            cin: cin.to_string(),
            raw_message: message,
        };
    }

    GatewayError::Api {
        message: message.unwrap_or_else(|| GENERIC_FAILURE_MSG.to_string()),
    }
}

#[async_trait]
impl VisitorGateway for HttpVisitorGateway {
    async fn create_visitor(&self, req: &CreateVisitorRequest) -> Result<Visitor> {
        let path = "/visiteurs";
        let builder = self.client.post(self.url(path)).json(req);
        let body = self.execute(builder, "POST", path, None).await?;
        let envelope: DataEnvelope<Visitor> = HttpUtils::parse_json(&body)?;
        Ok(envelope.data)
    }

    async fn list_visitors(&self) -> Result<Vec<Visitor>> {
        let path = "/visiteurs";
        let builder = self.client.get(self.url(path));
        let body = self.execute(builder, "GET", path, None).await?;
        let envelope: ListEnvelope<Visitor> = HttpUtils::parse_json(&body)?;
        Ok(envelope.data.data)
    }

    async fn get_visitor(&self, cin: &str) -> Result<Visitor> {
        let path = Self::visitor_path(cin);
        let builder = self.client.get(self.url(&path));
        let body = self.execute(builder, "GET", &path, Some(cin)).await?;
        let envelope: DataEnvelope<Visitor> = HttpUtils::parse_json(&body)?;
        Ok(envelope.data)
    }

    async fn update_visitor(&self, cin: &str, req: &UpdateVisitorRequest) -> Result<Visitor> {
        let path = Self::visitor_path(cin);
        let builder = self.client.put(self.url(&path)).json(req);
        let body = self.execute(builder, "PUT", &path, Some(cin)).await?;
        let envelope: DataEnvelope<Visitor> = HttpUtils::parse_json(&body)?;
        Ok(envelope.data)
    }

    async fn delete_visitor(&self, cin: &str) -> Result<()> {
        let path = Self::visitor_path(cin);
        let builder = self.client.delete(self.url(&path));
        self.execute(builder, "DELETE", &path, Some(cin)).await?;
        Ok(())
    }

    async fn update_status(&self, cin: &str, status: VisitorStatus) -> Result<()> {
        #[derive(serde::Serialize)]
        struct StatusBody {
            status: VisitorStatus,
        }

        let path = format!("{}/status", Self::visitor_path(cin));
        let builder = self
            .client
            .patch(self.url(&path))
            .json(&StatusBody { status });
        let body = self.execute(builder, "PATCH", &path, Some(cin)).await?;

        // The endpoint answers with a raw JSON body; nothing in it is needed
        // beyond confirming it decodes.
        let _: serde_json::Value = HttpUtils::parse_json(&body)?;
        Ok(())
    }

    async fn list_clubs(&self) -> Result<Vec<Club>> {
        let path = "/clubs";
        let builder = self.client.get(self.url(path));
        let body = self.execute(builder, "GET", path, None).await?;
        let envelope: FlaggedEnvelope<Page<Club>> = HttpUtils::parse_json(&body)?;
        if !envelope.success {
            return Err(GatewayError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE_MSG.to_string()),
            });
        }
        Ok(envelope.data.map(|page| page.data).unwrap_or_default())
    }

    async fn convert_visitor(
        &self,
        cin: &str,
        payload: &ConversionPayload,
    ) -> Result<ConversionReceipt> {
        let path = format!("{}/convert", Self::visitor_path(cin));
        let builder = self.client.post(self.url(&path)).json(payload);
        let body = self.execute(builder, "POST", &path, Some(cin)).await?;
        let envelope: FlaggedEnvelope<serde_json::Value> = HttpUtils::parse_json(&body)?;
        if !envelope.success {
            return Err(GatewayError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE_MSG.to_string()),
            });
        }
        Ok(ConversionReceipt {
            message: envelope.message,
            client: envelope.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let gateway = HttpVisitorGateway::new(&GatewayConfig::new("http://localhost:8000/api/"));
        assert_eq!(
            gateway.url("/visiteurs"),
            "http://localhost:8000/api/visiteurs"
        );
    }

    #[test]
    fn visitor_path_encodes_cin() {
        assert_eq!(
            HttpVisitorGateway::visitor_path("AB 12/É"),
            "/visiteurs/AB%2012%2F%C3%89"
        );
    }

    #[test]
    fn map_failure_surfaces_server_message() {
        let e = map_failure(422, r#"{"message":"CIN déjà utilisé"}"#, None);
        assert!(matches!(&e, GatewayError::Api { message } if message == "CIN déjà utilisé"));
    }

    #[test]
    fn map_failure_404_with_cin_is_not_found() {
        let e = map_failure(404, "{}", Some("AB12"));
        assert!(matches!(&e, GatewayError::VisitorNotFound { cin, .. } if cin == "AB12"));
    }

    #[test]
    fn map_failure_falls_back_to_generic_message() {
        let e = map_failure(500, "<html>oops</html>", None);
        assert!(matches!(&e, GatewayError::Api { message } if message == GENERIC_FAILURE_MSG));
    }
}
