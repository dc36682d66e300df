//! HTTP adapter for the enrichment service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::port::{EnrichmentError, EnrichmentPort, EnrichmentRequest, EnrichmentResponse};

/// Path of the generation endpoint, relative to the base URL.
pub const GENERATE_PATH: &str = "/api/generate-id-card";

/// Client for the enrichment service's JSON API.
#[derive(Debug, Clone)]
pub struct HttpEnrichmentClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpEnrichmentClient {
    /// Creates a client whose requests give up after `timeout`.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
        }
    }

    /// Full URL of the generation endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{GENERATE_PATH}", self.base_url)
    }
}

#[async_trait]
impl EnrichmentPort for HttpEnrichmentClient {
    async fn generate(
        &self,
        request: &EnrichmentRequest,
    ) -> Result<EnrichmentResponse, EnrichmentError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EnrichmentError::TimedOut(self.timeout.as_millis())
                } else {
                    EnrichmentError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| EnrichmentError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::enrich::DEFAULT_ENRICHMENT_TIMEOUT;

    #[test]
    fn test_endpoint_joins_base_url_without_double_slash() {
        let client = HttpEnrichmentClient::new("http://localhost:8000/", DEFAULT_ENRICHMENT_TIMEOUT);

        assert_eq!(client.endpoint(), "http://localhost:8000/api/generate-id-card");
    }

    #[test]
    fn test_response_decodes_service_payload() {
        let body = serde_json::json!({
            "title": "The Broth Whisperer",
            "strengths": ["Patient"],
            "weaknesses": [],
            "quotes": ["Simmer down."],
            "hidden_talent": "Fogging glasses",
            "peer_reviews": [{"text": "Show-off.", "reviewer": "Ramen"}],
            "cached": false
        });

        let response: EnrichmentResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.title, "The Broth Whisperer");
        assert_eq!(response.peer_reviews[0].reviewer, "Ramen");
        assert!(!response.cached);
    }

    #[test]
    fn test_request_serializes_wire_field_names() {
        let request = EnrichmentRequest {
            dish_type: "Pho".to_owned(),
            cuisine: "Vietnamese".to_owned(),
            alignment_adjective: "Unhinged".to_owned(),
            time_axis: "Late Night".to_owned(),
            time_percent: 90,
            adventure_axis: "Adventurer".to_owned(),
            adventure_percent: 60,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["dish_type"], "Pho");
        assert_eq!(json["alignment_adjective"], "Unhinged");
        assert_eq!(json["time_percent"], 90);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_request_failed() {
        let client = HttpEnrichmentClient::new("http://127.0.0.1:9", Duration::from_millis(500));
        let request = EnrichmentRequest {
            dish_type: "Pho".to_owned(),
            cuisine: "Vietnamese".to_owned(),
            alignment_adjective: "Unhinged".to_owned(),
            time_axis: "Late Night".to_owned(),
            time_percent: 90,
            adventure_axis: "Adventurer".to_owned(),
            adventure_percent: 60,
        };

        let result = client.generate(&request).await;

        assert!(matches!(result, Err(EnrichmentError::RequestFailed(_))));
    }
}
