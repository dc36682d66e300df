//! The enrichment port and its wire types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spiritfood_scoring::domain::personality::PeerReview;
use spiritfood_scoring::domain::reduction::QuizResult;
use thiserror::Error;

/// Why enrichment was unavailable. Never surfaced to the player.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// The request could not be sent or the connection failed.
    #[error("enrichment request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status.
    #[error("enrichment service returned status {0}")]
    Status(u16),

    /// The response body did not match [`EnrichmentResponse`].
    #[error("invalid enrichment response: {0}")]
    InvalidResponse(String),

    /// No answer within the allotted time.
    #[error("enrichment timed out after {0} ms")]
    TimedOut(u128),
}

/// What the service is told about a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichmentRequest {
    pub dish_type: String,
    pub cuisine: String,
    pub alignment_adjective: String,
    pub time_axis: String,
    pub time_percent: u32,
    pub adventure_axis: String,
    pub adventure_percent: u32,
}

impl EnrichmentRequest {
    /// Builds the request for a computed result.
    #[must_use]
    pub fn from_result(result: &QuizResult) -> Self {
        Self {
            dish_type: result.dish.clone(),
            cuisine: result.cuisine.clone(),
            alignment_adjective: result.adjective.clone(),
            time_axis: result.time_axis.axis.to_string(),
            time_percent: result.time_axis.percent,
            adventure_axis: result.adventure_axis.axis.to_string(),
            adventure_percent: result.adventure_axis.percent,
        }
    }
}

/// Replacement descriptive text for a result's personality.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnrichmentResponse {
    /// Replaces the personality's archetype.
    pub title: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default)]
    pub hidden_talent: String,
    #[serde(default)]
    pub peer_reviews: Vec<PeerReview>,
    /// Whether the service answered from its own cache.
    #[serde(default)]
    pub cached: bool,
}

/// Port to the external enrichment service.
#[async_trait]
pub trait EnrichmentPort: Send + Sync {
    /// Asks for enriched text for one result.
    async fn generate(
        &self,
        request: &EnrichmentRequest,
    ) -> Result<EnrichmentResponse, EnrichmentError>;
}
