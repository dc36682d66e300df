//! Personality records attached to each dish.

use serde::{Deserialize, Serialize};

/// A one-line testimonial from a fictional reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerReview {
    pub text: String,
    pub reviewer: String,
}

/// Descriptive record for a dish. Treated as opaque payload by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub archetype: String,
    pub emoji: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default)]
    pub peer_reviews: Vec<PeerReview>,
    #[serde(default)]
    pub hidden_talent: String,
}
