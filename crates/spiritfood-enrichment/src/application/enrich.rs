//! Timeout-bounded enrichment with graceful degradation.

use std::time::Duration;

use serde::Serialize;
use spiritfood_scoring::domain::reduction::QuizResult;
use tracing::{debug, warn};

use crate::domain::port::{EnrichmentError, EnrichmentPort, EnrichmentRequest, EnrichmentResponse};

/// Default time allowed for the enrichment service to answer.
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_millis(5000);

/// A result, possibly with its personality text replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedResult {
    pub result: QuizResult,
    /// Whether the personality text came from the enrichment service.
    pub enriched: bool,
    /// Whether the service answered from its cache.
    pub cached: bool,
}

impl EnrichedResult {
    /// The static result, unenriched.
    #[must_use]
    pub fn fallback(result: QuizResult) -> Self {
        Self {
            result,
            enriched: false,
            cached: false,
        }
    }
}

fn apply_response(mut result: QuizResult, response: EnrichmentResponse) -> EnrichedResult {
    let personality = &mut result.personality;
    personality.archetype = response.title;
    personality.strengths = response.strengths;
    personality.weaknesses = response.weaknesses;
    personality.quotes = response.quotes;
    personality.peer_reviews = response.peer_reviews;
    personality.hidden_talent = response.hidden_talent;
    EnrichedResult {
        result,
        enriched: true,
        cached: response.cached,
    }
}

/// Asks `port` for enriched personality text, waiting at most `timeout`.
///
/// Only the personality's descriptive fields change; the emoji, dish,
/// cuisine, adjective, title, axes and raw scores are kept. Any failure or
/// timeout is logged and the static result is returned.
pub async fn enrich_result(
    result: QuizResult,
    port: &dyn EnrichmentPort,
    timeout: Duration,
) -> EnrichedResult {
    let request = EnrichmentRequest::from_result(&result);
    let outcome = match tokio::time::timeout(timeout, port.generate(&request)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(EnrichmentError::TimedOut(timeout.as_millis())),
    };

    match outcome {
        Ok(response) => {
            debug!(dish = %result.dish, cached = response.cached, "result enriched");
            apply_response(result, response)
        }
        Err(e) => {
            warn!(dish = %result.dish, error = %e, "enrichment unavailable, using static result");
            EnrichedResult::fallback(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use spiritfood_core::dimension::{AdventureAxis, TimeAxis};
    use spiritfood_scoring::domain::personality::{PeerReview, Personality};
    use spiritfood_scoring::domain::reduction::reduce;
    use spiritfood_scoring::domain::score_state::ScoreState;
    use spiritfood_scoring::domain::tables::ResultTables;
    use spiritfood_scoring::domain::vocabulary::DishVocabulary;

    use super::*;

    fn static_result() -> QuizResult {
        let vocabulary = DishVocabulary::new(vec!["Pho".to_owned()]).unwrap();
        let personality = Personality {
            archetype: "The Midnight Healer".to_owned(),
            emoji: "🍜".to_owned(),
            strengths: vec!["Warm".to_owned()],
            weaknesses: vec!["Splashy".to_owned()],
            quotes: vec!["Slurp.".to_owned()],
            peer_reviews: Vec::new(),
            hidden_talent: "Reads the room".to_owned(),
        };
        let tables = ResultTables::new(
            HashMap::from([("Pho".to_owned(), "Vietnamese".to_owned())]),
            HashMap::from([(
                (AdventureAxis::Comfort, TimeAxis::EarlyBird),
                "Wholesome".to_owned(),
            )]),
            HashMap::from([("Pho".to_owned(), personality)]),
            "Pho",
        )
        .unwrap();
        reduce(&ScoreState::new(&vocabulary), &tables)
    }

    fn response() -> EnrichmentResponse {
        EnrichmentResponse {
            title: "The Broth Whisperer".to_owned(),
            strengths: vec!["Patient".to_owned()],
            weaknesses: vec!["Steamy".to_owned()],
            quotes: vec!["Simmer down.".to_owned()],
            hidden_talent: "Fogging glasses".to_owned(),
            peer_reviews: vec![PeerReview {
                text: "Show-off.".to_owned(),
                reviewer: "Ramen".to_owned(),
            }],
            cached: true,
        }
    }

    struct StubPort {
        response: EnrichmentResponse,
        seen: Mutex<Vec<EnrichmentRequest>>,
    }

    #[async_trait]
    impl EnrichmentPort for StubPort {
        async fn generate(
            &self,
            request: &EnrichmentRequest,
        ) -> Result<EnrichmentResponse, EnrichmentError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }
    }

    struct DownPort;

    #[async_trait]
    impl EnrichmentPort for DownPort {
        async fn generate(
            &self,
            _request: &EnrichmentRequest,
        ) -> Result<EnrichmentResponse, EnrichmentError> {
            Err(EnrichmentError::Status(503))
        }
    }

    struct SlowPort;

    #[async_trait]
    impl EnrichmentPort for SlowPort {
        async fn generate(
            &self,
            _request: &EnrichmentRequest,
        ) -> Result<EnrichmentResponse, EnrichmentError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(response())
        }
    }

    #[tokio::test]
    async fn test_enrich_result_replaces_only_descriptive_fields() {
        // Arrange
        let original = static_result();
        let port = StubPort {
            response: response(),
            seen: Mutex::new(Vec::new()),
        };

        // Act
        let enriched = enrich_result(original.clone(), &port, DEFAULT_ENRICHMENT_TIMEOUT).await;

        // Assert
        assert!(enriched.enriched);
        assert!(enriched.cached);
        let result = &enriched.result;
        assert_eq!(result.personality.archetype, "The Broth Whisperer");
        assert_eq!(result.personality.hidden_talent, "Fogging glasses");
        assert_eq!(result.personality.peer_reviews.len(), 1);
        assert_eq!(result.personality.emoji, "🍜");
        assert_eq!(result.dish, original.dish);
        assert_eq!(result.title, original.title);
        assert_eq!(result.time_axis, original.time_axis);
        assert_eq!(result.adventure_axis, original.adventure_axis);
        assert_eq!(result.raw_scores, original.raw_scores);
    }

    #[tokio::test]
    async fn test_enrich_result_sends_result_summary() {
        let port = StubPort {
            response: response(),
            seen: Mutex::new(Vec::new()),
        };

        enrich_result(static_result(), &port, DEFAULT_ENRICHMENT_TIMEOUT).await;

        let seen = port.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].dish_type, "Pho");
        assert_eq!(seen[0].cuisine, "Vietnamese");
        assert_eq!(seen[0].alignment_adjective, "Wholesome");
        assert_eq!(seen[0].time_axis, "Early Bird");
        assert_eq!(seen[0].time_percent, 33);
        assert_eq!(seen[0].adventure_axis, "Comfort");
    }

    #[tokio::test]
    async fn test_enrich_result_falls_back_when_service_fails() {
        let original = static_result();

        let enriched = enrich_result(original.clone(), &DownPort, DEFAULT_ENRICHMENT_TIMEOUT).await;

        assert_eq!(enriched, EnrichedResult::fallback(original));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enrich_result_falls_back_on_timeout() {
        let original = static_result();

        let enriched = enrich_result(original.clone(), &SlowPort, Duration::from_millis(50)).await;

        assert!(!enriched.enriched);
        assert_eq!(enriched.result, original);
    }
}
