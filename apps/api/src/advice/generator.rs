//! The advice generator: one profile string in, one completion call, raw text out.

use std::sync::Arc;

use tracing::info;

use crate::advice::prompts::build_prompt;
use crate::llm_client::{CompletionError, CompletionService};

/// Shown instead of calling the completion service when no profile text was given.
pub const MISSING_GOAL_MESSAGE: &str = "Please enter your fitness goal.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    /// Provider text, unmodified.
    Advice(String),
    /// The profile string was empty; nothing was sent.
    MissingGoal,
}

#[derive(Clone)]
pub struct AdviceGenerator {
    service: Arc<dyn CompletionService>,
}

impl AdviceGenerator {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    pub fn model(&self) -> &str {
        self.service.model()
    }

    /// Sends the templated prompt once. Provider failures are returned as-is;
    /// there is no retry.
    pub async fn generate(&self, profile: &str) -> Result<AdviceOutcome, CompletionError> {
        if profile.trim().is_empty() {
            return Ok(AdviceOutcome::MissingGoal);
        }

        let prompt = build_prompt(profile);
        info!(
            model = self.service.model(),
            prompt_chars = prompt.len(),
            "Requesting fitness advice"
        );

        let advice = self.service.complete(&prompt).await?;
        info!(advice_chars = advice.len(), "Fitness advice received");

        Ok(AdviceOutcome::Advice(advice))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingCompletion;
    use super::*;
    use crate::advice::prompts::FITNESS_ADVICE_TEMPLATE;

    const ALICE: &str = "Name: Alice, Age: 30 Years, Gender: Female, Weight: 65.0 Kilograms, \
        Height: 165.0 Centimeter, Target Weight: 60.0 Kilograms, Target Duration: 90 Days, \
        Food Preference: vegetarian";

    #[tokio::test]
    async fn test_generate_calls_service_once_with_templated_prompt() {
        let service = Arc::new(RecordingCompletion::replying("Eat greens. Run."));
        let generator = AdviceGenerator::new(service.clone());

        let outcome = generator.generate(ALICE).await.unwrap();

        assert_eq!(outcome, AdviceOutcome::Advice("Eat greens. Run.".to_string()));
        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], FITNESS_ADVICE_TEMPLATE.replace("{context}", ALICE));
    }

    #[tokio::test]
    async fn test_empty_profile_never_reaches_service() {
        let service = Arc::new(RecordingCompletion::replying("unused"));
        let generator = AdviceGenerator::new(service.clone());

        assert_eq!(generator.generate("").await.unwrap(), AdviceOutcome::MissingGoal);
        assert_eq!(generator.generate("  \n").await.unwrap(), AdviceOutcome::MissingGoal);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_advice_is_returned_verbatim() {
        let raw = "\n\n  Diet:\n\t- lentils\n";
        let generator = AdviceGenerator::new(Arc::new(RecordingCompletion::replying(raw)));
        assert_eq!(
            generator.generate(ALICE).await.unwrap(),
            AdviceOutcome::Advice(raw.to_string())
        );
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let service = Arc::new(RecordingCompletion::failing(503));
        let generator = AdviceGenerator::new(service.clone());

        let err = generator.generate(ALICE).await.unwrap_err();
        assert!(matches!(err, CompletionError::Api { status: 503, .. }));
        assert_eq!(service.calls().len(), 1);
    }
}
