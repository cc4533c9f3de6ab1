// Advice generation: profile text → templated prompt → completion service.
// All provider calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;

pub use generator::{AdviceGenerator, AdviceOutcome, MISSING_GOAL_MESSAGE};
