//! Application layer - use cases that coordinate domain state and ports.

pub mod orchestrator;

pub use orchestrator::{AnswerOutcome, OrchestratorSettings, SessionOrchestrator};
