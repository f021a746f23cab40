//! Reasoning backend adapters.
//!
//! - `HttpReasoningClient` - JSON-over-HTTP client for the real backend
//! - `MockReasoningClient` - scripted client for tests and offline runs

mod http_client;
mod mock_client;

pub use http_client::{HttpReasoningClient, HttpReasoningConfig};
pub use mock_client::{
    MockReasoningClient, ReasoningCall, DEFAULT_MOCK_ANALYSIS, DEFAULT_MOCK_QUESTION,
};
