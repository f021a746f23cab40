//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `reasoning` - Reasoning backend clients (HTTP, mock)

pub mod reasoning;

pub use reasoning::{HttpReasoningClient, HttpReasoningConfig, MockReasoningClient, ReasoningCall};
