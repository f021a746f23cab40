//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReasoningClient` - clarification dialogue and analysis backend

mod reasoning_client;

pub use reasoning_client::{
    BackendError, ClarificationOutcome, ReasoningClient, DEFAULT_BACKEND_MESSAGE,
};
