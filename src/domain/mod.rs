//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, state machine trait)
//! - `decision` - Decision draft, finalized snapshot, narrative rendering
//! - `session` - Session stages and the authoritative session state
//! - `analysis` - Pure stress-test synthesis

pub mod analysis;
pub mod decision;
pub mod foundation;
pub mod session;
