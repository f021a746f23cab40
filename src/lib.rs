//! Decision Lens - Guided decision evaluation
//!
//! This crate walks a user through one decision: a clarification dialogue
//! with an external reasoning backend, the backend's narrative analysis, and
//! a deterministic stress test of each option.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
