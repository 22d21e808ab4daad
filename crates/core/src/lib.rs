//! # iterthought Core
//!
//! Domain types, traits, and error definitions for the iterthought
//! iterative-refinement loops. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every seam is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping the generation backend via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod generator;
pub mod inject;
pub mod knowledge;
pub mod outcome;
pub mod stopping;

// Re-export key types at crate root for ergonomics
pub use error::{BackendError, Error, Result};
pub use generator::{DecodeOutcome, GenerationRequest, Generator};
pub use inject::{ContextInjector, NoopInjector};
pub use knowledge::KnowledgeBase;
pub use outcome::IterationOutcome;
pub use stopping::{MarkerStopPolicy, StopPolicy, STOP_MARKER};
