//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "validate a domain" or "generate a domain".

pub mod generation_service;

pub use generation_service::{GenerateOptions, GenerationService};
