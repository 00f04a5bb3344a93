//! Digest agent Lambda handler and run orchestration

pub mod digest;
pub mod handler;

// Re-export the main handler for convenience
pub use digest::{DigestAgent, DigestSummary};
pub use handler::handler;
