//! Cross-subsystem integration scenarios.

pub mod observability;
pub mod pipeline;
pub mod settlement;
