//! # Domain Layer

pub mod errors;
pub mod strategy;

pub use errors::GrowthError;
pub use strategy::{GrowthStrategy, HeaderCommitStatus};
