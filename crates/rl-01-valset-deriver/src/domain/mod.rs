//! # Domain Layer
//!
//! Derivation errors. Entities live in `shared-types`.

pub mod errors;

pub use errors::DeriverError;
