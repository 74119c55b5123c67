//! # Domain Layer
//!
//! Scheme-independent aggregation logic: signer aggregation, keyed validator
//! extraction, circuit normalization and proof byte layouts.

pub mod circuit;
pub mod errors;
pub mod keyed;
pub mod proof;
pub mod signing;

pub use errors::AggregatorError;
pub use keyed::KeyedValidator;
pub use proof::{SimpleProof, ValidatorRecord};
pub use signing::SignerAggregate;
