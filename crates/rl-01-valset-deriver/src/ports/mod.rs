//! # Ports Layer
//!
//! The inbound API trait. The only outbound dependency is
//! `shared_types::EvmClient`.

pub mod inbound;

pub use inbound::ValidatorSetDeriverApi;
