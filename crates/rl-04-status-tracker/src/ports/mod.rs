//! # Ports Layer

pub mod inbound;
pub mod outbound;

pub use inbound::StatusTrackerApi;
pub use outbound::{Repo, RepoError};
