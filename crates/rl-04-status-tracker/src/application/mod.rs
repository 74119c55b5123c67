//! # Application Layer

pub mod listener;
pub mod tracker;

pub use listener::ValsetListener;
pub use tracker::StatusTracker;
