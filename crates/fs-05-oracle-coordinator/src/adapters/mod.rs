//! # Adapters Layer

pub mod status_policy;

pub use status_policy::{FixedStatusPolicy, RandomStatusPolicy};
