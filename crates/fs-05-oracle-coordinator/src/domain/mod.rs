//! # Domain Layer

pub mod registry;
pub mod reports;
