//! # Domain Layer
//!
//! Pure admission rules.

pub mod approval;
