//! # Domain Layer
//!
//! Pure response tallying.

pub mod tally;
