//! # Domain Layer

pub mod payout;
