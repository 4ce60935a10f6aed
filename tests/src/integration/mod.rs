//! # Integration Flows

#[cfg(test)]
pub mod fixtures;

mod governance;
mod http;
mod insurance;
mod oracles;
