//! # FlightSurety Test Suite
//!
//! End-to-end flows across every subsystem, driven through the same
//! `SubsystemContainer` the node binary builds.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # node builder, accounts, polling helpers
//!     ├── governance.rs   # airline admission scenarios
//!     ├── insurance.rs    # purchase scenarios
//!     ├── oracles.rs      # quorum → payout → withdrawal, coordinator fan-out
//!     └── http.rs         # HTTP trigger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fs-tests
//! cargo test -p fs-tests integration::oracles::
//! ```

pub mod integration;
