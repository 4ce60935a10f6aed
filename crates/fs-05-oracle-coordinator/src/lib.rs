//! # FS-05 Oracle Coordinator - Off-Ledger Oracle Worker Pool
//!
//! **Subsystem ID:** 5
//!
//! ## Purpose
//!
//! Long-running worker that owns a set of oracle accounts. It registers them
//! with the ledger, watches `OracleRequest` events and, for every local
//! oracle whose indexes match, submits a status chosen by a `StatusPolicy`.
//!
//! ## Concurrency Model
//!
//! - Every registration and every submission is its own spawned task.
//! - A rejected submission is logged and never aborts its siblings.
//! - No waiting for quorum: the ledger detects it and emits events.
//! - The coordinator never touches tallies; it only reads events and sends
//!   new submissions.
//!
//! ## Outbound Dependencies
//!
//! | Dependency | Trait | Purpose |
//! |------------|-------|---------|
//! | Ledger | `LedgerClient` | Register oracles, submit responses |
//! | Status source | `StatusPolicy` | Stand-in for real flight data |
//! | Shared Bus | `Subscription` | `OracleRequest` events |
//!
//! ## HTTP Trigger
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | Welcome page |
//! | `GET /api` | Route options |
//! | `GET /api/oracles/register` | Start oracle self-registration |
//! | `GET /api/oracles` | Locally registered oracles |
//! | `GET /health` | Liveness |

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod http;
pub mod ports;
pub mod service;

pub use adapters::{FixedStatusPolicy, RandomStatusPolicy};
pub use domain::registry::{LocalOracle, LocalOracleView, OracleRegistry};
pub use domain::reports::{RegistrationReport, RequestReport};
pub use http::router;
pub use ports::outbound::{CoordinatorError, LedgerClient, StatusPolicy, SubmissionAck};
pub use service::{CoordinatorConfig, OracleCoordinator};
