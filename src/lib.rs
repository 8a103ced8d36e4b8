//! riskreg - Risk Register Service
//!
//! Keeps a register of risk entries (likelihood, impact, score, mitigation
//! and ownership) in SQLite and serves it over a small JSON HTTP API.
//!
//! ## Input Methods
//!
//! 1. **HTTP API**: CRUD on `/risks` plus `POST /risks/import` for CSV uploads.
//!
//! 2. **CLI import**: `riskreg import risks.csv` runs the same importer
//!    against the configured database.

pub mod config;
pub mod http_server;
pub mod register;

pub use register::{RegisterError, RiskRecord, RiskStore};
